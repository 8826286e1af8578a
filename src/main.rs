//! Main entry point for the gpt-complete CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gpt_complete::cli::commands;
use gpt_complete::{ClientConfig, ConfigOverrides, SAMPLE_PROMPT};

/// Send a prompt to a text-completion endpoint and print the first completion
#[derive(Parser, Debug)]
#[command(name = "gpt-complete", version, about, long_about = None)]
struct Args {
    /// Prompt to complete (defaults to a sample translation prompt)
    prompt: Option<String>,

    /// API key (optional, defaults to OPENAI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Model identifier (defaults to OPENAI_MODEL or text-davinci-003)
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature in [0, 2]
    #[arg(short, long)]
    temperature: Option<f64>,

    /// Maximum number of tokens to generate
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Base URL of the completions API
    #[arg(long)]
    api_base: Option<String>,

    /// Configuration file (JSON, YAML or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr; stdout carries only the completion
    let log_level = if args.verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gpt_complete={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::load(args.config.as_deref())?.apply(ConfigOverrides {
        api_key: args.api_key,
        api_base: args.api_base,
        model: args.model,
        temperature: args.temperature,
        max_tokens: args.max_tokens,
    });

    let prompt = args.prompt.unwrap_or_else(|| SAMPLE_PROMPT.to_string());

    commands::handle_complete(config, prompt).await
}
