//! gpt-complete - send a prompt to a text-completion endpoint and print the result
//!
//! This library provides a configurable asynchronous completion client and a
//! single invocation that reports the first completion, containing every failure.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::{CompletionClient, OpenAiClient},
    config::{ClientConfig, ConfigOverrides},
    errors::{CompletionError, Result},
    generate::{generate_response, Outcome},
    models::{Choice, CompletionRequest, CompletionResponse, Usage, SAMPLE_PROMPT},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
