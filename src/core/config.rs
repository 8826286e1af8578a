//! Configuration management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::core::errors::{CompletionError, Result};

/// Default completions endpoint base
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default model identifier
pub const DEFAULT_MODEL: &str = "text-davinci-003";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default output token limit
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Prefix of the environment variables read by [`ClientConfig::load`]
pub const ENV_PREFIX: &str = "OPENAI";

/// Client configuration, immutable once built
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_ms: None,
        }
    }
}

// Keeps the key out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Values given on the command line, applied over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

impl ClientConfig {
    /// Create a configuration with default generation parameters
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Load from defaults, an optional config file and `OPENAI_*` variables
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_from(file, ENV_PREFIX)
    }

    /// Same as [`ClientConfig::load`] with a custom environment prefix
    pub fn load_from(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("model", DEFAULT_MODEL)?
            .set_default("temperature", DEFAULT_TEMPERATURE)?
            .set_default("max_tokens", i64::from(DEFAULT_MAX_TOKENS))?;

        if let Some(path) = file {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(api_key) = overrides.api_key {
            self.api_key = api_key;
        }
        if let Some(api_base) = overrides.api_base {
            self.api_base = api_base;
        }
        if let Some(model) = overrides.model {
            self.model = model;
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.max_tokens = max_tokens;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(config_error(format!(
                "API key is required (set {}_API_KEY or pass --api-key)",
                ENV_PREFIX
            )));
        }

        if self.api_base.is_empty() {
            return Err(config_error("API base URL is required"));
        }

        if self.model.is_empty() {
            return Err(config_error("Model is required"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(config_error(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(config_error("max_tokens must be greater than 0"));
        }

        Ok(())
    }

    /// Full URL of the completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/completions", self.api_base.trim_end_matches('/'))
    }
}

fn config_error(message: impl Into<String>) -> CompletionError {
    CompletionError::Config {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_validation() {
        let config = ClientConfig::new("test_key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_key() {
        let config = ClientConfig {
            api_key: "".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(CompletionError::Config { .. })
        ));
    }

    #[test]
    fn test_config_validation_ranges() {
        assert!(ClientConfig::new("k").with_temperature(2.5).validate().is_err());
        assert!(ClientConfig::new("k").with_temperature(-0.1).validate().is_err());
        assert!(ClientConfig::new("k").with_temperature(2.0).validate().is_ok());
        assert!(ClientConfig::new("k").with_max_tokens(0).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("sk-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_completions_url() {
        let config = ClientConfig::new("k").with_api_base("http://localhost:8080/v1/");
        assert_eq!(config.completions_url(), "http://localhost:8080/v1/completions");
    }

    #[test]
    fn test_load_defaults() {
        let config = ClientConfig::load_from(None, "GPTC_TEST_DEFAULTS_UNSET").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.api_key.is_empty());
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn test_load_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"api_key": "from-file", "model": "file-model", "temperature": 0.2}}"#
        )
        .unwrap();

        std::env::set_var("GPTC_TEST_LAYER_MODEL", "env-model");
        std::env::set_var("GPTC_TEST_LAYER_MAX_TOKENS", "42");

        let config = ClientConfig::load_from(Some(file.path()), "GPTC_TEST_LAYER").unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.model, "env-model");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 42);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ClientConfig::load_from(
            Some(Path::new("/nonexistent/gpt-complete.json")),
            "GPTC_TEST_MISSING_UNSET",
        );
        assert!(matches!(result, Err(CompletionError::ConfigSource(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let config = ClientConfig::new("k").apply(ConfigOverrides {
            model: Some("gpt-3.5-turbo-instruct".to_string()),
            temperature: Some(1.1),
            ..Default::default()
        });
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, "gpt-3.5-turbo-instruct");
        assert_eq!(config.temperature, 1.1);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }
}
