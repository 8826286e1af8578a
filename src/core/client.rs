//! Completion client over an OpenAI-compatible HTTP endpoint

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::config::ClientConfig;
use crate::core::errors::{CompletionError, Result};
use crate::core::models::{ApiErrorBody, CompletionBody, CompletionRequest, CompletionResponse};

/// Capability to turn a prompt into a completion response
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit one prompt and wait for the response
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// HTTP completion client. No retries; no timeout unless configured.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl OpenAiClient {
    /// Create a new client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(1);

        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let client = builder.build()?;

        info!(model = %config.model, endpoint = %config.completions_url(), "Completion client ready");

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from defaults and `OPENAI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::load(None)?)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let body = CompletionBody {
            model: &self.config.model,
            prompt: &request.prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            model = body.model,
            temperature = body.temperature,
            max_tokens = body.max_tokens,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            let parsed: CompletionResponse =
                serde_json::from_str(&text).map_err(|e| CompletionError::MalformedResponse {
                    message: e.to_string(),
                })?;

            if let Some(usage) = parsed.usage {
                debug!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    total_tokens = usage.total_tokens,
                    "Token usage"
                );
            }

            return Ok(parsed);
        }

        // Headers must be read before the body consumes the response
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let error_text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&error_text)
            .map(|body| body.error.message)
            .unwrap_or(error_text);

        warn!(status = status.as_u16(), "Completion request rejected: {}", message);

        Err(classify_status(status, message, retry_after))
    }
}

fn classify_status(status: StatusCode, message: String, retry_after: Option<u64>) -> CompletionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Authentication {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited { retry_after },
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        self.send_request(request).await
    }
}
