//! CLI command handlers

use std::io;
use std::time::Instant;
use tracing::{info, warn};

use crate::core::client::OpenAiClient;
use crate::core::config::ClientConfig;
use crate::core::generate::{generate_response, Outcome};

/// Handle a single completion.
///
/// Startup errors (invalid configuration, HTTP client construction) are
/// returned; a failed completion is only reported on stderr.
pub async fn handle_complete(config: ClientConfig, prompt: String) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let client = OpenAiClient::new(config)?;

    let outcome = generate_response(&client, &prompt, &mut io::stdout(), &mut io::stderr()).await;

    let duration = start_time.elapsed();
    match outcome {
        Outcome::Completed(_) => info!("Completed in {:?}", duration),
        Outcome::Failed(e) => warn!(
            auth = e.is_auth(),
            retryable = e.is_retryable(),
            "Finished without a completion in {:?}",
            duration
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_invalid_config_is_startup_error() {
        let result = handle_complete(ClientConfig::default(), "Hello".to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failed_completion_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::new("test_key").with_api_base(server.uri());
        let result = handle_complete(config, "Hello".to_string()).await;
        assert!(result.is_ok());
    }
}
