//! One request/response cycle: submit a prompt, report the first completion

use std::io::Write;
use tracing::{debug, error, info};

use crate::core::client::CompletionClient;
use crate::core::errors::CompletionError;
use crate::core::models::CompletionRequest;

/// Terminal state of a completion invocation
#[derive(Debug)]
pub enum Outcome {
    /// Text of the first choice, already written to the output stream
    Completed(String),
    /// Failure, already reported on the error stream
    Failed(CompletionError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

/// Send `prompt` through `client` and report the result.
///
/// The first choice's text goes to `out`; any failure, including a response
/// with no choices, goes to `err` as `Error: <details>`. Errors never escape
/// this function.
pub async fn generate_response<C, O, E>(client: &C, prompt: &str, out: &mut O, err: &mut E) -> Outcome
where
    C: CompletionClient + ?Sized,
    O: Write,
    E: Write,
{
    let request = CompletionRequest::new(prompt);
    debug!(prompt_len = prompt.len(), "Requesting completion");

    let result = match client.complete(&request).await {
        Ok(response) => response.first_text().map(str::to_owned),
        Err(e) => Err(e),
    };

    match result {
        Ok(text) => {
            info!(chars = text.chars().count(), "Completion received");
            if let Err(e) = writeln!(out, "{}", text) {
                error!("Failed to write completion: {}", e);
            }
            Outcome::Completed(text)
        }
        Err(e) => {
            error!("Completion failed: {}", e);
            if let Err(write_err) = writeln!(err, "Error: {}", e) {
                error!("Failed to write error report: {}", write_err);
            }
            Outcome::Failed(e)
        }
    }
}
