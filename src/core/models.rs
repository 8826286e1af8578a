//! Core data models for completion requests and responses

use serde::{Deserialize, Serialize};

use crate::core::errors::{CompletionError, Result};

/// Prompt used when none is given on the command line
pub const SAMPLE_PROMPT: &str =
    "Translate the following English text to French: 'Hello, how are you?'";

/// Completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// One candidate completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl Choice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index: 0,
            finish_reason: None,
        }
    }
}

/// Token accounting reported by the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Completion response. `choices` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Build a response carrying only the given choices
    pub fn from_choices(choices: Vec<Choice>) -> Self {
        Self {
            id: None,
            model: None,
            choices,
            usage: None,
        }
    }

    /// Text of the first choice, or `EmptyCompletion` when there is none
    pub fn first_text(&self) -> Result<&str> {
        self.choices
            .first()
            .map(|c| c.text.as_str())
            .ok_or(CompletionError::EmptyCompletion)
    }
}

/// Body sent to the `/completions` endpoint
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CompletionBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Error envelope returned by OpenAI-compatible endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: String,
}
