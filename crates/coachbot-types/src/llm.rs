//! LLM request/response types for CoachBot.
//!
//! These types model the provider-agnostic data shapes for a single
//! completion: one prompt in, one block of generated text out.

use serde::{Deserialize, Serialize};

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Response from an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
///
/// None of these are retried; each surfaces directly to the user.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream error{}: {message}", status_suffix(.status))]
    Upstream { status: Option<u16>, message: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {code})"),
        None => String::new(),
    }
}

/// Capabilities of an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub max_output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_display_with_status() {
        let err = LlmError::Upstream {
            status: Some(503),
            message: "model overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "upstream error (HTTP 503): model overloaded");
    }

    #[test]
    fn test_upstream_error_display_without_status() {
        let err = LlmError::Upstream {
            status: None,
            message: "response had no candidates".to_string(),
        };
        assert_eq!(err.to_string(), "upstream error: response had no candidates");
    }

    #[test]
    fn test_usage_default() {
        let usage = Usage::default();
        assert_eq!(usage.input_tokens, 0);
        assert_eq!(usage.output_tokens, 0);
    }

    #[test]
    fn test_completion_request_is_prompt_only() {
        let request = CompletionRequest {
            model: "gemini-1.5-pro".to_string(),
            prompt: "Hello".to_string(),
            temperature: 0.7,
            max_output_tokens: 1500,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 4);
        assert_eq!(json["prompt"], "Hello");
        assert_eq!(json["max_output_tokens"], 1500);
    }
}
