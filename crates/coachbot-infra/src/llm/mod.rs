//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait
//! defined in `coachbot-core` for Google Gemini.
//!
//! Also provides a provider factory ([`create_provider`]) that constructs the
//! provider from a [`GlobalConfig`], and a connection test function
//! ([`test_provider_connection`]) for verifying a session's credential.
//!
//! [`LlmProvider`]: coachbot_core::llm::provider::LlmProvider

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use coachbot_core::llm::box_provider::BoxLlmProvider;
use coachbot_types::config::GlobalConfig;
use coachbot_types::llm::{CompletionRequest, LlmError};

use self::gemini::GeminiProvider;

/// Create a [`BoxLlmProvider`] from the global configuration.
///
/// # Errors
///
/// Returns [`LlmError::Network`] if the HTTP client cannot be built.
pub fn create_provider(config: &GlobalConfig) -> Result<BoxLlmProvider, LlmError> {
    let provider = GeminiProvider::new(
        config.model.clone(),
        config.base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::debug!(model = %config.model, base_url = %config.base_url, "Gemini provider ready");
    Ok(BoxLlmProvider::new(provider))
}

/// Test a credential by sending a minimal completion request.
///
/// Used by the settings panel to check an API key before generating. Sends
/// a tiny "Hello" prompt with a minimal token budget against the provider's
/// default model.
///
/// # Errors
///
/// Returns the LLM error if the provider rejects the key or cannot be reached.
pub async fn test_provider_connection(
    provider: &BoxLlmProvider,
    credential: &SecretString,
) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        prompt: "Hello".to_string(),
        temperature: 0.0,
        max_output_tokens: 16,
    };
    match provider.complete(&request, credential).await {
        Ok(_) => Ok(()),
        // The key was accepted; only the tiny reply was unusable.
        Err(LlmError::Upstream { status: None, .. }) => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: String) -> GlobalConfig {
        GlobalConfig {
            base_url,
            ..GlobalConfig::default()
        }
    }

    #[test]
    fn test_create_provider_gemini() {
        let provider = create_provider(&GlobalConfig::default()).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.capabilities().max_output_tokens, 8_192);
    }

    #[tokio::test]
    async fn test_connection_ok() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "generationConfig": { "maxOutputTokens": 16 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Hi!" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = create_provider(&config_for(server.uri())).unwrap();
        test_provider_connection(&provider, &SecretString::from("good-key"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_connection_ok_when_reply_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "finishReason": "MAX_TOKENS" }]
            })))
            .mount(&server)
            .await;

        let provider = create_provider(&config_for(server.uri())).unwrap();
        assert!(
            test_provider_connection(&provider, &SecretString::from("good-key"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_connection_bad_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let provider = create_provider(&config_for(server.uri())).unwrap();
        let err = test_provider_connection(&provider, &SecretString::from("bad-key"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Authentication(_)));
    }
}
