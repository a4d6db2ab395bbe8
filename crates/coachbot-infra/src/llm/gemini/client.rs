//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends one non-streaming `generateContent` request per completion. The
//! credential is supplied per call by the session that owns it and is only
//! exposed when building the `x-goog-api-key` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use coachbot_core::llm::provider::LlmProvider;
use coachbot_observe::genai_attrs;
use coachbot_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, Usage,
};

use super::types::{
    Content, ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};

/// Google Gemini LLM provider.
///
/// Holds one pooled HTTP client shared by every session; it never stores a
/// credential of its own.
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
    capabilities: ProviderCapabilities,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Default model identifier (e.g., "gemini-1.5-pro")
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    /// * `timeout` - Whole-request timeout; expiry surfaces as [`LlmError::Network`]
    pub fn new(model: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Network(format!("failed to create HTTP client: {e}")))?;

        let capabilities = Self::capabilities_for_model(&model);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout,
            capabilities,
        })
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Determine capabilities based on model name.
    fn capabilities_for_model(model: &str) -> ProviderCapabilities {
        let max_output_tokens = if model.starts_with("gemini-2.5") {
            65_536
        } else {
            8_192
        };
        ProviderCapabilities { max_output_tokens }
    }

    /// Build the `generateContent` URL for a model.
    fn url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    /// Convert a generic [`CompletionRequest`] into a Gemini request body.
    fn to_gemini_request(request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), request.prompt.clone())],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                candidate_count: 1,
            },
        }
    }

    /// Map a non-2xx response to an [`LlmError`].
    ///
    /// 401 and 403 are authentication failures. Gemini reports a malformed
    /// key as a 400 with reason `API_KEY_INVALID`, which is treated the same.
    fn map_api_error(status: u16, body: &str) -> LlmError {
        let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let message = parsed
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body.trim().to_string());

        let invalid_key = parsed
            .as_ref()
            .is_some_and(|e| e.error.has_reason("API_KEY_INVALID"));

        match status {
            401 | 403 => LlmError::Authentication(message),
            400 if invalid_key => LlmError::Authentication(message),
            _ => LlmError::Upstream {
                status: Some(status),
                message,
            },
        }
    }

    /// Map a transport failure to an [`LlmError`].
    fn map_transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Network(format!(
                "request timed out after {}s",
                self.timeout.as_secs_f32()
            ))
        } else {
            LlmError::Network(format!("HTTP request failed: {err}"))
        }
    }

    /// Pull the generated text out of a successful response.
    ///
    /// All text parts of the first candidate are concatenated. A blocked
    /// prompt or a candidate without text is an upstream error.
    fn extract_text(response: &GenerateContentResponse) -> Result<String, LlmError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LlmError::Upstream {
                status: None,
                message: format!("prompt blocked: {reason}"),
            });
        }

        let candidate = response.candidates.first().ok_or_else(|| LlmError::Upstream {
            status: None,
            message: "response contained no candidates".to_string(),
        })?;

        let text = candidate
            .content
            .as_ref()
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(LlmError::Upstream {
                status: None,
                message: format!("response contained no text (finish reason: {reason})"),
            });
        }

        Ok(text)
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        genai_attrs::PROVIDER_GEMINI
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = Self::to_gemini_request(request);
        let url = self.url(model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), model, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &error_body));
        }

        let gemini_resp: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.map_transport_error(e)
            } else {
                LlmError::Upstream {
                    status: Some(status.as_u16()),
                    message: format!("failed to parse response: {e}"),
                }
            }
        })?;

        let text = Self::extract_text(&gemini_resp)?;
        let usage = gemini_resp
            .usage_metadata
            .as_ref()
            .map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            text,
            model: gemini_resp
                .model_version
                .clone()
                .unwrap_or_else(|| model.to_string()),
            finish_reason: gemini_resp
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone()),
            usage,
        })
    }
}
