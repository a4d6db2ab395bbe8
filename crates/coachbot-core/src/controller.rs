//! Interaction controller.
//!
//! Runs one feature invocation against a session: validate, render the
//! prompt, call the provider once, and record the result. Nothing is retried
//! and nothing is written to history unless the provider call succeeded.

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, field, info, info_span, warn};

use coachbot_observe::genai_attrs;
use coachbot_types::error::CoachError;
use coachbot_types::feature::FeatureRequest;
use coachbot_types::history::{CompletionResult, HistoryEntry};
use coachbot_types::llm::CompletionRequest;

use crate::llm::box_provider::BoxLlmProvider;
use crate::session::{InvocationState, SessionContext};
use crate::template;

/// Generation parameters shared by every session.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub max_output_tokens: u32,
}

/// A request that passed validation and is ready to send.
struct PreparedCall {
    prompt: String,
    credential: SecretString,
    temperature: f32,
}

/// Orchestrates template rendering, the completion call and history updates.
pub struct InteractionController {
    provider: Arc<BoxLlmProvider>,
    config: GenerationConfig,
}

impl InteractionController {
    /// Create a controller. The output cap is clamped to what the provider's
    /// model supports.
    pub fn new(provider: Arc<BoxLlmProvider>, mut config: GenerationConfig) -> Self {
        let limit = provider.capabilities().max_output_tokens;
        if config.max_output_tokens > limit {
            warn!(
                requested = config.max_output_tokens,
                limit, "max_output_tokens above model limit, clamping"
            );
            config.max_output_tokens = limit;
        }
        Self { provider, config }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run one feature invocation to completion.
    ///
    /// On success the result is appended to the session history and kept as
    /// the session's last result. On any failure the session is left in
    /// [`InvocationState::Failed`] with its history untouched.
    pub async fn invoke(
        &self,
        session: &mut SessionContext,
        request: &FeatureRequest,
    ) -> Result<CompletionResult, CoachError> {
        session.transition(InvocationState::Validating);

        let prepared = match Self::validate(session, request) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(session_id = %session.id(), feature = %request.feature, error = %err, "request rejected");
                session.transition(InvocationState::Failed);
                return Err(err);
            }
        };

        session.transition(InvocationState::Requesting);

        let completion_request = CompletionRequest {
            model: self.config.model.clone(),
            prompt: prepared.prompt,
            temperature: prepared.temperature,
            max_output_tokens: self.config.max_output_tokens,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = genai_attrs::OP_COMPLETE,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %completion_request.model,
            gen_ai.request.max_tokens = completion_request.max_output_tokens,
            gen_ai.request.temperature = completion_request.temperature,
            coachbot.feature = %request.feature,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
            gen_ai.response.finish_reasons = field::Empty,
        );

        let response = match self
            .provider
            .complete(&completion_request, &prepared.credential)
            .instrument(span.clone())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(session_id = %session.id(), feature = %request.feature, error = %err, "completion failed");
                session.transition(InvocationState::Failed);
                return Err(err.into());
            }
        };

        span.record(genai_attrs::GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
        span.record(genai_attrs::GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
        if let Some(reason) = response.finish_reason.as_deref() {
            span.record(genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS, reason);
        }

        let result = CompletionResult {
            feature: request.feature,
            text: response.text,
            model: response.model,
            generated_at: Utc::now(),
        };

        let entry = HistoryEntry::from_result(
            &result,
            request.profile.sport,
            request.profile.position.trim(),
            request.custom_question.as_deref().map(str::trim),
        );
        if let Some(evicted) = session.history.append(entry) {
            info!(session_id = %session.id(), evicted = %evicted.id, "history full, dropped oldest entry");
        }

        info!(
            session_id = %session.id(),
            feature = %request.feature,
            output_tokens = response.usage.output_tokens,
            chars = result.text.len(),
            "completion succeeded"
        );

        session.set_last_result(result.clone());
        session.transition(InvocationState::Succeeded);
        Ok(result)
    }

    /// Checks run before any network call.
    fn validate(
        session: &SessionContext,
        request: &FeatureRequest,
    ) -> Result<PreparedCall, CoachError> {
        let credential = session
            .settings
            .credential()
            .map(|c| SecretString::from(c.expose_secret().to_string()))
            .ok_or(CoachError::MissingCredential)?;

        let prompt = template::render_request(request)?;
        request.profile.validate()?;

        Ok(PreparedCall {
            prompt,
            credential,
            temperature: session.settings.temperature(),
        })
    }
}
