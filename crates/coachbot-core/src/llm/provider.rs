//! LlmProvider trait definition.
//!
//! This is the core abstraction every completion backend implements. The
//! credential is passed per call rather than held by the provider, so one
//! provider (and its HTTP connection pool) serves every session.

use secrecy::SecretString;

use coachbot_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for LLM provider backends (Gemini, test doubles, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). A single call
/// is one request/response cycle: implementations must not retry.
///
/// Implementations live in coachbot-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Limits of the configured model.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request authenticated with `credential`.
    fn complete(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
