//! BoxLlmProvider -- object-safe dynamic dispatch wrapper for LlmProvider.
//!
//! 1. Define an object-safe `LlmProviderDyn` trait with boxed futures
//! 2. Blanket-impl `LlmProviderDyn` for all `T: LlmProvider`
//! 3. `BoxLlmProvider` wraps `Box<dyn LlmProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use secrecy::SecretString;

use coachbot_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

use super::provider::LlmProvider;

/// Object-safe version of [`LlmProvider`] with boxed futures.
pub trait LlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &ProviderCapabilities;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
        credential: &'a SecretString,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        LlmProvider::capabilities(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
        credential: &'a SecretString,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request, credential))
    }
}

/// Type-erased LLM provider for runtime provider selection.
///
/// Since `LlmProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxLlmProvider` provides equivalent methods that delegate to
/// the inner `LlmProviderDyn` trait object.
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProviderDyn + Send + Sync>,
}

impl BoxLlmProvider {
    /// Wrap a concrete `LlmProvider` in a type-erased box.
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        self.inner.capabilities()
    }

    /// Send a completion request and receive the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request, credential).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    use coachbot_types::llm::Usage;

    /// Echoes the credential tail back so the test can see it was forwarded.
    struct EchoProvider {
        capabilities: ProviderCapabilities,
    }

    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        fn complete(
            &self,
            request: &CompletionRequest,
            credential: &SecretString,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            let text = format!("{}|{}", request.prompt, credential.expose_secret());
            let model = request.model.clone();
            async move {
                Ok(CompletionResponse {
                    text,
                    model,
                    finish_reason: None,
                    usage: Usage::default(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_box_delegates_to_inner_provider() {
        let boxed = BoxLlmProvider::new(EchoProvider {
            capabilities: ProviderCapabilities {
                max_output_tokens: 10,
            },
        });
        assert_eq!(boxed.name(), "echo");
        assert_eq!(boxed.capabilities().max_output_tokens, 10);

        let request = CompletionRequest {
            model: "m".to_string(),
            prompt: "hi".to_string(),
            temperature: 0.5,
            max_output_tokens: 10,
        };
        let response = boxed
            .complete(&request, &SecretString::from("k-1"))
            .await
            .unwrap();
        assert_eq!(response.text, "hi|k-1");
        assert_eq!(response.model, "m");
    }
}
