//! Model fallback: an ordered retry chain over model identifiers.
//!
//! When a model fails (timeout, bad status, malformed body), the invoker
//! logs the reason and tries the next model in the chain. Cheap, fast models
//! go first; the latency of failed attempts is accepted.

use std::sync::Arc;

use folio_core::error::{FallbackError, ProviderError};
use folio_core::message::ChatMessage;
use folio_core::provider::{CompletionRequest, GenerationParams, ModelGateway};
use tracing::{info, warn};

/// Conversational models: large context windows, free model last.
pub const CHAT_MODELS: &[&str] = &[
    "google/gemini-3.1-pro-preview",
    "anthropic/claude-sonnet-4.6",
    "openai/gpt-4.1",
    "qwen/qwen3-235b-a22b",
    "openai/gpt-oss-120b:free",
];

/// Haiku models: fast flash-class models, free model last.
pub const HAIKU_MODELS: &[&str] = &[
    "google/gemini-3-flash-preview",
    "openai/gpt-4.1-mini",
    "anthropic/claude-haiku-4.5",
    "openai/gpt-5-mini",
    "mistralai/mistral-small-3.1-24b-instruct:free",
];

/// An ordered list of model identifiers. Order is trial order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChain {
    name: String,
    models: Vec<String>,
}

impl ModelChain {
    pub fn new(name: impl Into<String>, models: &[&str]) -> Self {
        Self {
            name: name.into(),
            models: models.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// The chain used by the chat assistant.
    pub fn chat() -> Self {
        Self::new("chat", CHAT_MODELS)
    }

    /// The chain used by the haiku generator.
    pub fn haiku() -> Self {
        Self::new("haiku", HAIKU_MODELS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Number of models in the chain.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// The successful result of walking a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackOutcome {
    /// The assistant text
    pub text: String,
    /// Which model produced it
    pub model: String,
}

/// Walks a [`ModelChain`] through a gateway until one model answers.
#[derive(Clone)]
pub struct FallbackInvoker {
    gateway: Arc<dyn ModelGateway>,
}

impl FallbackInvoker {
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Whether the underlying gateway has a credential.
    pub fn is_configured(&self) -> bool {
        self.gateway.is_configured()
    }

    /// Try each model in order; return the first success.
    ///
    /// Exactly one attempt per model. A missing credential aborts the walk
    /// immediately since every later model would fail the same way.
    pub async fn invoke(
        &self,
        chain: &ModelChain,
        messages: Vec<ChatMessage>,
        params: GenerationParams,
    ) -> Result<FallbackOutcome, FallbackError> {
        let mut last_error: Option<ProviderError> = None;
        let total = chain.len();

        for (i, model) in chain.models().iter().enumerate() {
            info!(chain = %chain.name(), model = %model, attempt = i + 1, total, "Trying model");

            let request = CompletionRequest {
                model: model.clone(),
                messages: messages.clone(),
                params: params.clone(),
            };

            let result = match tokio::time::timeout(params.timeout, self.gateway.complete(request)).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(format!(
                    "Model '{}' timed out after {}s",
                    model,
                    params.timeout.as_secs_f32()
                ))),
            };

            match result {
                Ok(text) => {
                    info!(chain = %chain.name(), model = %model, "Model succeeded");
                    return Ok(FallbackOutcome {
                        text,
                        model: model.clone(),
                    });
                }
                Err(ProviderError::NotConfigured(reason)) => {
                    warn!(chain = %chain.name(), reason = %reason, "Gateway not configured, skipping chain");
                    return Err(FallbackError::NotConfigured(reason));
                }
                Err(e) => {
                    warn!(chain = %chain.name(), model = %model, error = %e, "Model failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(last_error) => Err(FallbackError::AllModelsExhausted {
                attempts: total,
                last_error,
            }),
            None => Err(FallbackError::EmptyChain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// A gateway whose answer depends on the model asked.
    struct ScriptedGateway {
        answers: HashMap<String, Result<String, ProviderError>>,
        hang: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedGateway {
        fn new() -> Self {
            Self {
                answers: HashMap::new(),
                hang: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn ok(mut self, model: &str, text: &str) -> Self {
            self.answers.insert(model.into(), Ok(text.into()));
            self
        }

        fn fail(mut self, model: &str, error: ProviderError) -> Self {
            self.answers.insert(model.into(), Err(error));
            self
        }

        fn hangs(mut self, model: &str) -> Self {
            self.hang.push(model.into());
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelGateway for ScriptedGateway {
        fn name(&self) -> &str {
            "scripted"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push(request.model.clone());
            if self.hang.contains(&request.model) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.answers
                .get(&request.model)
                .cloned()
                .unwrap_or_else(|| Err(ProviderError::Network("no script".into())))
        }
    }

    fn params() -> GenerationParams {
        GenerationParams {
            timeout: Duration::from_millis(50),
            ..GenerationParams::default()
        }
    }

    fn chain() -> ModelChain {
        ModelChain::new("test", &["a", "b", "c", "d"])
    }

    fn server_error() -> ProviderError {
        ProviderError::ApiError {
            status_code: 502,
            message: "Bad Gateway".into(),
        }
    }

    #[tokio::test]
    async fn first_model_succeeds() {
        let gateway = Arc::new(ScriptedGateway::new().ok("a", "first").ok("b", "second"));
        let invoker = FallbackInvoker::new(gateway.clone());

        let outcome = invoker.invoke(&chain(), vec![ChatMessage::user("hi")], params()).await.unwrap();
        assert_eq!(outcome.text, "first");
        assert_eq!(outcome.model, "a");
        assert_eq!(gateway.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn k_failures_then_success_makes_k_plus_one_calls() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fail("a", server_error())
                .fail("b", ProviderError::MalformedResponse("no content".into()))
                .ok("c", "third time lucky")
                .ok("d", "never reached"),
        );
        let invoker = FallbackInvoker::new(gateway.clone());

        let outcome = invoker.invoke(&chain(), vec![ChatMessage::user("hi")], params()).await.unwrap();
        assert_eq!(outcome.text, "third time lucky");
        assert_eq!(outcome.model, "c");
        assert_eq!(gateway.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn all_models_fail() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fail("a", server_error())
                .fail("b", server_error())
                .fail("c", server_error())
                .fail("d", ProviderError::Network("conn refused".into())),
        );
        let invoker = FallbackInvoker::new(gateway.clone());

        let result = invoker.invoke(&chain(), vec![ChatMessage::user("hi")], params()).await;
        match result.unwrap_err() {
            FallbackError::AllModelsExhausted { attempts, last_error } => {
                assert_eq!(attempts, 4);
                assert!(matches!(last_error, ProviderError::Network(ref m) if m == "conn refused"));
            }
            other => panic!("Expected AllModelsExhausted, got: {other:?}"),
        }
        assert_eq!(gateway.calls(), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_triggers_fallback() {
        let gateway = Arc::new(ScriptedGateway::new().hangs("a").ok("b", "quick"));
        let invoker = FallbackInvoker::new(gateway.clone());

        let outcome = invoker.invoke(&chain(), vec![ChatMessage::user("hi")], params()).await.unwrap();
        assert_eq!(outcome.model, "b");
        assert_eq!(gateway.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn not_configured_short_circuits() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .fail("a", ProviderError::NotConfigured("OPENROUTER_API_KEY not set".into()))
                .ok("b", "unreachable"),
        );
        let invoker = FallbackInvoker::new(gateway.clone());

        let result = invoker.invoke(&chain(), vec![ChatMessage::user("hi")], params()).await;
        assert!(matches!(result, Err(FallbackError::NotConfigured(_))));
        assert_eq!(gateway.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let gateway = Arc::new(ScriptedGateway::new());
        let invoker = FallbackInvoker::new(gateway.clone());

        let result = invoker
            .invoke(&ModelChain::new("empty", &[]), vec![ChatMessage::user("hi")], params())
            .await;
        assert!(matches!(result, Err(FallbackError::EmptyChain)));
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn built_in_chains() {
        let chat = ModelChain::chat();
        assert_eq!(chat.len(), 5);
        assert_eq!(chat.models()[0], "google/gemini-3.1-pro-preview");
        assert!(chat.models().last().unwrap().ends_with(":free"));

        let haiku = ModelChain::haiku();
        assert_eq!(haiku.len(), 5);
        assert_eq!(haiku.models()[0], "google/gemini-3-flash-preview");
        assert!(!haiku.is_empty());
    }
}
