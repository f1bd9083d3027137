//! Shared test helpers for generator and assistant tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio_core::error::ProviderError;
use folio_core::provider::{CompletionRequest, ModelGateway};
use folio_core::PoemArtifact;

use crate::context::{ContextAssembler, DocumentStore, NoActivity};

/// A mock gateway that answers from a queue of scripted results.
///
/// Each call to `complete` takes the next result; once the queue is empty
/// every call fails with a network error.
pub struct SequentialMockGateway {
    responses: Mutex<Vec<Result<String, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    configured: bool,
    delay: Duration,
}

impl SequentialMockGateway {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
            configured: true,
            delay: Duration::ZERO,
        }
    }

    /// A gateway that answers every call with `text`.
    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// A gateway without a credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ModelGateway for SequentialMockGateway {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request);
        if !self.configured {
            return Err(ProviderError::NotConfigured("OPENROUTER_API_KEY not set".into()));
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ProviderError::Network("script exhausted".into())))
    }
}

/// An assembler with no documents and no activity.
pub fn empty_assembler() -> ContextAssembler {
    ContextAssembler::new(
        DocumentStore::new("/nonexistent/folio-test-data"),
        Arc::new(NoActivity),
    )
}

/// A valid artifact with the given id.
pub fn make_poem(id: &str) -> PoemArtifact {
    PoemArtifact::new(
        id,
        ["Morning build is green", "Seven tests and then eleven", "Ship it before lunch"],
        "A fact for testing.",
        "🧪",
    )
}

/// A JSON array of `n` valid artifacts with ids `gen-0..gen-n`.
pub fn poems_json(n: usize) -> String {
    let poems: Vec<PoemArtifact> = (0..n).map(|i| make_poem(&format!("gen-{i}"))).collect();
    serde_json::to_string(&poems).unwrap()
}
