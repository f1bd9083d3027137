//! One generation attempt: context → haiku chain → validated batch.

use std::time::Duration;

use folio_core::message::ChatMessage;
use folio_core::provider::{GenerationParams, ResponseFormat};
use folio_core::PoemArtifact;
use folio_providers::{FallbackInvoker, ModelChain};
use tracing::{info, warn};

use super::PoemError;
use super::builtin::{self, BATCH_SIZE};
use super::extract::{extract_candidates, validate};
use crate::context::{ContextAssembler, ContextProfile};
use crate::prompts::haiku_prompt;

/// Fewer surviving artifacts than this is worth a warning.
const MIN_HEALTHY: usize = 5;

/// Sampling parameters for haiku generation.
pub fn haiku_params() -> GenerationParams {
    GenerationParams {
        temperature: 0.9,
        max_tokens: 2048,
        response_format: Some(ResponseFormat::JsonObject),
        timeout: Duration::from_secs(30),
    }
}

/// Generates batches of artifacts through the haiku chain.
#[derive(Clone)]
pub struct PoemGenerator {
    invoker: FallbackInvoker,
    assembler: ContextAssembler,
    chain: ModelChain,
}

impl PoemGenerator {
    pub fn new(invoker: FallbackInvoker, assembler: ContextAssembler) -> Self {
        Self {
            invoker,
            assembler,
            chain: ModelChain::haiku(),
        }
    }

    /// Use a different chain.
    pub fn with_chain(mut self, chain: ModelChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.invoker.is_configured()
    }

    /// Generate one full batch of exactly [`BATCH_SIZE`] artifacts.
    pub async fn generate(&self) -> Result<Vec<PoemArtifact>, PoemError> {
        let context = self.assembler.assemble(&ContextProfile::POEMS).await;
        let messages = vec![ChatMessage::user(haiku_prompt(&context))];

        let outcome = self.invoker.invoke(&self.chain, messages, haiku_params()).await?;
        info!(model = %outcome.model, "Haikus generated");

        let candidates = extract_candidates(&outcome.text)?;
        let total = candidates.len();
        let valid = validate(candidates);
        let batch = fill_batch(valid);
        info!(candidates = total, served = batch.len(), "Haiku batch ready");
        Ok(batch)
    }
}

/// Pad with built-in artifacts up to a full batch, then cap at one batch.
pub fn fill_batch(mut poems: Vec<PoemArtifact>) -> Vec<PoemArtifact> {
    if poems.len() < MIN_HEALTHY {
        warn!(valid = poems.len(), "Few valid haikus, supplementing with built-ins");
    }
    if poems.len() < BATCH_SIZE {
        poems.extend(builtin::sample(BATCH_SIZE - poems.len()));
    }
    poems.truncate(BATCH_SIZE);
    poems
}
