//! ModelGateway trait, the abstraction over the multi-provider LLM gateway.
//!
//! A gateway knows how to send a conversation to one named model and get the
//! assistant's text back. It performs exactly one attempt; retrying against
//! other models is the fallback invoker's job.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::ChatMessage;

/// Requested shape of the model's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// The output must be a single JSON value
    JsonObject,
}

/// Generation parameters shared by every attempt in a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Temperature (0.0 = deterministic)
    pub temperature: f32,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Optional output format constraint
    pub response_format: Option<ResponseFormat>,

    /// Upper bound for one attempt
    pub timeout: Duration,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 8192,
            response_format: None,
            timeout: Duration::from_secs(45),
        }
    }
}

/// One request against one model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The model to use (e.g., "openai/gpt-4.1")
    pub model: String,

    /// The conversation messages
    pub messages: Vec<ChatMessage>,

    pub params: GenerationParams,
}

/// The core gateway trait.
///
/// Implementations must check their credential before touching the network
/// and report its absence as [`ProviderError::NotConfigured`].
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// A human-readable name for this gateway (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Whether a credential is available. When `false`, `complete` fails
    /// with `NotConfigured` without a network attempt.
    fn is_configured(&self) -> bool;

    /// Send a request and return the assistant's text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_param_defaults() {
        let params = GenerationParams::default();
        assert!((params.temperature - 0.8).abs() < f32::EPSILON);
        assert_eq!(params.max_tokens, 8192);
        assert!(params.response_format.is_none());
        assert_eq!(params.timeout, Duration::from_secs(45));
    }

    #[test]
    fn response_format_serialization() {
        let json = serde_json::to_string(&ResponseFormat::JsonObject).unwrap();
        assert_eq!(json, "\"json_object\"");
    }
}
