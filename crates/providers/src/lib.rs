//! Model gateway implementations for folio.
//!
//! `OpenRouterClient` implements `folio_core::ModelGateway` against the
//! OpenRouter API. `FallbackInvoker` walks an ordered `ModelChain` through
//! any gateway until one model answers.

pub mod fallback;
pub mod openrouter;

pub use fallback::{FallbackInvoker, FallbackOutcome, ModelChain, CHAT_MODELS, HAIKU_MODELS};
pub use openrouter::OpenRouterClient;
