//! # Folio Core
//!
//! Domain types, traits, and error definitions for the folio portfolio
//! backend. This crate has **no framework dependencies**; it defines the
//! vocabulary the provider, agent, and gateway crates implement against.
//!
//! The model gateway is defined as a trait here so that the fallback
//! invoker and its consumers can be exercised against mock gateways.

pub mod error;
pub mod message;
pub mod poem;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{FallbackError, ProviderError};
pub use message::{ChatExchange, ChatMessage, Role};
pub use poem::PoemArtifact;
pub use provider::{CompletionRequest, GenerationParams, ModelGateway, ResponseFormat};
