//! Haiku generation, validation, and caching.
//!
//! A batch is always exactly [`BATCH_SIZE`] artifacts. Generated batches are
//! cached for a TTL; anything that goes wrong falls back to the built-in set.

pub mod builtin;
pub mod cache;
pub mod extract;
pub mod generator;
pub mod service;

use folio_core::FallbackError;
use thiserror::Error;

pub use builtin::{BATCH_SIZE, builtin_poems};
pub use cache::{CachedBatch, PoemCache};
pub use generator::PoemGenerator;
pub use service::{BatchSource, PoemBatch, PoemService};

/// Why a generation attempt produced nothing usable.
#[derive(Debug, Error)]
pub enum PoemError {
    #[error("Model chain failed: {0}")]
    Chain(#[from] FallbackError),

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No array of poems found in response")]
    NoArray,
}
