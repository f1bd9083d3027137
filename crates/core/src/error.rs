//! Error types for the folio domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context owns its error enum; the ones shared across crates
//! live here.

use thiserror::Error;

/// Failure of a single call to one model through the gateway.
///
/// `NotConfigured` is the configuration error (no credential, no network
/// attempt). Every other variant is an upstream failure.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Whether this error is an upstream failure (as opposed to missing
    /// configuration).
    pub fn is_upstream(&self) -> bool {
        !matches!(self, ProviderError::NotConfigured(_))
    }
}

/// Failure of a whole fallback chain.
#[derive(Debug, Clone, Error)]
pub enum FallbackError {
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    #[error("Fallback chain is empty")]
    EmptyChain,

    #[error("All {attempts} models failed. Last error: {last_error}")]
    AllModelsExhausted {
        attempts: usize,
        last_error: ProviderError,
    },
}
