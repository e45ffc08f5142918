//! Error types for the promptlift domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each stage of the pipeline has its own error type.

use thiserror::Error;

/// A failed exchange with a provider endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}

/// Terminal failures of the enhancement pipeline.
///
/// Selection-stage transport failures never appear here: they are absorbed
/// by the context selector's fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Enhancement request is {length} characters, exceeding the limit of {limit}")]
    RequestTooLong { length: usize, limit: usize },

    #[error("Enhancement failed: {0}")]
    EnhancementFailed(#[source] TransportError),
}
