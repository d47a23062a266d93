//! Typed error for the take-engine crate.

use llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TakeError {
    /// `sport` or `location` missing or blank.
    #[error("Missing sport or location")]
    MissingInput,

    /// Upstream call failed (after retries, when retryable).
    #[error("upstream error: {0}")]
    Upstream(#[from] AiLlmError),

    /// Upstream replied without any usable text.
    #[error("upstream returned no text content")]
    EmptyContent,
}
