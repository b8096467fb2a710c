//! Error taxonomy for the recommendation core.
//!
//! Data-access failures are propagated verbatim (`#[error(transparent)]`),
//! never wrapped or swallowed; the core retries nothing itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// Caller violated a precondition (empty token sequence, rating outside
    /// the 1–5 domain, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced user or doctor does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Failure reported by the data-access collaborator, surfaced as-is.
    #[error(transparent)]
    DataAccess(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
