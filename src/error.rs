use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors surfaced at the engine boundary
///
/// Scoring itself is total; these only come from malformed host input and
/// from the orchestration service.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Match service unavailable: {0}")]
    ServiceUnavailable(String),
}
