use models::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body is not well-formed JSON; carries the parser message.
    #[error("invalid request body format: \"{0}\"")]
    MalformedInput(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("asset not found: {id}")]
    NotFound { id: String },
    /// Backend failure. Never classified further by the manager.
    #[error("store error: {0}")]
    Store(String),
}

impl ServiceError {
    pub fn not_found(id: impl Into<String>) -> Self { Self::NotFound { id: id.into() } }

    pub fn store(err: impl std::fmt::Display) -> Self { Self::Store(err.to_string()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::MalformedInput(_) => 1001,
            ServiceError::Validation(_) => 1002,
            ServiceError::NotFound { .. } => 1003,
            ServiceError::Store(_) => 1200,
        }
    }
}
