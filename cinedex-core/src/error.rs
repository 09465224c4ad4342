use thiserror::Error;

use crate::providers::ProviderError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Field-level validation failure. The message is user-facing.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness constraint would be violated. The message is user-facing.
    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Metadata provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
