use common::CoreError;
use models::errors::ModelError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("no bearer token in session")]
    MissingToken,
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    /// Stable numeric code for logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => 1001,
            ServiceError::MissingToken => 1004,
            ServiceError::Core(CoreError::Network(_)) => 1100,
            ServiceError::Core(CoreError::Status { .. }) => 1101,
            ServiceError::Core(CoreError::Decode(_)) => 1102,
            ServiceError::Core(CoreError::Token(_)) => 1103,
            ServiceError::Storage(_) => 1200,
        }
    }
}

/// Log a failed workflow and substitute its fallback value.
pub(crate) fn or_fallback<T>(
    operation: &'static str,
    res: Result<T, ServiceError>,
    fallback: impl FnOnce() -> T,
) -> T {
    match res {
        Ok(v) => v,
        Err(e) => {
            error!(operation, code = e.code(), error = %e, "operation failed");
            fallback()
        }
    }
}
