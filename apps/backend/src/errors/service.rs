use thiserror::Error;

use super::storage::StorageError;
use crate::auth::AuthError;
use crate::validation::{ValidationError, ValidationErrors};

/// Every failure a service or resolver can raise.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("{message}")]
    Internal {
        message: String,
        code: Option<&'static str>,
    },
}

impl ServiceError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            code: None,
        }
    }

    /// An error whose message is shown to clients as-is under `code`.
    pub fn with_code(message: impl Into<String>, code: &'static str) -> Self {
        Self::Internal {
            message: message.into(),
            code: Some(code),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(ValidationErrors::from(error))
    }
}
