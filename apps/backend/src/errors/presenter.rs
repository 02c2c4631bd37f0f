//! Maps a [`ServiceError`] onto the client-facing GraphQL error.

use async_graphql::{Error, ErrorExtensions, Value};
use tracing::{error, warn};

use super::service::ServiceError;
use super::storage::{StorageError, StorageErrorKind};
use crate::auth::AuthError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const DUPLICATE_ENTRY: &str = "DUPLICATE_ENTRY";
pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// An error carrying `code` under `extensions`.
pub fn coded(message: impl Into<String>, code: &str) -> Error {
    let code = code.to_string();
    Error::new(message).extend_with(|_, e| e.set("code", code))
}

pub fn present(err: &ServiceError) -> Error {
    match err {
        ServiceError::Validation(errors) => {
            let list = serde_json::to_value(errors.errors())
                .ok()
                .and_then(|json| Value::from_json(json).ok())
                .unwrap_or(Value::List(Vec::new()));
            coded("Validation failed", VALIDATION_ERROR)
                .extend_with(|_, e| e.set("validationErrors", list))
        }
        ServiceError::Auth(auth) => present_auth(auth),
        ServiceError::Storage(storage) => present_storage(storage),
        ServiceError::Internal { message, code } => {
            coded(message.clone(), code.unwrap_or(INTERNAL_ERROR))
        }
    }
}

/// Lets resolvers write `.extend()` on service results.
impl ErrorExtensions for ServiceError {
    fn extend(&self) -> Error {
        present(self)
    }
}

fn present_auth(err: &AuthError) -> Error {
    match err {
        AuthError::Unauthenticated { .. } | AuthError::InvalidCredentials => {
            coded(err.to_string(), UNAUTHENTICATED)
        }
        AuthError::Signing { detail } => {
            error!(trace_id = %trace_ctx::trace_id(), detail = %detail, "token signing failed");
            coded("Internal server error", INTERNAL_ERROR)
        }
    }
}

// Raw storage text is logged, never returned.
fn present_storage(err: &StorageError) -> Error {
    let trace_id = trace_ctx::trace_id();
    match err.kind() {
        StorageErrorKind::NotFound => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(err.description()), "record not found");
            coded("The requested resource was not found", NOT_FOUND)
        }
        StorageErrorKind::Duplicate => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(err.description()), "duplicate entry");
            coded(
                "A record with the same information already exists",
                DUPLICATE_ENTRY,
            )
        }
        StorageErrorKind::Other => {
            error!(trace_id = %trace_id, raw_error = %Redacted(err.description()), "database error");
            coded("A database error occurred", DATABASE_ERROR)
        }
    }
}
