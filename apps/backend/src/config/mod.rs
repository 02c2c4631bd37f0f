//! Environment-driven configuration, read once at startup.

pub mod db;
pub mod graphql;
pub mod server;

pub use db::{db_url, DbKind};
pub use graphql::classifier_mode_from_env;
pub use server::ServerConfig;

use std::env;

use crate::error::AppError;

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
