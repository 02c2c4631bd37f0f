use std::env;

use super::must_var;
use crate::error::AppError;

/// Which database the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// Postgres, located through `DATABASE_URL` or `POSTGRES_*`
    Postgres,
    /// Private in-memory SQLite, used by tests
    SqliteMemory,
}

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Connection URL for `kind`.
///
/// For Postgres a non-empty `DATABASE_URL` wins; otherwise the URL is built
/// from `POSTGRES_HOST` (default `localhost`), `POSTGRES_PORT` (default
/// `5432`) and the required `POSTGRES_DB`, `POSTGRES_USER` and
/// `POSTGRES_PASSWORD`.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::SqliteMemory => Ok(SQLITE_MEMORY_URL.to_string()),
        DbKind::Postgres => {
            if let Some(url) = env::var("DATABASE_URL").ok().filter(|u| !u.trim().is_empty()) {
                return Ok(url);
            }
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = must_var("POSTGRES_DB")?;
            let username = must_var("POSTGRES_USER")?;
            let password = must_var("POSTGRES_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}
