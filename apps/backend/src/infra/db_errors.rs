//! SeaORM -> StorageError translation.
//!
//! The descriptions produced here carry the markers the error presenter
//! keys on (`record not found`, `duplicate`). Raw driver text is logged
//! redacted and never placed in the description.

use sea_orm::DbErr;
use tracing::{debug, error, warn};

use crate::errors::StorageError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` from SQLite's "UNIQUE constraint failed: table.column".
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

/// Constraint name from Postgres' `... unique constraint "name"`.
fn extract_postgres_constraint(error_msg: &str) -> Option<&str> {
    let marker = "constraint \"";
    let start = error_msg.find(marker)? + marker.len();
    let rest = &error_msg[start..];
    rest.find('"').map(|end| &rest[..end])
}

pub fn map_db_err(e: DbErr) -> StorageError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(what) => {
            debug!(trace_id = %trace_id, what = %what, "Record not found");
            return StorageError::not_found(what);
        }
        DbErr::RecordNotUpdated => {
            debug!(trace_id = %trace_id, "Record not updated");
            return StorageError::not_found("record not updated");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return StorageError::new("database error: database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        let target = extract_sqlite_table_column(&error_msg)
            .or_else(|| extract_postgres_constraint(&error_msg))
            .unwrap_or("unknown");
        return StorageError::new(format!("duplicate entry: {target}"));
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    StorageError::new("database error: operation failed")
}

impl From<DbErr> for StorageError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
