//! Connection pool bootstrap and table creation.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::entities::Customers;
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_BACKOFF: Duration = Duration::from_millis(500);

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);
    if kind == DbKind::SqliteMemory {
        // every connection to sqlite::memory: is its own database
        opt.min_connections(1).max_connections(1);
    }
    opt
}

/// Open a pool for `kind`. Postgres connects are retried a few times so the
/// service can start alongside its database.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let opt = connect_options(kind, url);

    let mut attempt = 1;
    loop {
        match Database::connect(opt.clone()).await {
            Ok(conn) => return Ok(conn),
            Err(e) if kind == DbKind::Postgres && attempt < CONNECT_ATTEMPTS => {
                warn!(attempt, error = %e, "db=connect retry");
                tokio::time::sleep(CONNECT_BACKOFF).await;
                attempt += 1;
            }
            Err(e) => return Err(AppError::db(format!("failed to connect to database: {e}"))),
        }
    }
}

/// Create the `customers` table when it does not exist yet.
pub async fn ensure_schema<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    let mut create = schema.create_table_from_entity(Customers);
    create.if_not_exists();
    conn.execute(backend.build(&create)).await?;
    Ok(())
}

/// Connect and make sure the schema is in place.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    info!(db_kind = ?kind, "bootstrap=start");
    let conn = connect_db(kind).await?;
    ensure_schema(&conn).await?;
    info!(db_kind = ?kind, "bootstrap=ready");
    Ok(conn)
}
