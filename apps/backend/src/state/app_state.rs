use std::fmt;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::auth::TokenCodec;
use crate::error::AppError;
use crate::errors::ServiceError;
use crate::graphql::classify::GatePolicy;
use crate::graphql::schema::{build_schema, CustomerSchema};

/// Shared, read-only resources handed to every request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent in gate-only test setups)
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub tokens: TokenCodec,
    pub gate: GatePolicy,
    pub schema: CustomerSchema,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("tokens", &self.tokens)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        security: SecurityConfig,
        gate: GatePolicy,
    ) -> Result<Self, AppError> {
        let tokens = TokenCodec::new(&security)?;
        Ok(Self {
            db,
            security,
            tokens,
            gate,
            schema: build_schema(),
        })
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// The connection, or an internal error when the state was built without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, ServiceError> {
        self.db
            .as_ref()
            .ok_or_else(|| ServiceError::internal("Database unavailable"))
    }
}
