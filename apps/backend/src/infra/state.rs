use tracing::info;

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::graphql::classify::{ClassifierMode, GatePolicy};
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_kind: Option<DbKind>,
    gate: GatePolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_kind: None,
            gate: GatePolicy::default(),
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_classifier(mut self, mode: ClassifierMode) -> Self {
        self.gate = GatePolicy::new(mode);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let db = match self.db_kind {
            Some(kind) => Some(bootstrap_db(kind).await?),
            None => None,
        };
        info!(classifier = %self.gate.mode, has_db = db.is_some(), "state=built");
        AppState::new(db, self.security_config, self.gate)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
