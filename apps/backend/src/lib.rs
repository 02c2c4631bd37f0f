#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod graphql;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod validation;

// Re-exports for public API
pub use auth::{Claims, Identity, TokenCodec};
pub use config::db::{db_url, DbKind};
pub use error::AppError;
pub use errors::ServiceError;
pub use extractors::request_context::RequestContext;
pub use graphql::classify::{ClassifierMode, GatePolicy};
pub use infra::db::bootstrap_db;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::graphql_auth::GraphqlAuth;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
