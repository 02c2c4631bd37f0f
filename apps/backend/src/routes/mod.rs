use actix_web::web;

pub mod graphql;
pub mod health;

/// Register every route. `main.rs` and the integration tests share this,
/// adding the app-wide middleware around it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // GraphQL endpoint behind the auth gate: /query
    cfg.configure(graphql::configure_routes);
}
