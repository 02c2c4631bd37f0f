use actix_web::{web, App, HttpServer};
use crm_backend::config::classifier_mode_from_env;
use crm_backend::config::db::DbKind;
use crm_backend::config::server::ServerConfig;
use crm_backend::infra::state::build_state;
use crm_backend::middleware::cors::cors_middleware;
use crm_backend::middleware::request_trace::RequestTrace;
use crm_backend::middleware::structured_logger::StructuredLogger;
use crm_backend::middleware::trace_span::TraceSpan;
use crm_backend::routes;
use crm_backend::state::security_config::SecurityConfig;
use crm_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };
    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid security configuration");
            std::process::exit(1);
        }
    };
    let classifier = match classifier_mode_from_env() {
        Ok(mode) => mode,
        Err(e) => {
            error!(error = %e, "invalid GraphQL gate configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(DbKind::Postgres)
        .with_security(security_config)
        .with_classifier(classifier)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, classifier = %classifier, "starting crm backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
