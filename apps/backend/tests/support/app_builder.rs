use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use crm_backend::middleware::request_trace::RequestTrace;
use crm_backend::middleware::structured_logger::StructuredLogger;
use crm_backend::middleware::trace_span::TraceSpan;
use crm_backend::routes;
use crm_backend::state::app_state::AppState;

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for test Actix services wired like `main.rs` (minus CORS).
pub struct TestAppBuilder {
    state: AppState,
    route_config: RouteConfigFn,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            route_config: Box::new(routes::configure),
        }
    }

    /// Replace the production routes with custom ones.
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Box::new(config_fn);
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
        let data = web::Data::new(self.state);
        let route_config = self.route_config;

        test::init_service(
            App::new()
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| route_config(cfg)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
