use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::extractors::request_context::RequestContext;
use crate::graphql::classify::Classification;

/// Emits one `request_completed` event per request; level follows the
/// status class (5xx error, 4xx warn, otherwise info).
///
/// Runs inside the request span, so `trace_id` comes with it. The event
/// adds what the gate decided: `classification` (`none` off the GraphQL
/// route) and whether the caller ended up authenticated.
pub struct StructuredLogger;

/// What the logger reports for one finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub method: String,
    pub path: String,
    pub status: StatusCode,
    pub classification: &'static str,
    pub authenticated: bool,
    pub duration_us: u64,
}

impl Completion {
    fn emit(&self) {
        let status = self.status.as_u16();
        if self.status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = status, classification = self.classification, authenticated = self.authenticated, duration_us = self.duration_us, message = "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = status, classification = self.classification, authenticated = self.authenticated, duration_us = self.duration_us, message = "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = status, classification = self.classification, authenticated = self.authenticated, duration_us = self.duration_us, message = "request_completed");
        }
    }
}

/// Gate outcome as left in the request extensions.
pub fn gate_outcome(req: &actix_web::HttpRequest) -> (&'static str, bool) {
    let extensions = req.extensions();
    let classification = extensions
        .get::<Classification>()
        .map_or("none", |c| c.as_str());
    let authenticated = extensions
        .get::<RequestContext>()
        .is_some_and(|ctx| ctx.identity().is_some());
    (classification, authenticated)
}

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, (classification, authenticated)) = match &result {
                Ok(res) => (res.status(), gate_outcome(res.request())),
                Err(err) => (err.as_response_error().status_code(), ("none", false)),
            };
            Completion {
                method,
                path,
                status,
                classification,
                authenticated,
                duration_us: start.elapsed().as_micros() as u64,
            }
            .emit();

            result
        })
    }
}
