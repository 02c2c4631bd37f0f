//! Per-request tracing span.
//!
//! Every event emitted while a request is handled inherits the span's
//! `trace_id`, `method` and `path`. Two fields start empty and are filled
//! in by the GraphQL gate: `classification` (`public`/`protected`) and
//! `customer_id` once a token verifies. Expects
//! [`RequestTrace`](super::request_trace::RequestTrace) to be wrapped
//! outside it.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument, Span};

use super::request_trace::TraceId;

#[derive(Clone, Default)]
pub struct TraceSpan;

/// The span for one request; gate fields are recorded later.
pub fn request_span(req: &ServiceRequest) -> Span {
    let extensions = req.extensions();
    let trace_id = extensions
        .get::<TraceId>()
        .map_or("missing-trace-id", |t| t.0.as_str());
    info_span!(
        "request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.path(),
        classification = Empty,
        customer_id = Empty,
    )
}

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = request_span(&req);
        let fut = span.in_scope(|| self.service.call(req));
        Box::pin(fut.instrument(span))
    }
}
