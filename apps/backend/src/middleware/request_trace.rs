use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::trace_ctx;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Trace id stored in request extensions by [`RequestTrace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

/// Assigns every request a UUID trace id.
///
/// The id is placed in request extensions (for `TraceSpan` and
/// `StructuredLogger`), opened as the task-local [`trace_ctx`] scope for the
/// downstream future, and echoed back in the `x-request-id` header. Wrap it
/// outermost so the other middleware see the id.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = trace_ctx::new_trace_id();
        req.extensions_mut().insert(TraceId(trace_id.clone()));

        let fut = self.service.call(req);

        Box::pin(trace_ctx::scope(trace_id.clone(), async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&trace_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        }))
    }
}
