//! Authorization gate for the GraphQL endpoint.
//!
//! Buffers the request body (or, for GET, reads the `query` parameter),
//! classifies the operation with the configured
//! [`GatePolicy`](crate::graphql::classify::GatePolicy), and for protected
//! operations demands a valid bearer token before the handler runs. The
//! verified identity travels downstream as a [`RequestContext`] in the
//! request extensions; the body is put back byte-for-byte. The decision is
//! recorded on the request span as `classification`.
//!
//! Neither the token nor the body is ever logged.

use std::rc::Rc;

use actix_http::h1;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::CONTENT_LENGTH;
use actix_web::http::Method;
use actix_web::{web, HttpMessage, ResponseError};
use bytes::{Bytes, BytesMut};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::{debug, error, warn, Span};

use crate::auth::AuthError;
use crate::error::AppError;
use crate::extractors::auth_token::bearer_token;
use crate::extractors::request_context::RequestContext;
use crate::graphql::classify::{Classification, GatePolicy, MAX_BODY_BYTES};
use crate::state::app_state::AppState;
use crate::trace_ctx;

pub struct GraphqlAuth;

impl<S, B> Transform<S, ServiceRequest> for GraphqlAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = GraphqlAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GraphqlAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct GraphqlAuthMiddleware<S> {
    service: Rc<S>,
}

/// Drain the payload, refusing anything over `limit` bytes.
async fn read_body(req: &mut ServiceRequest, limit: usize) -> Result<Bytes, AppError> {
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        return Err(AppError::payload_too_large(limit));
    }

    let mut payload = req.take_payload();
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|_| AppError::bad_request("Failed to read request body"))?;
        if body.len() + chunk.len() > limit {
            return Err(AppError::payload_too_large(limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

/// Hand the buffered body back to the request for the handler.
fn restore_body(req: &mut ServiceRequest, body: Bytes) {
    let (_sender, mut payload) = h1::Payload::create(true);
    payload.unread_data(body);
    req.set_payload(payload.into());
}

#[derive(Deserialize)]
struct QueryParams {
    query: String,
}

/// A GET carries its operation in the query string; without a `query`
/// parameter there is nothing to allow-list.
fn classify_get(gate: &GatePolicy, query_string: &str) -> Classification {
    match web::Query::<QueryParams>::from_query(query_string) {
        Ok(params) => gate.classify_query(&params.query),
        Err(e) => {
            debug!(error = %e, "gate: GET request without a query parameter");
            Classification::Protected
        }
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(err.error_response()).map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for GraphqlAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                error!("graphql_auth: AppState missing from app data");
                return Ok(reject(req, AppError::internal("application state missing")));
            };

            let body = match read_body(&mut req, MAX_BODY_BYTES).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(trace_id = %trace_ctx::trace_id(), error = %e, "graphql_auth: body rejected");
                    return Ok(reject(req, e));
                }
            };

            let classification = if req.method() == Method::GET {
                classify_get(&state.gate, req.query_string())
            } else {
                state.gate.classify(&body)
            };
            restore_body(&mut req, body);
            Span::current().record("classification", classification.as_str());
            req.extensions_mut().insert(classification);

            if classification == Classification::Public {
                debug!(classification = classification.as_str(), mode = %state.gate.mode, "graphql_auth: forwarding");
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let Some(token) = bearer_token(req.headers()).map(str::to_owned) else {
                warn!(
                    trace_id = %trace_ctx::trace_id(),
                    classification = classification.as_str(),
                    reason = "token_missing",
                    "graphql_auth: rejected"
                );
                return Ok(reject(req, AppError::missing_token()));
            };

            match state.tokens.verify(&token) {
                Ok(claims) => {
                    Span::current().record("customer_id", claims.customer_id);
                    debug!(customer_id = claims.customer_id, "graphql_auth: authenticated");
                    req.extensions_mut().insert(
                        RequestContext::authenticated(claims.into())
                            .with_trace_id(trace_ctx::trace_id()),
                    );
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(e) => {
                    let reason = match &e {
                        AuthError::Unauthenticated { reason } => reason.as_str(),
                        _ => "invalid_token",
                    };
                    warn!(
                        trace_id = %trace_ctx::trace_id(),
                        classification = classification.as_str(),
                        reason,
                        "graphql_auth: rejected"
                    );
                    Ok(reject(req, AppError::invalid_token()))
                }
            }
        })
    }
}
