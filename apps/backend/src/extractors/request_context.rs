use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::{AuthError, Identity, TokenRejection};
use crate::errors::ServiceError;
use crate::middleware::request_trace::TraceId;

/// Per-request context handed to GraphQL resolvers.
///
/// `GraphqlAuth` inserts one carrying the verified [`Identity`] for
/// protected operations. Public operations get none, and the extractor
/// falls back to an anonymous context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<Identity>,
    trace_id: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// The caller's identity, or `Unauthenticated` when the request carried none.
    pub fn require_identity(&self) -> Result<&Identity, ServiceError> {
        self.identity
            .as_ref()
            .ok_or_else(|| AuthError::unauthenticated(TokenRejection::Missing).into())
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let extensions = req.extensions();
        let mut ctx = extensions.get::<RequestContext>().cloned().unwrap_or_default();
        if ctx.trace_id.is_none() {
            ctx.trace_id = extensions.get::<TraceId>().map(|t| t.0.clone());
        }
        ready(Ok(ctx))
    }
}
