//! Per-request trace id, carried in Tokio task-local storage.
//!
//! `RequestTrace` opens the scope; anything awaited inside the request
//! (services, storage error mapping, the error presenter) can read it
//! without threading it through signatures.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// A fresh trace id for an incoming request.
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// The current request's trace id, or `"unknown"` outside any request.
pub fn trace_id() -> String {
    current().unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn current() -> Option<String> {
    TRACE_ID.try_with(Clone::clone).ok()
}

/// Run `future` with `trace_id` visible to [`trace_id`].
pub async fn scope<F>(trace_id: String, future: F) -> F::Output
where
    F: Future,
{
    TRACE_ID.scope(trace_id, future).await
}
