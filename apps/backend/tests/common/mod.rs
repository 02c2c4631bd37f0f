#![allow(dead_code)]

// tests/common/mod.rs
use actix_http::Request;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use serde_json::{json, Value};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// `{"query": ..., "variables": ...}` body.
pub fn gql_body(query: &str, variables: Value) -> Value {
    json!({ "query": query, "variables": variables })
}

/// POST /query with an optional bearer token.
pub fn post_query(body: &Value, token: Option<&str>) -> Request {
    let mut req = test::TestRequest::post().uri("/query").set_json(body);
    if let Some(token) = token {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    req.to_request()
}

/// GET /query with the operation in the `query` parameter.
pub fn get_query(query: &str, token: Option<&str>) -> Request {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    let mut req = test::TestRequest::get().uri(&format!("/query?query={encoded}"));
    if let Some(token) = token {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    req.to_request()
}

/// POST /query with a raw body and arbitrary Authorization header value.
pub fn post_raw(body: impl Into<actix_web::web::Bytes>, authorization: Option<&str>) -> Request {
    let mut req = test::TestRequest::post()
        .uri("/query")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.into());
    if let Some(value) = authorization {
        req = req.insert_header((AUTHORIZATION, value.to_string()));
    }
    req.to_request()
}
