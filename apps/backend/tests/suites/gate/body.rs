use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use backend_test_support::graphql_errors::assert_graphql_error;
use crm_backend::extractors::request_context::RequestContext;
use crm_backend::graphql::classify::MAX_BODY_BYTES;
use crm_backend::middleware::GraphqlAuth;
use serde_json::{json, Value};

use crate::common::{gql_body, post_raw};
use crate::support::factory::{individual, token_for};
use crate::support::{build_test_state, create_test_app};

/// Echoes the body the handler received plus the injected identity.
async fn echo(ctx: RequestContext, body: web::Bytes) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "body": String::from_utf8_lossy(&body),
        "customerId": ctx.identity().map(|identity| identity.customer_id),
        "email": ctx.identity().map(|identity| identity.email.clone()),
    }))
}

fn echo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/query")
            .wrap(GraphqlAuth)
            .route(web::post().to(echo)),
    );
}

#[actix_web::test]
async fn public_body_reaches_handler_byte_identical() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?)
        .with_routes(echo_routes)
        .build()
        .await;

    // odd spacing and key order must survive the gate untouched
    let raw = "{\"variables\":{},  \"query\":\"query {\\n  login(input: {email: \\\"a@b.co\\\", password: \\\"x\\\"}) { token }\\n}\"}";
    let resp = test::call_service(&app, post_raw(raw.as_bytes().to_vec(), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["body"], raw);
    assert_eq!(body["customerId"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn protected_body_is_restored_and_identity_injected(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Whoami").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state)
        .with_routes(echo_routes)
        .build()
        .await;

    let raw = serde_json::to_string(&gql_body("{ customers { id } }", Value::Null))?;
    let header = format!("Bearer {token}");
    let resp = test::call_service(&app, post_raw(raw.clone(), Some(&header))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["body"], raw);
    assert_eq!(body["customerId"], customer.id);
    assert_eq!(body["email"], customer.email);
    Ok(())
}

#[actix_web::test]
async fn oversized_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let padding = "x".repeat(MAX_BODY_BYTES + 1);
    let raw = format!("{{\"query\":\"{{ login }}\",\"pad\":\"{padding}\"}}");
    let resp = test::call_service(&app, post_raw(raw, None)).await;
    assert_graphql_error(
        resp,
        StatusCode::PAYLOAD_TOO_LARGE,
        "PAYLOAD_TOO_LARGE",
        None,
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn invalid_json_is_protected_then_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Json Sender").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, post_raw("{not json", None)).await;
    assert_graphql_error(resp, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", None).await;

    let header = format!("Bearer {token}");
    let resp = test::call_service(&app, post_raw("{not json", Some(&header))).await;
    assert_graphql_error(
        resp,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        Some("Invalid GraphQL request body"),
    )
    .await;
    Ok(())
}
