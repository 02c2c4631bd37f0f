use std::time::{Duration, SystemTime};

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::graphql_errors::assert_graphql_error;
use crm_backend::auth::{TokenCodec, TOKEN_TTL};
use crm_backend::state::security_config::SecurityConfig;
use serde_json::{json, Value};

use crate::common::{gql_body, post_query, post_raw};
use crate::support::factory::{individual, token_for};
use crate::support::{build_test_state, create_test_app};

const CUSTOMERS: &str = "{ customers { id name } }";

#[actix_web::test]
async fn malformed_authorization_headers_are_missing_tokens(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Header Tester").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let body = serde_json::to_vec(&gql_body(CUSTOMERS, Value::Null))?;
    let headers = [
        None,
        Some(format!("Basic {token}")),
        Some("Bearer".to_string()),
        Some(format!("bearer {token}")),
        Some(format!("Bearer {token} extra")),
        Some(format!("Bearer  {token}")),
        Some(format!("Bearer\t{token}")),
        Some(token.clone()),
    ];
    for header in headers {
        let resp = test::call_service(&app, post_raw(body.clone(), header.as_deref())).await;
        assert_graphql_error(
            resp,
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            Some("Authorization token required"),
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn expired_and_forged_tokens_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Token Tester").await;
    let expired = state.tokens.issue_at(
        customer.id,
        &customer.email,
        SystemTime::now() - TOKEN_TTL - Duration::from_secs(5),
    )?;
    let forged = TokenCodec::new(&SecurityConfig::new(b"another-secret".to_vec()))?
        .issue(customer.id, &customer.email)?;
    let app = create_test_app(state).build().await;

    for token in [expired.as_str(), forged.as_str(), "not.a.jwt"] {
        let resp =
            test::call_service(&app, post_query(&gql_body(CUSTOMERS, Value::Null), Some(token)))
                .await;
        assert_graphql_error(
            resp,
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            Some("Invalid or expired token"),
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn valid_token_reaches_the_resolver() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Valid Holder").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let resp =
        test::call_service(&app, post_query(&gql_body(CUSTOMERS, Value::Null), Some(&token))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"data": {"customers": [{"id": customer.id.to_string(), "name": "Valid Holder"}]}})
    );
    Ok(())
}
