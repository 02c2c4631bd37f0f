use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::graphql_errors::assert_graphql_error;
use serde_json::{json, Value};

use crate::common::{get_query, gql_body, post_query};
use crate::support::factory::{individual, token_for};
use crate::support::{build_test_state, create_test_app};

const TYPENAME: &str = "{ __typename }";
// sha256("{ __typename }")
const TYPENAME_SHA256: &str = "7f56e67dd21ab3f30d1ff8b7bed08893f0a0db86449836189b361dd1e56ddb4b";

#[actix_web::test]
async fn schema_introspection_without_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let body = gql_body(
        "{ __schema { queryType { name } } __type(name: \"Customer\") { kind possibleTypes { name } } }",
        Value::Null,
    );
    let resp = test::call_service(&app, post_query(&body, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("errors").is_none(), "{body}");
    assert_eq!(body["data"]["__schema"]["queryType"]["name"], "Query");
    assert_eq!(body["data"]["__type"]["kind"], "INTERFACE");
    let mut implementors: Vec<&str> = body["data"]["__type"]["possibleTypes"]
        .as_array()
        .expect("possible types")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    implementors.sort_unstable();
    assert_eq!(
        implementors,
        vec!["BusinessCustomer", "IndividualCustomer", "PremiumCustomer"]
    );
    Ok(())
}

#[actix_web::test]
async fn get_transport_runs_queries() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Getter").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(&app, get_query(TYPENAME, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"data": {"__typename": "Query"}}));

    let resp = test::call_service(&app, get_query("{ customers { name } }", Some(&token))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"data": {"customers": [{"name": "Getter"}]}}));
    Ok(())
}

#[actix_web::test]
async fn get_transport_goes_through_the_gate() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let resp = test::call_service(&app, get_query("{ customers { id } }", None)).await;
    assert_graphql_error(
        resp,
        StatusCode::UNAUTHORIZED,
        "UNAUTHENTICATED",
        Some("Authorization token required"),
    )
    .await;

    // the allow-list is read from the parameter, not from the URL as a whole
    let req = test::TestRequest::get()
        .uri("/query?login=1&query=%7B%20customers%20%7B%20id%20%7D%20%7D")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/query").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[actix_web::test]
async fn persisted_query_is_registered_then_served_by_hash(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Hasher").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let extensions = json!({"persistedQuery": {"version": 1, "sha256Hash": TYPENAME_SHA256}});
    let hash_only = json!({ "extensions": extensions });

    // unknown hash: the schema asks for the full document
    let resp = test::call_service(&app, post_query(&hash_only, Some(&token))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["message"], "PersistedQueryNotFound");

    let full = json!({ "query": TYPENAME, "extensions": extensions });
    let resp = test::call_service(&app, post_query(&full, None)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"data": {"__typename": "Query"}}));

    let resp = test::call_service(&app, post_query(&hash_only, Some(&token))).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"data": {"__typename": "Query"}}));
    Ok(())
}

#[actix_web::test]
async fn hash_only_requests_need_a_token() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let hash_only = json!({"extensions": {"persistedQuery": {"version": 1, "sha256Hash": TYPENAME_SHA256}}});
    let resp = test::call_service(&app, post_query(&hash_only, None)).await;
    assert_graphql_error(resp, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", None).await;
    Ok(())
}

#[actix_web::test]
async fn playground_is_served_at_root() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");

    let html = String::from_utf8(test::read_body(resp).await.to_vec())?;
    assert!(html.contains("/query"));
    Ok(())
}
