use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::graphql_errors::{error_codes, first_error};
use serde_json::{json, Value};

use crate::common::{gql_body, post_query};
use crate::support::factory::{individual, token_for};
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn validation_envelope_lists_every_violation() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let body = gql_body(
        "mutation { createIndividualCustomer(input: {name: \"J\", email: \"not-an-email\", password: \"pw\"}) { id } }",
        Value::Null,
    );
    let resp = test::call_service(&app, post_query(&body, None)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(first_error(&body), Some(("Validation failed", "VALIDATION_ERROR")));
    assert_eq!(body["errors"][0]["path"], json!(["createIndividualCustomer"]));
    assert_eq!(
        body["errors"][0]["extensions"]["validationErrors"],
        json!([
            {"field": "name", "message": "Name must be at least 2 characters long", "code": "MIN_LENGTH"},
            {"field": "email", "message": "Invalid email format", "code": "INVALID_FORMAT"}
        ])
    );
    // the field is non-null, so the error nulls the whole response
    assert_eq!(body["data"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn business_registration_needs_company_name() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;

    let body = gql_body(
        "mutation { createBusinessCustomer(input: {name: \"Acme Owner\", email: \"owner@acme.com\", password: \"pw\", companyName: \"  \"}) { id } }",
        Value::Null,
    );
    let resp = test::call_service(&app, post_query(&body, None)).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["errors"][0]["extensions"]["validationErrors"],
        json!([{"field": "companyName", "message": "Company name is required", "code": "REQUIRED_FIELD"}])
    );
    Ok(())
}

#[actix_web::test]
async fn parse_failure_answers_ok_with_null_data() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Parser Victim").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(
        &app,
        post_query(&gql_body("{ customers { id ", Value::Null), Some(&token)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], Value::Null);
    assert_eq!(error_codes(&body), vec!["GRAPHQL_PARSE_FAILED"]);
    Ok(())
}

#[actix_web::test]
async fn missing_customer_is_not_found_with_path() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Finder").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let body = gql_body(
        "{ lookup: getCustomerWithErrorHandling(id: \"999999\") { id } customer(id: \"999999\") { id } }",
        Value::Null,
    );
    let resp = test::call_service(&app, post_query(&body, Some(&token))).await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["data"], json!({"lookup": null, "customer": null}));
    assert_eq!(error_codes(&body), vec!["NOT_FOUND"]);
    assert_eq!(body["errors"][0]["path"], json!(["lookup"]));
    assert_eq!(
        body["errors"][0]["message"],
        "The requested resource was not found"
    );
    Ok(())
}

#[actix_web::test]
async fn bad_pagination_and_ids_are_validation_errors() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Pager").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let body = gql_body(
        "{ customers(page: 101, offset: -1) { id } }",
        Value::Null,
    );
    let resp = test::call_service(&app, post_query(&body, Some(&token))).await;
    let body: Value = test::read_body_json(resp).await;
    let codes: Vec<&str> = body["errors"][0]["extensions"]["validationErrors"]
        .as_array()
        .expect("validation errors")
        .iter()
        .filter_map(|e| e["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["MAX_VALUE_EXCEEDED", "INVALID_VALUE"]);

    let body = gql_body(
        "mutation { updateCustomer(id: \"abc\", input: {}) { id } }",
        Value::Null,
    );
    let resp = test::call_service(&app, post_query(&body, Some(&token))).await;
    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["errors"][0]["extensions"]["validationErrors"]
        .as_array()
        .expect("validation errors")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["id", "input"]);
    Ok(())
}

#[actix_web::test]
async fn unknown_root_field_fails_validation() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Explorer").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(
        &app,
        post_query(&gql_body("{ orders { id } }", Value::Null), Some(&token)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let (message, code) = first_error(&body).expect("validation error");
    assert_eq!(code, "GRAPHQL_VALIDATION_FAILED");
    assert!(message.contains("\"orders\""), "{message}");
    assert_eq!(body["data"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn unknown_nested_fields_are_rejected_not_nulled() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let customer = individual(&state, "Selector").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    // premiumTier only exists on PremiumCustomer, not on the interface
    let resp = test::call_service(
        &app,
        post_query(
            &gql_body("{ customers { id bogusField premiumTier } }", Value::Null),
            Some(&token),
        ),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(body["data"], Value::Null);
    let codes = error_codes(&body);
    assert!(codes.len() >= 2, "{body}");
    assert!(codes.iter().all(|c| c == "GRAPHQL_VALIDATION_FAILED"));
    let messages = body["errors"].to_string();
    assert!(messages.contains("bogusField"));
    assert!(messages.contains("premiumTier"));
    Ok(())
}

#[actix_web::test]
async fn wrong_argument_types_fail_validation() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Typist").await;
    let token = token_for(&state, &customer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(
        &app,
        post_query(
            &gql_body("{ customersByType(type: GOLDEN) { id } }", Value::Null),
            Some(&token),
        ),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(error_codes(&body), vec!["GRAPHQL_VALIDATION_FAILED"]);
    Ok(())
}
