use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::graphql_errors::first_error;
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

use crate::common::{gql_body, post_query};
use crate::support::factory::{business, individual, premium, token_for, PASSWORD};
use crate::support::{build_test_state, create_test_app};

const CREATE_INDIVIDUAL: &str = r#"
mutation Create($input: CreateIndividualCustomerInput!) {
  createIndividualCustomer(input: $input) {
    id
    name
    email
    status
    personalInfo { phone }
  }
}"#;

const LOGIN: &str = r#"
query Login($input: LoginInput!) {
  login(input: $input) {
    token
    customer { ... on IndividualCustomer { id email } }
  }
}"#;

const UPDATE: &str = r#"
mutation Update($id: ID!, $input: UpdateCustomerInput!) {
  updateCustomer(id: $id, input: $input) { id name email }
}"#;

async fn call(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    query: &str,
    variables: Value,
    token: Option<&str>,
) -> Value {
    let resp = test::call_service(app, post_query(&gql_body(query, variables), token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn register_login_update_delete() -> Result<(), Box<dyn std::error::Error>> {
    let app = create_test_app(build_test_state().await?).build().await;
    let email = unique_email("flow");

    let created = call(
        &app,
        CREATE_INDIVIDUAL,
        json!({"input": {
            "name": "John Doe",
            "email": email,
            "password": PASSWORD,
            "personalInfo": {"phone": "555-0100"}
        }}),
        None,
    )
    .await;
    let customer = &created["data"]["createIndividualCustomer"];
    assert_eq!(customer["name"], "John Doe");
    assert_eq!(customer["status"], "ACTIVE");
    assert_eq!(customer["personalInfo"], json!({"phone": "555-0100"}));
    let id = customer["id"].as_str().expect("id is a string").to_string();

    let logged_in = call(
        &app,
        LOGIN,
        json!({"input": {"email": email, "password": PASSWORD}}),
        None,
    )
    .await;
    let token = logged_in["data"]["login"]["token"]
        .as_str()
        .expect("token")
        .to_string();
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(logged_in["data"]["login"]["customer"]["id"], id);

    let updated = call(
        &app,
        UPDATE,
        json!({"id": id, "input": {"name": "Johnny Doe"}}),
        Some(&token),
    )
    .await;
    assert_eq!(
        updated["data"]["updateCustomer"],
        json!({"id": id, "name": "Johnny Doe", "email": email})
    );

    let deleted = call(
        &app,
        "mutation Delete($id: ID!) { deleteCustomer(id: $id) }",
        json!({"id": id}),
        Some(&token),
    )
    .await;
    assert_eq!(deleted, json!({"data": {"deleteCustomer": true}}));

    let gone = call(
        &app,
        "query Get($id: ID!) { customer(id: $id) { id } }",
        json!({"id": id}),
        Some(&token),
    )
    .await;
    assert_eq!(gone, json!({"data": {"customer": null}}));
    Ok(())
}

#[actix_web::test]
async fn duplicate_email_is_reported_without_storage_text() -> Result<(), Box<dyn std::error::Error>>
{
    let app = create_test_app(build_test_state().await?).build().await;
    let input = json!({"input": {"name": "Jane Doe", "email": unique_email("dup"), "password": PASSWORD}});

    let first = call(&app, CREATE_INDIVIDUAL, input.clone(), None).await;
    assert!(first.get("errors").is_none(), "{first}");

    let second = call(&app, CREATE_INDIVIDUAL, input, None).await;
    assert_eq!(
        first_error(&second),
        Some((
            "A record with the same information already exists",
            "DUPLICATE_ENTRY"
        ))
    );
    assert_eq!(second["data"]["createIndividualCustomer"], Value::Null);
    assert!(!second.to_string().to_lowercase().contains("unique"));
    Ok(())
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_alike() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let customer = individual(&state, "Locked Out").await;
    let app = create_test_app(state).build().await;

    let wrong = call(
        &app,
        LOGIN,
        json!({"input": {"email": customer.email, "password": "not-it"}}),
        None,
    )
    .await;
    let unknown = call(
        &app,
        LOGIN,
        json!({"input": {"email": "ghost@example.com", "password": PASSWORD}}),
        None,
    )
    .await;
    assert_eq!(wrong["errors"][0]["message"], unknown["errors"][0]["message"]);
    assert_eq!(first_error(&wrong).map(|(_, code)| code), Some("UNAUTHENTICATED"));
    Ok(())
}

#[actix_web::test]
async fn filtered_listings() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let viewer = individual(&state, "Ann Individual").await;
    business(&state, "Bob Business", "Acme Corp").await;
    premium(&state, "Gail Gold", "GOLD").await;
    premium(&state, "Pete Platinum", "PLATINUM").await;
    let token = token_for(&state, &viewer);
    let app = create_test_app(state).build().await;

    let by_type = call(
        &app,
        "{ customersByType(type: PREMIUM) { name } }",
        Value::Null,
        Some(&token),
    )
    .await;
    assert_eq!(
        by_type["data"]["customersByType"],
        json!([{"name": "Gail Gold"}, {"name": "Pete Platinum"}])
    );

    let by_tier = call(
        &app,
        "{ premiumCustomersByTier(tier: \"GOLD\") { ... on PremiumCustomer { name benefits } } }",
        Value::Null,
        Some(&token),
    )
    .await;
    let gold = &by_tier["data"]["premiumCustomersByTier"];
    assert_eq!(gold.as_array().map(Vec::len), Some(1));
    assert_eq!(gold[0]["name"], "Gail Gold");
    assert_eq!(gold[0]["benefits"].as_array().map(Vec::len), Some(3));

    let by_status = call(
        &app,
        "{ customersByStatus(status: ACTIVE, page: 2) { name } }",
        Value::Null,
        Some(&token),
    )
    .await;
    assert_eq!(
        by_status["data"]["customersByStatus"],
        json!([{"name": "Ann Individual"}, {"name": "Bob Business"}])
    );

    let search = call(
        &app,
        "{ searchCustomers(query: \"Bob\") { name } }",
        Value::Null,
        Some(&token),
    )
    .await;
    assert_eq!(
        search["data"]["searchCustomers"],
        json!([{"name": "Bob Business"}])
    );
    Ok(())
}

#[actix_web::test]
async fn pagination_windows_the_listing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let viewer = individual(&state, "Customer 0").await;
    for i in 1..4 {
        individual(&state, &format!("Customer {i}")).await;
    }
    let token = token_for(&state, &viewer);
    let app = create_test_app(state).build().await;

    let page = call(
        &app,
        "{ customers(page: 2, offset: 1) { name } }",
        Value::Null,
        Some(&token),
    )
    .await;
    assert_eq!(
        page["data"]["customers"],
        json!([{"name": "Customer 1"}, {"name": "Customer 2"}])
    );
    Ok(())
}
