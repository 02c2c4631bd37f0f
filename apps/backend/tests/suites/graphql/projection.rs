use actix_web::test;
use serde_json::{json, Value};

use crate::common::{gql_body, post_query};
use crate::support::factory::{business, individual, premium, token_for};
use crate::support::{build_test_state, create_test_app};

const POLYMORPHIC: &str = r#"
query Everyone($withBenefits: Boolean!, $skipEmail: Boolean!) {
  customers {
    kind: __typename
    name
    email @skip(if: $skipEmail)
    ... on IndividualCustomer { personalInfo { phone } }
    ... on BusinessCustomer { companyName }
    ...PremiumFields
  }
}

fragment PremiumFields on PremiumCustomer {
  tier: premiumTier
  benefits @include(if: $withBenefits)
}
"#;

#[actix_web::test]
async fn fragments_aliases_and_directives_shape_the_response(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let viewer = individual(&state, "Ann Individual").await;
    business(&state, "Bob Business", "Acme Corp").await;
    premium(&state, "Sam Silver", "silver").await;
    let token = token_for(&state, &viewer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(
        &app,
        post_query(
            &gql_body(
                POLYMORPHIC,
                json!({"withBenefits": true, "skipEmail": true}),
            ),
            Some(&token),
        ),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;

    assert_eq!(
        body,
        json!({"data": {"customers": [
            {"kind": "IndividualCustomer", "name": "Ann Individual", "personalInfo": {"phone": "555-0100"}},
            {"kind": "BusinessCustomer", "name": "Bob Business", "companyName": "Acme Corp"},
            {"kind": "PremiumCustomer", "name": "Sam Silver", "tier": "silver",
             "benefits": ["Priority support", "Free shipping"]}
        ]}})
    );
    Ok(())
}

#[actix_web::test]
async fn include_false_drops_the_field() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let viewer = premium(&state, "Pat Platinum", "PLATINUM").await;
    let token = token_for(&state, &viewer);
    let app = create_test_app(state).build().await;

    let resp = test::call_service(
        &app,
        post_query(
            &gql_body(
                POLYMORPHIC,
                json!({"withBenefits": false, "skipEmail": false}),
            ),
            Some(&token),
        ),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["customers"][0],
        json!({"kind": "PremiumCustomer", "name": "Pat Platinum", "email": viewer.email, "tier": "PLATINUM"})
    );
    Ok(())
}

#[actix_web::test]
async fn fields_of_other_types_stay_out() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let viewer = business(&state, "Bea Business", "Bee Ltd").await;
    let token = token_for(&state, &viewer);
    let app = create_test_app(state).build().await;

    let query = "query One($id: ID!) { customer(id: $id) { id ... on PremiumCustomer { benefits } ... on Customer { status } } }";
    let resp = test::call_service(
        &app,
        post_query(&gql_body(query, json!({"id": viewer.id.to_string()})), Some(&token)),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"data": {"customer": {"id": viewer.id.to_string(), "status": "ACTIVE"}}})
    );
    Ok(())
}
