//! Seed customers straight through the service layer.

use backend_test_support::unique_helpers::unique_email;
use crm_backend::repos::customers::{Customer, PersonalDetails};
use crm_backend::services::customers::{register, Registration, RegistrationKind};
use crm_backend::state::app_state::AppState;

pub const PASSWORD: &str = "s3cret-pass";

pub async fn individual(state: &AppState, name: &str) -> Customer {
    let registration = Registration {
        name: name.to_string(),
        email: unique_email("individual"),
        password: PASSWORD.to_string(),
        kind: RegistrationKind::Individual {
            personal: Some(PersonalDetails {
                phone: Some("555-0100".to_string()),
                ..PersonalDetails::default()
            }),
        },
    };
    seed(state, registration).await
}

pub async fn business(state: &AppState, name: &str, company: &str) -> Customer {
    let registration = Registration {
        name: name.to_string(),
        email: unique_email("business"),
        password: PASSWORD.to_string(),
        kind: RegistrationKind::Business {
            company_name: company.to_string(),
            business: None,
        },
    };
    seed(state, registration).await
}

pub async fn premium(state: &AppState, name: &str, tier: &str) -> Customer {
    let registration = Registration {
        name: name.to_string(),
        email: unique_email("premium"),
        password: PASSWORD.to_string(),
        kind: RegistrationKind::Premium {
            premium_tier: tier.to_string(),
        },
    };
    seed(state, registration).await
}

async fn seed(state: &AppState, registration: Registration) -> Customer {
    let db = state.db().expect("test state has a database");
    register(db, registration).await.expect("seed customer")
}

/// A valid token for `customer`.
pub fn token_for(state: &AppState, customer: &Customer) -> String {
    state
        .tokens
        .issue(customer.id, &customer.email)
        .expect("issue token")
}
