//! Customer use cases: validation, hashing, persistence and token issue.
//!
//! Every input is validated before the repository is touched; storage
//! failures come back as `ServiceError::Storage` for the presenter to
//! translate.

use sea_orm::ConnectionTrait;
use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthError, TokenCodec};
use crate::errors::{ServiceError, StorageError};
use crate::logging::pii::Redacted;
use crate::repos::customers::{
    self as customers_repo, BusinessDetails, Customer, CustomerCreate, CustomerFilter,
    CustomerType, CustomerUpdate, PersonalDetails,
};
use crate::validation::{
    validate_customer_create, validate_customer_update, validate_email, validate_id,
    validate_pagination, validate_password, validate_required, ValidationCode, ValidationError,
    ValidationErrors,
};

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// What kind of customer is being registered, with its type-specific data.
#[derive(Debug, Clone)]
pub enum RegistrationKind {
    Individual {
        personal: Option<PersonalDetails>,
    },
    Business {
        company_name: String,
        business: Option<BusinessDetails>,
    },
    Premium {
        premium_tier: String,
    },
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub kind: RegistrationKind,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub token: String,
    pub customer: Customer,
}

/// Page request as received from the API; `page` is the page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<i32>,
    pub offset: Option<i32>,
}

impl PageRequest {
    pub fn new(page: Option<i32>, offset: Option<i32>) -> Self {
        Self { page, offset }
    }

    fn limit_offset(self) -> Result<(u64, u64), ValidationErrors> {
        validate_pagination(self.page, self.offset)?;
        let limit = self.page.map_or(DEFAULT_PAGE_SIZE, |p| p as u64);
        let offset = self.offset.map_or(0, |o| o as u64);
        Ok((limit, offset))
    }
}

/// Validated decimal id. Digits that overflow `i64` are rejected like any
/// other malformed id.
pub fn parse_id(id: &str) -> Result<i64, ServiceError> {
    validate_id(id)?;
    id.parse::<i64>().map_err(|_| {
        ValidationError::new("id", "ID must be a valid number", ValidationCode::InvalidFormat).into()
    })
}

fn not_found(id: i64) -> ServiceError {
    StorageError::not_found(&format!("customers.id {id}")).into()
}

pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    registration: Registration,
) -> Result<Customer, ServiceError> {
    let mut errors = ValidationErrors::new();
    if let Err(create_errors) = validate_customer_create(&registration.name, &registration.email) {
        errors.extend(create_errors);
    }
    errors.check(validate_password(&registration.password));
    match &registration.kind {
        RegistrationKind::Business { company_name, .. } => errors.check(validate_required(
            company_name,
            "companyName",
            "Company name is required",
        )),
        RegistrationKind::Premium { premium_tier } => errors.check(validate_required(
            premium_tier,
            "premiumTier",
            "Premium tier is required",
        )),
        RegistrationKind::Individual { .. } => {}
    }
    errors.into_result()?;

    let password_hash = hash_password(&registration.password)?;
    let dto = CustomerCreate::new(registration.name, registration.email, password_hash);
    let dto = match registration.kind {
        RegistrationKind::Individual { personal } => dto
            .with_type(CustomerType::Individual)
            .with_personal(personal.unwrap_or_default()),
        RegistrationKind::Business {
            company_name,
            business,
        } => dto
            .with_type(CustomerType::Business)
            .with_company_name(company_name)
            .with_business(business.unwrap_or_default()),
        RegistrationKind::Premium { premium_tier } => dto
            .with_type(CustomerType::Premium)
            .with_premium_tier(premium_tier),
    };

    let customer = customers_repo::create(conn, dto).await?;
    info!(
        customer_id = customer.id,
        customer_type = ?customer.customer_type,
        email = %Redacted(&customer.email),
        "customer registered"
    );
    Ok(customer)
}

/// Check credentials and issue a token.
///
/// Unknown email and wrong password fail identically.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tokens: &TokenCodec,
    email: &str,
    password: &str,
) -> Result<AuthPayload, ServiceError> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_email(email));
    errors.check(validate_password(password));
    errors.into_result()?;

    let Some(credentials) = customers_repo::find_credentials_by_email(conn, email).await? else {
        warn!(email = %Redacted(email), reason = "unknown_email", "login rejected");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !verify_password(password, &credentials.password_hash) {
        warn!(customer_id = credentials.customer.id, reason = "bad_password", "login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    let customer = credentials.customer;
    let token = tokens.issue(customer.id, &customer.email)?;
    info!(customer_id = customer.id, "login succeeded");
    Ok(AuthPayload { token, customer })
}

/// `None` when no customer has this id.
pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Option<Customer>, ServiceError> {
    let id = parse_id(id)?;
    Ok(customers_repo::find_by_id(conn, id).await?)
}

/// Like [`get`], but a missing customer is a not-found error.
pub async fn get_required<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<Customer, ServiceError> {
    let id = parse_id(id)?;
    customers_repo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: CustomerFilter,
    page: PageRequest,
) -> Result<Vec<Customer>, ServiceError> {
    let (limit, offset) = page.limit_offset()?;
    debug!(?filter, limit, offset, "listing customers");
    Ok(customers_repo::list(conn, &filter, limit, offset).await?)
}

/// Customers whose name or email contains `query`.
pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &str,
) -> Result<Vec<Customer>, ServiceError> {
    validate_required(query, "query", "Search query is required")?;
    Ok(customers_repo::search(conn, query).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
    changes: CustomerUpdate,
) -> Result<Customer, ServiceError> {
    validate_customer_update(id, changes.name.as_deref(), changes.email.as_deref())?;
    let id = parse_id(id)?;
    let customer = customers_repo::update(conn, id, changes).await?;
    info!(customer_id = customer.id, "customer updated");
    Ok(customer)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: &str,
) -> Result<(), ServiceError> {
    let id = parse_id(id)?;
    customers_repo::delete(conn, id).await?;
    info!(customer_id = id, "customer deleted");
    Ok(())
}
