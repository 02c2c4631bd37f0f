//! Customer repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

pub use crate::adapters::customers_sea::{
    BusinessDetails, CustomerCreate, CustomerFilter, CustomerUpdate, PersonalDetails,
};
use crate::adapters::customers_sea as customers_adapter;
pub use crate::entities::{CustomerStatus, CustomerType};
use crate::errors::StorageError;

/// Customer domain model. Never carries the password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub customer_type: CustomerType,
    pub status: CustomerStatus,
    pub company_name: Option<String>,
    pub premium_tier: Option<String>,
    pub personal: PersonalDetails,
    pub business: BusinessDetails,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A customer together with its stored password hash, for login only.
#[derive(Debug, Clone)]
pub struct CustomerCredentials {
    pub customer: Customer,
    pub password_hash: String,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<Customer, StorageError> {
    let model = customers_adapter::create_customer(conn, dto).await?;
    Ok(Customer::from(model))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Customer>, StorageError> {
    let model = customers_adapter::find_customer_by_id(conn, id).await?;
    Ok(model.map(Customer::from))
}

pub async fn find_credentials_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<CustomerCredentials>, StorageError> {
    let model = customers_adapter::find_customer_by_email(conn, email).await?;
    Ok(model.map(|m| {
        let password_hash = m.password_hash.clone();
        CustomerCredentials {
            customer: Customer::from(m),
            password_hash,
        }
    }))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &CustomerFilter,
    limit: u64,
    offset: u64,
) -> Result<Vec<Customer>, StorageError> {
    let models = customers_adapter::list_customers(conn, filter, limit, offset).await?;
    Ok(models.into_iter().map(Customer::from).collect())
}

pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    needle: &str,
) -> Result<Vec<Customer>, StorageError> {
    let models = customers_adapter::search_customers(conn, needle).await?;
    Ok(models.into_iter().map(Customer::from).collect())
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: CustomerUpdate,
) -> Result<Customer, StorageError> {
    let model = customers_adapter::update_customer(conn, id, dto).await?;
    Ok(Customer::from(model))
}

/// Fails with a not-found error when no row had this id.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), StorageError> {
    match customers_adapter::delete_customer(conn, id).await? {
        0 => Err(StorageError::not_found(&format!("customers.id {id}"))),
        _ => Ok(()),
    }
}

impl From<crate::entities::customers::Model> for Customer {
    fn from(model: crate::entities::customers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            customer_type: model.customer_type,
            status: model.status,
            company_name: model.company_name,
            premium_tier: model.premium_tier,
            personal: PersonalDetails {
                phone: model.phone,
                address: model.address,
                date_of_birth: model.date_of_birth,
            },
            business: BusinessDetails {
                tax_id: model.tax_id,
                industry: model.industry,
                employee_count: model.employee_count,
                website: model.website,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
