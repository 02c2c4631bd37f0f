//! SeaORM adapter for the customers table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::{customers, CustomerStatus, CustomerType};

pub mod dto;

pub use dto::{BusinessDetails, CustomerCreate, CustomerFilter, CustomerUpdate, PersonalDetails};

// Adapter functions return DbErr; repos layer maps to StorageError via From<DbErr>.

pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<customers::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let customer = customers::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        customer_type: Set(dto.customer_type),
        status: Set(CustomerStatus::Active),
        company_name: Set(dto.company_name),
        premium_tier: Set(dto.premium_tier),
        phone: Set(dto.personal.phone),
        address: Set(dto.personal.address),
        date_of_birth: Set(dto.personal.date_of_birth),
        tax_id: Set(dto.business.tax_id),
        industry: Set(dto.business.industry),
        employee_count: Set(dto.business.employee_count),
        website: Set(dto.business.website),
        created_at: Set(now),
        updated_at: Set(now),
    };

    customer.insert(conn).await
}

pub async fn find_customer_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find_by_id(id).one(conn).await
}

pub async fn find_customer_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn list_customers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: &CustomerFilter,
    limit: u64,
    offset: u64,
) -> Result<Vec<customers::Model>, sea_orm::DbErr> {
    let query = customers::Entity::find();
    let query = match filter {
        CustomerFilter::All => query,
        CustomerFilter::ByType(customer_type) => {
            query.filter(customers::Column::CustomerType.eq(*customer_type))
        }
        CustomerFilter::ByStatus(status) => query.filter(customers::Column::Status.eq(*status)),
        CustomerFilter::PremiumTier(tier) => query
            .filter(customers::Column::CustomerType.eq(CustomerType::Premium))
            .filter(customers::Column::PremiumTier.eq(tier.as_str())),
    };

    query
        .order_by_asc(customers::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await
}

/// Customers whose name or email contains `needle`.
pub async fn search_customers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    needle: &str,
) -> Result<Vec<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find()
        .filter(
            Condition::any()
                .add(customers::Column::Name.contains(needle))
                .add(customers::Column::Email.contains(needle)),
        )
        .order_by_asc(customers::Column::Id)
        .all(conn)
        .await
}

pub async fn update_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: CustomerUpdate,
) -> Result<customers::Model, sea_orm::DbErr> {
    let existing = customers::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("customers.id {id}")))?;

    let mut customer: customers::ActiveModel = existing.into();
    if let Some(name) = dto.name {
        customer.name = Set(name);
    }
    if let Some(email) = dto.email {
        customer.email = Set(email);
    }
    if let Some(company_name) = dto.company_name {
        customer.company_name = Set(Some(company_name));
    }
    if let Some(premium_tier) = dto.premium_tier {
        customer.premium_tier = Set(Some(premium_tier));
    }
    if let Some(personal) = dto.personal {
        if personal.phone.is_some() {
            customer.phone = Set(personal.phone);
        }
        if personal.address.is_some() {
            customer.address = Set(personal.address);
        }
        if personal.date_of_birth.is_some() {
            customer.date_of_birth = Set(personal.date_of_birth);
        }
    }
    if let Some(business) = dto.business {
        if business.tax_id.is_some() {
            customer.tax_id = Set(business.tax_id);
        }
        if business.industry.is_some() {
            customer.industry = Set(business.industry);
        }
        if business.employee_count.is_some() {
            customer.employee_count = Set(business.employee_count);
        }
        if business.website.is_some() {
            customer.website = Set(business.website);
        }
    }
    customer.updated_at = Set(OffsetDateTime::now_utc());

    customer.update(conn).await
}

/// Returns the number of rows removed.
pub async fn delete_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = customers::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
