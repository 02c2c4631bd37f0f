//! DTOs for customers_sea adapter.

use crate::entities::{CustomerStatus, CustomerType};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalDetails {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessDetails {
    pub tax_id: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i32>,
    pub website: Option<String>,
}

/// DTO for inserting a customer. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub customer_type: CustomerType,
    pub company_name: Option<String>,
    pub premium_tier: Option<String>,
    pub personal: PersonalDetails,
    pub business: BusinessDetails,
}

impl CustomerCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            customer_type: CustomerType::Individual,
            company_name: None,
            premium_tier: None,
            personal: PersonalDetails::default(),
            business: BusinessDetails::default(),
        }
    }

    pub fn with_type(mut self, customer_type: CustomerType) -> Self {
        self.customer_type = customer_type;
        self
    }

    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    pub fn with_premium_tier(mut self, premium_tier: impl Into<String>) -> Self {
        self.premium_tier = Some(premium_tier.into());
        self
    }

    pub fn with_personal(mut self, personal: PersonalDetails) -> Self {
        self.personal = personal;
        self
    }

    pub fn with_business(mut self, business: BusinessDetails) -> Self {
        self.business = business;
        self
    }
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub premium_tier: Option<String>,
    pub personal: Option<PersonalDetails>,
    pub business: Option<BusinessDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerFilter {
    All,
    ByType(CustomerType),
    ByStatus(CustomerStatus),
    /// Premium customers on the given tier.
    PremiumTier(String),
}
