//! Request inputs and response shapes of the customer API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    Individual,
    Business,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

/// `page` is a page size, `offset` the number of rows to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i32>,
}

impl Page {
    pub fn new(page: i32, offset: i32) -> Self {
        Self {
            page: Some(page),
            offset: Some(offset),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndividualCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_info: Option<BusinessInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePremiumCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub premium_tier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_tier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: Option<CustomerStatus>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub personal_info: Option<PersonalInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: Option<CustomerStatus>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub company_name: Option<String>,
    pub business_info: Option<BusinessInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumCustomer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: Option<CustomerStatus>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub premium_tier: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// A customer of any concrete type, discriminated by `__typename`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "__typename")]
pub enum Customer {
    IndividualCustomer(IndividualCustomer),
    BusinessCustomer(BusinessCustomer),
    PremiumCustomer(PremiumCustomer),
}

impl Customer {
    pub fn id(&self) -> &str {
        match self {
            Customer::IndividualCustomer(c) => &c.id,
            Customer::BusinessCustomer(c) => &c.id,
            Customer::PremiumCustomer(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Customer::IndividualCustomer(c) => &c.name,
            Customer::BusinessCustomer(c) => &c.name,
            Customer::PremiumCustomer(c) => &c.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Customer::IndividualCustomer(c) => &c.email,
            Customer::BusinessCustomer(c) => &c.email,
            Customer::PremiumCustomer(c) => &c.email,
        }
    }

    pub fn customer_type(&self) -> CustomerType {
        match self {
            Customer::IndividualCustomer(_) => CustomerType::Individual,
            Customer::BusinessCustomer(_) => CustomerType::Business,
            Customer::PremiumCustomer(_) => CustomerType::Premium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub customer: Customer,
}
