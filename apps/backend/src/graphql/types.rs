//! Output and input types of the customer schema.
//!
//! Every customer is exposed through the `Customer` interface as one of
//! three concrete objects, picked by its stored type.

use async_graphql::{ErrorExtensions, InputObject, Interface, Object, Result, SimpleObject, ID};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::errors::ServiceError;
use crate::repos::customers::{
    BusinessDetails, Customer, CustomerStatus, CustomerType, CustomerUpdate, PersonalDetails,
};
use crate::services::customers::AuthPayload;

/// Benefits attached to a premium tier. Tier names are matched case-insensitively.
pub fn premium_benefits(tier: &str) -> Vec<&'static str> {
    match tier.to_ascii_uppercase().as_str() {
        "PLATINUM" => vec![
            "Priority support",
            "Free shipping",
            "Exclusive discounts",
            "Dedicated account manager",
        ],
        "GOLD" => vec!["Priority support", "Free shipping", "Exclusive discounts"],
        "SILVER" => vec!["Priority support", "Free shipping"],
        _ => vec!["Priority support"],
    }
}

fn rfc3339(at: OffsetDateTime) -> Result<String> {
    at.format(&Rfc3339)
        .map_err(|e| ServiceError::internal(format!("bad timestamp: {e}")).extend())
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct PersonalInfo {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct BusinessInfo {
    pub tax_id: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i32>,
    pub website: Option<String>,
}

fn personal_info(details: PersonalDetails) -> Option<PersonalInfo> {
    if details == PersonalDetails::default() {
        return None;
    }
    Some(PersonalInfo {
        phone: details.phone,
        address: details.address,
        date_of_birth: details.date_of_birth,
    })
}

fn business_info(details: BusinessDetails) -> Option<BusinessInfo> {
    if details == BusinessDetails::default() {
        return None;
    }
    Some(BusinessInfo {
        tax_id: details.tax_id,
        industry: details.industry,
        employee_count: details.employee_count,
        website: details.website,
    })
}

/// Fields every customer type shares.
#[derive(Debug, Clone)]
pub struct CustomerCommon {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub status: CustomerStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<&Customer> for CustomerCommon {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            status: customer.status,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndividualCustomer {
    pub common: CustomerCommon,
    pub personal_info: Option<PersonalInfo>,
}

#[Object]
impl IndividualCustomer {
    async fn id(&self) -> ID {
        ID::from(self.common.id.to_string())
    }

    async fn name(&self) -> String {
        self.common.name.clone()
    }

    async fn email(&self) -> String {
        self.common.email.clone()
    }

    async fn status(&self) -> CustomerStatus {
        self.common.status
    }

    async fn created_at(&self) -> Result<String> {
        rfc3339(self.common.created_at)
    }

    async fn updated_at(&self) -> Result<String> {
        rfc3339(self.common.updated_at)
    }

    async fn personal_info(&self) -> Option<&PersonalInfo> {
        self.personal_info.as_ref()
    }
}

impl From<Customer> for IndividualCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            common: CustomerCommon::from(&customer),
            personal_info: personal_info(customer.personal),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BusinessCustomer {
    pub common: CustomerCommon,
    pub company_name: Option<String>,
    pub business_info: Option<BusinessInfo>,
}

#[Object]
impl BusinessCustomer {
    async fn id(&self) -> ID {
        ID::from(self.common.id.to_string())
    }

    async fn name(&self) -> String {
        self.common.name.clone()
    }

    async fn email(&self) -> String {
        self.common.email.clone()
    }

    async fn status(&self) -> CustomerStatus {
        self.common.status
    }

    async fn created_at(&self) -> Result<String> {
        rfc3339(self.common.created_at)
    }

    async fn updated_at(&self) -> Result<String> {
        rfc3339(self.common.updated_at)
    }

    async fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    async fn business_info(&self) -> Option<&BusinessInfo> {
        self.business_info.as_ref()
    }
}

impl From<Customer> for BusinessCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            common: CustomerCommon::from(&customer),
            company_name: customer.company_name,
            business_info: business_info(customer.business),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PremiumCustomer {
    pub common: CustomerCommon,
    pub premium_tier: Option<String>,
}

#[Object]
impl PremiumCustomer {
    async fn id(&self) -> ID {
        ID::from(self.common.id.to_string())
    }

    async fn name(&self) -> String {
        self.common.name.clone()
    }

    async fn email(&self) -> String {
        self.common.email.clone()
    }

    async fn status(&self) -> CustomerStatus {
        self.common.status
    }

    async fn created_at(&self) -> Result<String> {
        rfc3339(self.common.created_at)
    }

    async fn updated_at(&self) -> Result<String> {
        rfc3339(self.common.updated_at)
    }

    async fn premium_tier(&self) -> Option<&str> {
        self.premium_tier.as_deref()
    }

    /// Derived from the tier; empty when no tier is set.
    async fn benefits(&self) -> Vec<&'static str> {
        self.premium_tier
            .as_deref()
            .map(premium_benefits)
            .unwrap_or_default()
    }
}

impl From<Customer> for PremiumCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            common: CustomerCommon::from(&customer),
            premium_tier: customer.premium_tier,
        }
    }
}

/// A customer as one of its three concrete GraphQL types.
#[derive(Debug, Clone, Interface)]
#[graphql(
    name = "Customer",
    field(name = "id", ty = "ID"),
    field(name = "name", ty = "String"),
    field(name = "email", ty = "String"),
    field(name = "status", ty = "CustomerStatus"),
    field(name = "created_at", ty = "String"),
    field(name = "updated_at", ty = "String")
)]
pub enum CustomerNode {
    IndividualCustomer(IndividualCustomer),
    BusinessCustomer(BusinessCustomer),
    PremiumCustomer(PremiumCustomer),
}

impl From<Customer> for CustomerNode {
    fn from(customer: Customer) -> Self {
        match customer.customer_type {
            CustomerType::Individual => CustomerNode::IndividualCustomer(customer.into()),
            CustomerType::Business => CustomerNode::BusinessCustomer(customer.into()),
            CustomerType::Premium => CustomerNode::PremiumCustomer(customer.into()),
        }
    }
}

pub struct AuthPayloadObject {
    token: String,
    customer: CustomerNode,
}

#[Object(name = "AuthPayload")]
impl AuthPayloadObject {
    async fn token(&self) -> &str {
        &self.token
    }

    async fn customer(&self) -> &CustomerNode {
        &self.customer
    }
}

impl From<AuthPayload> for AuthPayloadObject {
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.token,
            customer: payload.customer.into(),
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct PersonalInfoInput {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
}

impl From<PersonalInfoInput> for PersonalDetails {
    fn from(input: PersonalInfoInput) -> Self {
        Self {
            phone: input.phone,
            address: input.address,
            date_of_birth: input.date_of_birth,
        }
    }
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct BusinessInfoInput {
    pub tax_id: Option<String>,
    pub industry: Option<String>,
    pub employee_count: Option<i32>,
    pub website: Option<String>,
}

impl From<BusinessInfoInput> for BusinessDetails {
    fn from(input: BusinessInfoInput) -> Self {
        Self {
            tax_id: input.tax_id,
            industry: input.industry,
            employee_count: input.employee_count,
            website: input.website,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateIndividualCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub personal_info: Option<PersonalInfoInput>,
}

#[derive(Debug, Clone, InputObject)]
pub struct CreateBusinessCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub business_info: Option<BusinessInfoInput>,
}

#[derive(Debug, Clone, InputObject)]
pub struct CreatePremiumCustomerInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub premium_tier: String,
}

#[derive(Debug, Clone, Default, InputObject)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub premium_tier: Option<String>,
    pub personal_info: Option<PersonalInfoInput>,
    pub business_info: Option<BusinessInfoInput>,
}

impl From<UpdateCustomerInput> for CustomerUpdate {
    fn from(input: UpdateCustomerInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            company_name: input.company_name,
            premium_tier: input.premium_tier,
            personal: input.personal_info.map(Into::into),
            business: input.business_info.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}
