//! Query and mutation roots of the customer schema.
//!
//! Every field except registration and `login` requires an authenticated
//! [`RequestContext`], independently of the gate's classification.

use actix_web::web;
use async_graphql::{Context, ErrorExtensions, Object, Result, ResultExt, ID};
use sea_orm::DatabaseConnection;

use super::types::{
    AuthPayloadObject, BusinessCustomer, CreateBusinessCustomerInput,
    CreateIndividualCustomerInput, CreatePremiumCustomerInput, CustomerNode, IndividualCustomer,
    LoginInput, PremiumCustomer, UpdateCustomerInput,
};
use crate::errors::ServiceError;
use crate::extractors::request_context::RequestContext;
use crate::repos::customers::{Customer, CustomerFilter, CustomerStatus, CustomerType};
use crate::services::customers::{
    self as customer_service, PageRequest, Registration, RegistrationKind,
};
use crate::state::app_state::AppState;

fn state<'a>(ctx: &Context<'a>) -> Result<&'a AppState> {
    ctx.data::<web::Data<AppState>>()
        .map(|data| data.get_ref())
        .map_err(|_| ServiceError::internal("application state missing").extend())
}

/// Connection for a field open to anonymous callers.
fn public_db<'a>(ctx: &Context<'a>) -> Result<&'a DatabaseConnection> {
    state(ctx)?.require_db().extend()
}

/// Connection for a field that needs a verified identity.
fn protected_db<'a>(ctx: &Context<'a>) -> Result<&'a DatabaseConnection> {
    let request = ctx
        .data::<RequestContext>()
        .map_err(|_| ServiceError::internal("request context missing").extend())?;
    request.require_identity().extend()?;
    public_db(ctx)
}

fn nodes(customers: Vec<Customer>) -> Vec<CustomerNode> {
    customers.into_iter().map(CustomerNode::from).collect()
}

fn individual_registration(input: CreateIndividualCustomerInput) -> Registration {
    Registration {
        name: input.name,
        email: input.email,
        password: input.password,
        kind: RegistrationKind::Individual {
            personal: input.personal_info.map(Into::into),
        },
    }
}

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn customers(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<CustomerNode>> {
        let db = protected_db(ctx)?;
        let found = customer_service::list(db, CustomerFilter::All, PageRequest::new(page, offset))
            .await
            .extend()?;
        Ok(nodes(found))
    }

    /// `null` when no customer has this id.
    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Option<CustomerNode>> {
        let db = protected_db(ctx)?;
        let found = customer_service::get(db, &id).await.extend()?;
        Ok(found.map(CustomerNode::from))
    }

    async fn customers_by_type(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "type")] customer_type: CustomerType,
        page: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<CustomerNode>> {
        let db = protected_db(ctx)?;
        let found = customer_service::list(
            db,
            CustomerFilter::ByType(customer_type),
            PageRequest::new(page, offset),
        )
        .await
        .extend()?;
        Ok(nodes(found))
    }

    /// Customers whose name or email contains `query`.
    async fn search_customers(&self, ctx: &Context<'_>, query: String) -> Result<Vec<CustomerNode>> {
        let db = protected_db(ctx)?;
        let found = customer_service::search(db, &query).await.extend()?;
        Ok(nodes(found))
    }

    async fn customers_by_status(
        &self,
        ctx: &Context<'_>,
        status: CustomerStatus,
        page: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<CustomerNode>> {
        let db = protected_db(ctx)?;
        let found = customer_service::list(
            db,
            CustomerFilter::ByStatus(status),
            PageRequest::new(page, offset),
        )
        .await
        .extend()?;
        Ok(nodes(found))
    }

    async fn premium_customers_by_tier(
        &self,
        ctx: &Context<'_>,
        tier: String,
        page: Option<i32>,
        offset: Option<i32>,
    ) -> Result<Vec<PremiumCustomer>> {
        let db = protected_db(ctx)?;
        let found = customer_service::list(
            db,
            CustomerFilter::PremiumTier(tier),
            PageRequest::new(page, offset),
        )
        .await
        .extend()?;
        Ok(found.into_iter().map(PremiumCustomer::from).collect())
    }

    /// Like `customer`, but a missing customer is a `NOT_FOUND` error.
    async fn get_customer_with_error_handling(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<CustomerNode>> {
        let db = protected_db(ctx)?;
        let found = customer_service::get_required(db, &id).await.extend()?;
        Ok(Some(found.into()))
    }

    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<AuthPayloadObject> {
        let state = state(ctx)?;
        let db = state.require_db().extend()?;
        let payload = customer_service::login(db, &state.tokens, &input.email, &input.password)
            .await
            .extend()?;
        Ok(payload.into())
    }
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn create_individual_customer(
        &self,
        ctx: &Context<'_>,
        input: CreateIndividualCustomerInput,
    ) -> Result<IndividualCustomer> {
        let db = public_db(ctx)?;
        let created = customer_service::register(db, individual_registration(input))
            .await
            .extend()?;
        Ok(created.into())
    }

    async fn create_business_customer(
        &self,
        ctx: &Context<'_>,
        input: CreateBusinessCustomerInput,
    ) -> Result<BusinessCustomer> {
        let db = public_db(ctx)?;
        let registration = Registration {
            name: input.name,
            email: input.email,
            password: input.password,
            kind: RegistrationKind::Business {
                company_name: input.company_name,
                business: input.business_info.map(Into::into),
            },
        };
        let created = customer_service::register(db, registration).await.extend()?;
        Ok(created.into())
    }

    async fn create_premium_customer(
        &self,
        ctx: &Context<'_>,
        input: CreatePremiumCustomerInput,
    ) -> Result<PremiumCustomer> {
        let db = public_db(ctx)?;
        let registration = Registration {
            name: input.name,
            email: input.email,
            password: input.password,
            kind: RegistrationKind::Premium {
                premium_tier: input.premium_tier,
            },
        };
        let created = customer_service::register(db, registration).await.extend()?;
        Ok(created.into())
    }

    /// Individual registration with every violation reported at once.
    async fn create_customer_with_error_handling(
        &self,
        ctx: &Context<'_>,
        input: CreateIndividualCustomerInput,
    ) -> Result<IndividualCustomer> {
        let db = public_db(ctx)?;
        let created = customer_service::register(db, individual_registration(input))
            .await
            .extend()?;
        Ok(created.into())
    }

    async fn update_customer(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateCustomerInput,
    ) -> Result<Option<CustomerNode>> {
        let db = protected_db(ctx)?;
        let updated = customer_service::update(db, &id, input.into())
            .await
            .extend()?;
        Ok(Some(updated.into()))
    }

    async fn delete_customer(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let db = protected_db(ctx)?;
        customer_service::delete(db, &id).await.extend()?;
        Ok(true)
    }
}
