use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::queries::{self, with_customer_fields};
use crate::token_store::TokenStore;
use crate::types::*;

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
    #[serde(default)]
    extensions: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<WireError>,
}

/// Client for the customer GraphQL endpoint.
///
/// Requests carry `Authorization: Bearer <token>` once a token is set,
/// either explicitly, from a [`TokenStore`], or by a successful [`login`].
///
/// [`login`]: GraphqlClient::login
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    store: Option<TokenStore>,
}

impl GraphqlClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ClientError::Http {
                endpoint: config.endpoint.clone(),
                source,
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
            token: None,
            store: None,
        })
    }

    /// A client using the home-directory token file, with any saved token loaded.
    pub fn with_saved_token(config: ClientConfig) -> Result<Self, ClientError> {
        let store = TokenStore::in_home_dir()?;
        Self::new(config)?.with_token_store(store)
    }

    /// Persist future logins to `store` and pick up a token already in it.
    pub fn with_token_store(mut self, store: TokenStore) -> Result<Self, ClientError> {
        if let Some(token) = store.load()? {
            self.token = Some(token);
        }
        self.store = Some(store);
        Ok(self)
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `query` and decode the whole `data` object into `T`.
    ///
    /// Any entry in `errors` fails the call with [`ClientError::Graphql`]
    /// carrying the first message and code.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, ClientError> {
        let data = self.send(query, variables).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn send(&self, query: &str, variables: Value) -> Result<Value, ClientError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|source| self.http_error(source))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.http_error(source))?;
        debug!(status = status.as_u16(), "graphql response received");

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Status {
                    endpoint: self.endpoint.clone(),
                    status: status.as_u16(),
                    body,
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(first) = envelope.errors.into_iter().next() {
            return Err(ClientError::Graphql {
                message: first.message,
                code: first
                    .extensions
                    .get("code")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        }
        match envelope.data {
            Some(data) if status.is_success() => Ok(data),
            _ => Err(ClientError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Run `operation` (plus the customer fragment) and decode `data[field]`.
    async fn field<T: DeserializeOwned>(
        &self,
        operation: &str,
        field: &str,
        variables: Value,
    ) -> Result<T, ClientError> {
        let mut data = self.send(&with_customer_fields(operation), variables).await?;
        let value = data
            .get_mut(field)
            .map(Value::take)
            .ok_or_else(|| ClientError::MissingData {
                field: field.to_string(),
            })?;
        Ok(serde_json::from_value(value)?)
    }

    fn http_error(&self, source: reqwest::Error) -> ClientError {
        ClientError::Http {
            endpoint: self.endpoint.clone(),
            source,
        }
    }

    /// Log in and keep the token for later requests.
    ///
    /// A token file that cannot be written does not fail the login.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let input = LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        };
        let payload: AuthPayload = self
            .field(queries::LOGIN, "login", json!({ "input": input }))
            .await?;

        self.token = Some(payload.token.clone());
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&payload.token) {
                warn!(error = %e, "could not save token");
            }
        }
        Ok(payload)
    }

    /// Forget the token here and in the token file.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.token = None;
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    pub async fn customers(&self, page: Page) -> Result<Vec<Customer>, ClientError> {
        self.field(queries::CUSTOMERS, "customers", paged(Map::new(), page))
            .await
    }

    pub async fn customer(&self, id: &str) -> Result<Option<Customer>, ClientError> {
        self.field(queries::CUSTOMER, "customer", json!({ "id": id }))
            .await
    }

    /// Like [`customer`](Self::customer) but a missing id is an error.
    pub async fn get_customer_with_error_handling(
        &self,
        id: &str,
    ) -> Result<Customer, ClientError> {
        self.field(
            queries::GET_CUSTOMER_WITH_ERROR_HANDLING,
            "getCustomerWithErrorHandling",
            json!({ "id": id }),
        )
        .await
    }

    pub async fn customers_by_type(
        &self,
        customer_type: CustomerType,
        page: Page,
    ) -> Result<Vec<Customer>, ClientError> {
        let mut vars = Map::new();
        vars.insert("type".to_string(), serde_json::to_value(customer_type)?);
        self.field(queries::CUSTOMERS_BY_TYPE, "customersByType", paged(vars, page))
            .await
    }

    pub async fn customers_by_status(
        &self,
        status: CustomerStatus,
        page: Page,
    ) -> Result<Vec<Customer>, ClientError> {
        let mut vars = Map::new();
        vars.insert("status".to_string(), serde_json::to_value(status)?);
        self.field(
            queries::CUSTOMERS_BY_STATUS,
            "customersByStatus",
            paged(vars, page),
        )
        .await
    }

    pub async fn premium_customers_by_tier(
        &self,
        tier: &str,
        page: Page,
    ) -> Result<Vec<Customer>, ClientError> {
        let mut vars = Map::new();
        vars.insert("tier".to_string(), Value::String(tier.to_string()));
        self.field(
            queries::PREMIUM_CUSTOMERS_BY_TIER,
            "premiumCustomersByTier",
            paged(vars, page),
        )
        .await
    }

    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, ClientError> {
        self.field(
            queries::SEARCH_CUSTOMERS,
            "searchCustomers",
            json!({ "query": query }),
        )
        .await
    }

    pub async fn create_individual_customer(
        &self,
        input: &CreateIndividualCustomerInput,
    ) -> Result<Customer, ClientError> {
        self.field(
            queries::CREATE_INDIVIDUAL_CUSTOMER,
            "createIndividualCustomer",
            json!({ "input": input }),
        )
        .await
    }

    pub async fn create_business_customer(
        &self,
        input: &CreateBusinessCustomerInput,
    ) -> Result<Customer, ClientError> {
        self.field(
            queries::CREATE_BUSINESS_CUSTOMER,
            "createBusinessCustomer",
            json!({ "input": input }),
        )
        .await
    }

    pub async fn create_premium_customer(
        &self,
        input: &CreatePremiumCustomerInput,
    ) -> Result<Customer, ClientError> {
        self.field(
            queries::CREATE_PREMIUM_CUSTOMER,
            "createPremiumCustomer",
            json!({ "input": input }),
        )
        .await
    }

    pub async fn create_customer_with_error_handling(
        &self,
        input: &CreateIndividualCustomerInput,
    ) -> Result<Customer, ClientError> {
        self.field(
            queries::CREATE_CUSTOMER_WITH_ERROR_HANDLING,
            "createCustomerWithErrorHandling",
            json!({ "input": input }),
        )
        .await
    }

    pub async fn update_customer(
        &self,
        id: &str,
        input: &UpdateCustomerInput,
    ) -> Result<Customer, ClientError> {
        self.field(
            queries::UPDATE_CUSTOMER,
            "updateCustomer",
            json!({ "id": id, "input": input }),
        )
        .await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<bool, ClientError> {
        let data = self
            .send(queries::DELETE_CUSTOMER, json!({ "id": id }))
            .await?;
        data.get("deleteCustomer")
            .and_then(Value::as_bool)
            .ok_or_else(|| ClientError::MissingData {
                field: "deleteCustomer".to_string(),
            })
    }
}

fn paged(mut vars: Map<String, Value>, page: Page) -> Value {
    if let Some(limit) = page.page {
        vars.insert("page".to_string(), Value::from(limit));
    }
    if let Some(offset) = page.offset {
        vars.insert("offset".to_string(), Value::from(offset));
    }
    Value::Object(vars)
}
