//! Operation documents sent by [`crate::GraphqlClient`].
//!
//! Every customer-returning operation selects [`CUSTOMER_FIELDS`] so the
//! response always carries `__typename`.

pub const CUSTOMER_FIELDS: &str = r#"
fragment CustomerFields on Customer {
  __typename
  id
  name
  email
  status
  createdAt
  updatedAt
  ... on IndividualCustomer { personalInfo { phone address dateOfBirth } }
  ... on BusinessCustomer { companyName businessInfo { taxId industry employeeCount website } }
  ... on PremiumCustomer { premiumTier benefits }
}
"#;

pub const LOGIN: &str = r#"
query Login($input: LoginInput!) {
  login(input: $input) { token customer { ...CustomerFields } }
}
"#;

pub const CUSTOMERS: &str = r#"
query Customers($page: Int, $offset: Int) {
  customers(page: $page, offset: $offset) { ...CustomerFields }
}
"#;

pub const CUSTOMER: &str = r#"
query Customer($id: ID!) {
  customer(id: $id) { ...CustomerFields }
}
"#;

pub const GET_CUSTOMER_WITH_ERROR_HANDLING: &str = r#"
query GetCustomerWithErrorHandling($id: ID!) {
  getCustomerWithErrorHandling(id: $id) { ...CustomerFields }
}
"#;

pub const CUSTOMERS_BY_TYPE: &str = r#"
query CustomersByType($type: CustomerType!, $page: Int, $offset: Int) {
  customersByType(type: $type, page: $page, offset: $offset) { ...CustomerFields }
}
"#;

pub const CUSTOMERS_BY_STATUS: &str = r#"
query CustomersByStatus($status: CustomerStatus!, $page: Int, $offset: Int) {
  customersByStatus(status: $status, page: $page, offset: $offset) { ...CustomerFields }
}
"#;

pub const PREMIUM_CUSTOMERS_BY_TIER: &str = r#"
query PremiumCustomersByTier($tier: String!, $page: Int, $offset: Int) {
  premiumCustomersByTier(tier: $tier, page: $page, offset: $offset) { ...CustomerFields }
}
"#;

pub const SEARCH_CUSTOMERS: &str = r#"
query SearchCustomers($query: String!) {
  searchCustomers(query: $query) { ...CustomerFields }
}
"#;

pub const CREATE_INDIVIDUAL_CUSTOMER: &str = r#"
mutation CreateIndividualCustomer($input: CreateIndividualCustomerInput!) {
  createIndividualCustomer(input: $input) { ...CustomerFields }
}
"#;

pub const CREATE_BUSINESS_CUSTOMER: &str = r#"
mutation CreateBusinessCustomer($input: CreateBusinessCustomerInput!) {
  createBusinessCustomer(input: $input) { ...CustomerFields }
}
"#;

pub const CREATE_PREMIUM_CUSTOMER: &str = r#"
mutation CreatePremiumCustomer($input: CreatePremiumCustomerInput!) {
  createPremiumCustomer(input: $input) { ...CustomerFields }
}
"#;

pub const CREATE_CUSTOMER_WITH_ERROR_HANDLING: &str = r#"
mutation CreateCustomerWithErrorHandling($input: CreateIndividualCustomerInput!) {
  createCustomerWithErrorHandling(input: $input) { ...CustomerFields }
}
"#;

pub const UPDATE_CUSTOMER: &str = r#"
mutation UpdateCustomer($id: ID!, $input: UpdateCustomerInput!) {
  updateCustomer(id: $id, input: $input) { ...CustomerFields }
}
"#;

pub const DELETE_CUSTOMER: &str = r#"
mutation DeleteCustomer($id: ID!) {
  deleteCustomer(id: $id)
}
"#;

/// `operation` followed by the shared customer fragment.
pub fn with_customer_fields(operation: &str) -> String {
    format!("{operation}{CUSTOMER_FIELDS}")
}
