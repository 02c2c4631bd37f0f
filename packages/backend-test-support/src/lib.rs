//! Backend test support utilities
//!
//! Logging initialization, GraphQL error-envelope assertions and unique
//! test data, shared by the backend's unit and integration tests. Nothing
//! here depends on backend types.

pub mod graphql_errors;
pub mod logging;
pub mod unique_helpers;
