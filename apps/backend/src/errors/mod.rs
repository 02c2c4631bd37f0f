//! Error handling for the customer backend.
//!
//! `ServiceError` is the closed set of failures a resolver can produce;
//! [`presenter::present`] turns any of them into the client-facing
//! GraphQL error entry.

pub mod presenter;
pub mod service;
pub mod storage;

pub use presenter::present;
pub use service::ServiceError;
pub use storage::{StorageError, StorageErrorKind};
