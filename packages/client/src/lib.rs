//! Typed client for the customer GraphQL API.

pub mod client;
pub mod config;
pub mod error;
pub mod queries;
pub mod token_store;
pub mod types;

pub use client::GraphqlClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use token_store::TokenStore;
pub use types::*;
