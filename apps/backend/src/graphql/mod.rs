//! The customer GraphQL schema and the gate's operation classifier.

pub mod classify;
pub mod extensions;
pub mod persisted;
pub mod resolvers;
pub mod schema;
pub mod types;

pub use classify::{Classification, ClassifierMode, GatePolicy, MAX_BODY_BYTES};
pub use resolvers::{MutationRoot, QueryRoot};
pub use schema::{build_schema, CustomerSchema};
