//! Adapters for external dependencies.

pub mod customers_sea;
