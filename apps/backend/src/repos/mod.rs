//! Repository layer: domain models over the SeaORM adapters.

pub mod customers;
