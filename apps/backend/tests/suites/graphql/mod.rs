pub mod customers_flow;
pub mod errors;
pub mod projection;
pub mod transport;
