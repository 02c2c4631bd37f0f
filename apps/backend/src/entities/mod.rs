pub mod customers;

pub use customers::Entity as Customers;
pub use customers::Model as Customer;
pub use customers::{CustomerStatus, CustomerType};
