pub mod auth_token;
pub mod request_context;

pub use auth_token::bearer_token;
pub use request_context::RequestContext;
