pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{Claims, Identity};
pub use jwt::{AuthError, TokenCodec, TokenRejection, TOKEN_TTL};
