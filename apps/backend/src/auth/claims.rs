//! Identity claims carried in backend-issued tokens.

use serde::{Deserialize, Serialize};

/// Claim set embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Customer primary key (customers.id)
    pub customer_id: i64,
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Not-before (seconds since epoch)
    pub nbf: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Authenticated caller attached to a request by the GraphQL gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub customer_id: i64,
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            customer_id: claims.customer_id,
            email: claims.email,
        }
    }
}
