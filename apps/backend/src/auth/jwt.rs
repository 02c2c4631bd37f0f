use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::Claims;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Lifetime of every issued token.
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Why a token was refused. Kept for logs; clients only ever see
/// [`AuthError::Unauthenticated`]'s fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Missing,
    Expired,
    NotYetValid,
    InvalidSignature,
    Malformed,
}

impl TokenRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenRejection::Missing => "token_missing",
            TokenRejection::Expired => "token_expired",
            TokenRejection::NotYetValid => "token_not_yet_valid",
            TokenRejection::InvalidSignature => "invalid_signature",
            TokenRejection::Malformed => "invalid_token",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    Unauthenticated { reason: TokenRejection },
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Failed to sign token: {detail}")]
    Signing { detail: String },
}

impl AuthError {
    pub fn unauthenticated(reason: TokenRejection) -> Self {
        Self::Unauthenticated { reason }
    }
}

/// Issues and verifies HS256 access tokens.
///
/// Time bounds are checked here rather than by `jsonwebtoken` so the
/// validity window is exactly `[nbf, exp)` with no leeway, and so tests
/// can pin the clock through [`TokenCodec::issue_at`] / [`TokenCodec::verify_at`].
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(security: &SecurityConfig) -> Result<Self, AppError> {
        if security.jwt_secret.is_empty() {
            return Err(AppError::config("JWT secret must not be empty"));
        }

        let mut validation = Validation::new(security.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp", "nbf", "iat"]);

        Ok(Self {
            header: Header::new(security.algorithm),
            encoding_key: EncodingKey::from_secret(&security.jwt_secret),
            decoding_key: DecodingKey::from_secret(&security.jwt_secret),
            validation,
            ttl: TOKEN_TTL,
        })
    }

    pub fn issue(&self, customer_id: i64, email: &str) -> Result<String, AuthError> {
        self.issue_at(customer_id, email, SystemTime::now())
    }

    /// Mint a token valid from `now` for [`TOKEN_TTL`].
    pub fn issue_at(
        &self,
        customer_id: i64,
        email: &str,
        now: SystemTime,
    ) -> Result<String, AuthError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Signing {
                detail: "clock is before the unix epoch".to_string(),
            })?
            .as_secs() as i64;

        let claims = Claims {
            customer_id,
            email: email.to_string(),
            iat,
            nbf: iat,
            exp: iat + self.ttl.as_secs() as i64,
        };

        encode(&self.header, &claims, &self.encoding_key).map_err(|e| AuthError::Signing {
            detail: e.to_string(),
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, SystemTime::now())
    }

    /// Check signature and structure, then require `nbf <= now < exp`.
    pub fn verify_at(&self, token: &str, now: SystemTime) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature => TokenRejection::InvalidSignature,
                    ErrorKind::ExpiredSignature => TokenRejection::Expired,
                    ErrorKind::ImmatureSignature => TokenRejection::NotYetValid,
                    _ => TokenRejection::Malformed,
                };
                AuthError::unauthenticated(reason)
            })?;

        let now = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        if now < claims.nbf {
            return Err(AuthError::unauthenticated(TokenRejection::NotYetValid));
        }
        if now >= claims.exp {
            return Err(AuthError::unauthenticated(TokenRejection::Expired));
        }

        Ok(claims)
    }
}
