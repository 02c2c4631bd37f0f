use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;

/// Errors raised at the HTTP boundary, outside of GraphQL execution.
///
/// Every variant renders as the GraphQL error envelope
/// `{"errors":[{"message":...,"extensions":{"code":...}}]}` so clients see
/// one error shape regardless of where a request was rejected.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization token required")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
}

impl AppError {
    /// Machine-readable code placed in `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingToken | AppError::InvalidToken => "UNAUTHENTICATED",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::Internal { .. } | AppError::Config { .. } => "INTERNAL_ERROR",
            AppError::Db { .. } => "DATABASE_ERROR",
        }
    }

    /// Client-facing message. Internal details stay in logs.
    fn public_message(&self) -> String {
        match self {
            AppError::MissingToken | AppError::InvalidToken => self.to_string(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::PayloadTooLarge { .. } => self.to_string(),
            AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
            AppError::Db { .. } => "A database error occurred".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } | AppError::Config { .. } | AppError::Db { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn missing_token() -> Self {
        Self::MissingToken
    }

    pub fn invalid_token() -> Self {
        Self::InvalidToken
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge { limit }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.status().is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        }
        // no `data` key: the request never reached execution
        let body = json!({
            "errors": [{
                "message": self.public_message(),
                "extensions": { "code": self.code() },
            }]
        });
        HttpResponse::build(self.status()).json(body)
    }
}
