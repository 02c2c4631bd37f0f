use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Non-2xx answer whose body is not a GraphQL envelope.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// First entry of the response's `errors` array.
    #[error("GraphQL error: {message}")]
    Graphql {
        message: String,
        code: Option<String>,
    },
    #[error("response carried no data for `{field}`")]
    MissingData { field: String },
    #[error("token file {path}: {source}")]
    TokenStore {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not locate the home directory")]
    NoHomeDir,
}

impl ClientError {
    /// `extensions.code` of a GraphQL error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Graphql { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
