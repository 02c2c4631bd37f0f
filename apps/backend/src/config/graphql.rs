use std::env;

use crate::error::AppError;
use crate::graphql::classify::ClassifierMode;

/// Classifier mode from `GRAPHQL_AUTH_CLASSIFIER`; unset means `parsed`.
pub fn classifier_mode_from_env() -> Result<ClassifierMode, AppError> {
    match env::var("GRAPHQL_AUTH_CLASSIFIER") {
        Ok(raw) => raw.parse::<ClassifierMode>().map_err(|_| {
            AppError::config(format!(
                "GRAPHQL_AUTH_CLASSIFIER must be 'parsed' or 'substring', got '{raw}'"
            ))
        }),
        Err(_) => Ok(ClassifierMode::default()),
    }
}
