use crm_backend::config::db::DbKind;
use crm_backend::graphql::classify::ClassifierMode;
use crm_backend::infra::state::build_state;
use crm_backend::state::app_state::AppState;
use crm_backend::state::security_config::SecurityConfig;
use crm_backend::AppError;

/// Fresh state over a private in-memory SQLite database.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_test_state_with(ClassifierMode::Parsed).await
}

pub async fn build_test_state_with(mode: ClassifierMode) -> Result<AppState, AppError> {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::for_tests())
        .with_classifier(mode)
        .build()
        .await
}
