//! Unique test data, so tests can share a database without colliding.

use uuid::Uuid;

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

/// `{prefix}-{random}`
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", suffix())
}

/// `{prefix}.{random}@example.com`, valid for the backend's email rule.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}.{}@example.com", suffix())
}
