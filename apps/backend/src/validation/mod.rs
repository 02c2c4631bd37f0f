//! Field-level input validation.
//!
//! Every function here is pure. Single-field checks return one
//! [`ValidationError`]; composite checks accumulate every violation into a
//! [`ValidationErrors`] set instead of stopping at the first one.

pub mod error;
pub mod rules;

pub use error::{ValidationCode, ValidationError, ValidationErrors};
pub use rules::{
    validate_customer_create, validate_customer_update, validate_email, validate_id,
    validate_name, validate_pagination, validate_password, validate_required, MAX_EMAIL_LEN,
    MAX_NAME_LEN, MAX_PAGE_LIMIT, MIN_NAME_LEN,
};
