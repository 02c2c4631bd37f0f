use lazy_regex::regex_is_match;

use super::error::{ValidationCode, ValidationError, ValidationErrors};

pub const MAX_EMAIL_LEN: usize = 255;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PAGE_LIMIT: i32 = 100;

// Lengths are byte lengths.

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new(
            "email",
            "Email is required",
            ValidationCode::RequiredField,
        ));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new(
            "email",
            "Email must not exceed 255 characters",
            ValidationCode::MaxLengthExceeded,
        ));
    }
    if !regex_is_match!(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$", email) {
        return Err(ValidationError::new(
            "email",
            "Invalid email format",
            ValidationCode::InvalidFormat,
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new(
            "name",
            "Name is required",
            ValidationCode::RequiredField,
        ));
    }
    if name.len() < MIN_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            "Name must be at least 2 characters long",
            ValidationCode::MinLength,
        ));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::new(
            "name",
            "Name must not exceed 100 characters",
            ValidationCode::MaxLengthExceeded,
        ));
    }
    Ok(())
}

/// IDs travel as strings and must be plain ASCII decimal digits.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new(
            "id",
            "ID is required",
            ValidationCode::RequiredField,
        ));
    }
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(
            "id",
            "ID must be a valid number",
            ValidationCode::InvalidFormat,
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new(
            "password",
            "Password is required",
            ValidationCode::RequiredField,
        ));
    }
    Ok(())
}

pub fn validate_customer_create(name: &str, email: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_name(name));
    errors.check(validate_email(email));
    errors.into_result()
}

pub fn validate_customer_update(
    id: &str,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.check(validate_id(id));

    if name.is_none() && email.is_none() {
        errors.push(ValidationError::new(
            "input",
            "At least one field (name or email) must be provided for update",
            ValidationCode::MissingUpdateFields,
        ));
    }
    if let Some(name) = name {
        errors.check(validate_name(name));
    }
    if let Some(email) = email {
        errors.check(validate_email(email));
    }
    errors.into_result()
}

/// `page` is the page size (limit), not a page number.
pub fn validate_pagination(page: Option<i32>, offset: Option<i32>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(page) = page {
        if page < 0 {
            errors.push(ValidationError::new(
                "page",
                "Page limit must be a positive number",
                ValidationCode::InvalidValue,
            ));
        }
        if page > MAX_PAGE_LIMIT {
            errors.push(ValidationError::new(
                "page",
                "Page limit must not exceed 100",
                ValidationCode::MaxValueExceeded,
            ));
        }
    }
    if let Some(offset) = offset {
        if offset < 0 {
            errors.push(ValidationError::new(
                "offset",
                "Offset must be a non-negative number",
                ValidationCode::InvalidValue,
            ));
        }
    }
    errors.into_result()
}

/// Required free-text field: present and not only whitespace.
pub fn validate_required(
    value: &str,
    field: &'static str,
    message: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, message, ValidationCode::RequiredField));
    }
    Ok(())
}
