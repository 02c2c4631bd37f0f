use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Machine-readable validation codes.
///
/// Each variant serializes to the SCREAMING_SNAKE_CASE string clients see in
/// `extensions.validationErrors[].code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    RequiredField,
    MaxLengthExceeded,
    MinLength,
    InvalidFormat,
    MissingUpdateFields,
    InvalidValue,
    MaxValueExceeded,
}

impl ValidationCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValidationCode::RequiredField => "REQUIRED_FIELD",
            ValidationCode::MaxLengthExceeded => "MAX_LENGTH_EXCEEDED",
            ValidationCode::MinLength => "MIN_LENGTH",
            ValidationCode::InvalidFormat => "INVALID_FORMAT",
            ValidationCode::MissingUpdateFields => "MISSING_UPDATE_FIELDS",
            ValidationCode::InvalidValue => "INVALID_VALUE",
            ValidationCode::MaxValueExceeded => "MAX_VALUE_EXCEEDED",
        }
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
    pub code: ValidationCode,
}

impl ValidationError {
    pub const fn new(field: &'static str, message: &'static str, code: ValidationCode) -> Self {
        Self {
            field,
            message,
            code,
        }
    }
}

/// Ordered set of violations collected by one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error side of a single-field check.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.errors.push(error);
        }
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn codes(&self) -> Vec<ValidationCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// `Ok(())` when nothing was recorded, otherwise the whole set.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
