//! Validation errors raised by the pricing engine

use serde::Serialize;
use std::fmt;

/// Required numeric input checked before pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    Hectares,
    CapexUsd,
}

impl InputField {
    /// Name of the field as it appears in request payloads and CSV headers
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::Hectares => "hectares",
            InputField::CapexUsd => "capexUsd",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only failure mode of a quote: a required input is missing or unusable
///
/// No default is ever substituted for `hectares` or `capexUsd`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: InputField },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: InputField, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: InputField, value: f64 },

    /// The input is valid but a derived dollar figure would overflow `f64`
    #[error("{field} is too large to price, got {value}")]
    OutOfRange { field: InputField, value: f64 },
}

impl ValidationError {
    /// The field that failed validation
    pub fn field(&self) -> InputField {
        match self {
            ValidationError::Missing { field }
            | ValidationError::NotFinite { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Check that a required input is present, finite and strictly positive
pub fn require_positive(field: InputField, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(value)
}
