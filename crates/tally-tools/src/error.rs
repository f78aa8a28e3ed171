//! Input validation errors shared by every calculator.
//!
//! There is exactly one error class in the suite: a required field that is
//! missing, non-numeric, or outside its valid range. Hosts surface it next
//! to the offending field (or disable the compute action outright); nothing
//! is retried and nothing is fatal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputError {
    /// Name of the offending field, matching the catalog's field spec.
    pub field: String,
    /// Human-readable reason, ready for display.
    pub message: String,
}

impl InputError {
    /// Create an error for `field` with a display-ready message.
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for InputError {}

/// The value must be a finite number strictly greater than zero.
pub(crate) fn require_positive(field: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::new(field, "must be a positive number"))
    }
}

/// The value must be a finite number, zero allowed.
pub(crate) fn require_non_negative(field: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::new(field, "must be zero or greater"))
    }
}

/// The value must be finite and inside `min..=max`.
pub(crate) fn require_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, InputError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::new(
            field,
            format!("must be between {min} and {max}"),
        ))
    }
}
