//! # Error Types
//!
//! Domain-specific error types for bookpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! bookpos-core errors (this file)
//! └── ValidationError  - input validation failures, detected before any write
//!
//! bookpos-db errors (separate crate)
//! └── DbError          - database operation failures
//!
//! apps/server errors
//! └── ApiError         - what HTTP clients see (status code + JSON body)
//!
//! Flow: ValidationError → DbError → ApiError → client
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// These occur when request input doesn't meet requirements. They are raised
/// before business logic runs, so a validation failure never has side effects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A string field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A numeric field must be strictly positive.
    #[error("{field} must be a positive integer, got {value}")]
    NotPositive { field: String, value: i64 },

    /// A collection field must contain at least one element.
    #[error("{field} must not be empty")]
    EmptyList { field: String },

    /// An unrecognized reporting period was requested.
    #[error("invalid period '{value}': use 'day', 'week', 'month', or 'weekly-revenue'")]
    InvalidPeriod { value: String },
}

impl ValidationError {
    /// Creates a `Required` error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a `NotPositive` error for the given field and value.
    pub fn not_positive(field: impl Into<String>, value: i64) -> Self {
        ValidationError::NotPositive {
            field: field.into(),
            value,
        }
    }
}
