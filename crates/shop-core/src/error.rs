//! # Error Types
//!
//! Domain-specific error types for shop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shop-core errors (this file)                                          │
//! │  └── ValidationError  - Field rule violations, raised before storage   │
//! │                                                                         │
//! │  shop-db errors (separate crate)                                       │
//! │  └── DbError          - NotFound, integrity, infrastructure failures   │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::Validation → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in every message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything is written, so a failed create or update never
/// leaves a partial record behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., slug with spaces, unparsable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Decimal value carries more digits than its column allows.
    ///
    /// ## When This Occurs
    /// ```text
    /// price = 12345678901.23   (11 integer digits)
    ///      │
    ///      ▼
    /// decimal(10, 2) allows 8 integer digits
    ///      │
    ///      ▼
    /// TooManyDigits { field: "price", max_digits: 10, decimal_places: 2 }
    /// ```
    #[error("{field} must have at most {max_digits} digits with {decimal_places} decimal places")]
    TooManyDigits {
        field: String,
        max_digits: u32,
        decimal_places: u32,
    },

    /// Referenced record does not exist (e.g., product pointing at a
    /// deleted category).
    #[error("{field} {id} does not exist")]
    UnknownReference { field: String, id: i64 },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a TooLong error for a field.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Creates an InvalidFormat error for a field.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::TooManyDigits { field, .. }
            | ValidationError::UnknownReference { field, .. } => field,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("slug");
        assert_eq!(err.to_string(), "slug is required");

        let err = ValidationError::too_long("name", 200);
        assert_eq!(err.to_string(), "name must be at most 200 characters");

        let err = ValidationError::TooManyDigits {
            field: "price".to_string(),
            max_digits: 10,
            decimal_places: 2,
        };
        assert_eq!(
            err.to_string(),
            "price must have at most 10 digits with 2 decimal places"
        );

        let err = ValidationError::UnknownReference {
            field: "category".to_string(),
            id: 42,
        };
        assert_eq!(err.to_string(), "category 42 does not exist");
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(ValidationError::required("name").field(), "name");
        assert_eq!(
            ValidationError::invalid_format("slug", "bad").field(),
            "slug"
        );
    }
}
