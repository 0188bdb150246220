//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Catalog lookups, checkout preconditions        │
//! │  └── ValidationError  - Payload and form validation failures           │
//! │                                                                         │
//! │  App errors (apps/storefront)                                          │
//! │  └── ApiError         - What views see (serialized)                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart and wishlist transitions have no error type at all: unknown keys on
//! removal or update are no-ops. Errors only arise at the boundary, when a
//! payload is built or a form is submitted.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Storefront domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Nothing left to sell.
    #[error("{product} is out of stock")]
    OutOfStock { product: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Lower bound of a range exceeds its upper bound.
    #[error("{field} minimum {min} is greater than maximum {max}")]
    InvalidRange { field: String, min: String, max: String },

    /// Invalid format (e.g., malformed email, unparseable number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Several fields failed at once (form submission).
    #[error("{} fields are invalid", .0.len())]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    /// Flattens the error into the list of individual field errors.
    pub fn into_field_errors(self) -> Vec<ValidationError> {
        match self {
            ValidationError::Multiple(errors) => errors,
            other => vec![other],
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound(ProductId::new(42));
        assert_eq!(err.to_string(), "Product not found: 42");
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("email").to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "cvv".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "cvv must be at least 3 characters");

        let err = ValidationError::Multiple(vec![
            ValidationError::required("city"),
            ValidationError::required("state"),
        ]);
        assert_eq!(err.to_string(), "2 fields are invalid");
    }

    #[test]
    fn test_into_field_errors() {
        let single = ValidationError::required("city");
        assert_eq!(single.clone().into_field_errors(), vec![single]);

        let multi = ValidationError::Multiple(vec![
            ValidationError::required("city"),
            ValidationError::required("state"),
        ]);
        assert_eq!(multi.into_field_errors().len(), 2);
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
