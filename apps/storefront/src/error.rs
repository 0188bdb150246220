//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Command Function ── Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── unknown product id ─── CoreError::ProductNotFound ─┐        │
//! │         ├── bad payload / form ─── ValidationError ────────────┼─► ApiError
//! │         └── checkout, empty cart ─ CoreError::EmptyCart ───────┘        │
//! │                                                                         │
//! │  Cart and wishlist transitions never fail; only the boundary does.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Views receive both a machine-readable `code` and a human-readable
//! `message`, plus one line per field when a form fails.

use serde::Serialize;
use storefront_core::{CoreError, ValidationError};

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Individual field errors, when several fields failed at once
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Checkout attempted with an empty cart
    EmptyCart,

    /// Command input could not be understood
    BadRequest,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }
}

/// Converts validation errors to API errors, one detail line per field.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = err.to_string();
        let details = match err {
            ValidationError::Multiple(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        };
        ApiError {
            code: ErrorCode::ValidationError,
            message,
            details,
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, "Your cart is empty"),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        for detail in &self.details {
            write!(f, "\n  - {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;

    #[test]
    fn test_not_found_serializes() {
        let err = ApiError::from(CoreError::ProductNotFound(ProductId::new(42)));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_multiple_validation_errors_become_details() {
        let err = ApiError::from(ValidationError::Multiple(vec![
            ValidationError::required("city"),
            ValidationError::required("state"),
        ]));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.details, vec!["city is required", "state is required"]);
        assert_eq!(
            err.to_string(),
            "[ValidationError] 2 fields are invalid\n  - city is required\n  - state is required"
        );
    }
}
