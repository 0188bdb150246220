//! # Validation Module
//!
//! Boundary validation for payloads entering the stores and for the
//! checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View                                                         │
//! │  └── Immediate feedback next to the form field                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Payload constructors (NewCartItem::new, WishlistEntry::new)  │
//! │  └── THIS MODULE: non-negative prices, non-blank keys                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store transitions                                            │
//! │  └── Total functions, trust the typed payload                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum number of characters in a card security code.
pub const MIN_CVV_LENGTH: usize = 3;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Premium Cotton T-Shirt").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::OutOfRange {
            field: "name length".to_string(),
            min: "1".to_string(),
            max: "200".to_string(),
        });
    }

    Ok(())
}

/// Validates that a field has at least `min` characters after trimming.
pub fn validate_min_length(field: &str, value: &str, min: usize) -> ValidationResult<()> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }
    Ok(())
}

/// Validates an email address shape: `local@domain.tld`, no whitespace.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_email;
///
/// assert!(validate_email("jane@example.com").is_ok());
/// assert!(validate_email("jane@example").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "invalid email address".to_string(),
    };

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a review rating (0.0 to 5.0 inclusive, finite).
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: "0".to_string(),
            max: "5".to_string(),
        });
    }
    Ok(())
}

/// Validates a price filter range (`min <= max`, both non-negative).
pub fn validate_price_range(min: Money, max: Money) -> ValidationResult<()> {
    validate_price("minimum price", min)?;
    validate_price("maximum price", max)?;

    if min > max {
        return Err(ValidationError::InvalidRange {
            field: "price range".to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

/// Validates the quantity a cart row would end up holding.
///
/// Zero and below are allowed (they remove the row); only the upper bound
/// is checked.
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_LINE_QUANTITY.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
