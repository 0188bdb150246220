//! # Checkout
//!
//! The checkout form's rules and the order snapshot taken from the cart.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutForm ──► validate() ──► every field error at once             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order::from_cart(id, &cart, &form, now)                                │
//! │       │   └── CoreError::EmptyCart when there is nothing to buy         │
//! │       ▼                                                                 │
//! │  (app layer) simulated payment delay ──► cart Clear ──► confirmation    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Id and timestamp are passed in so this module stays deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartState;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::CartLineItem;
use crate::validation::{validate_email, validate_min_length, validate_required, MIN_CVV_LENGTH};

/// Country preselected on the form.
pub const DEFAULT_COUNTRY: &str = "United States";

// =============================================================================
// Checkout Form
// =============================================================================

/// Shipping and payment details as typed by the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    // Shipping
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,

    // Payment
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            card_number: String::new(),
            expiry_date: String::new(),
            cvv: String::new(),
            cardholder_name: String::new(),
        }
    }
}

impl CheckoutForm {
    /// Checks every field and reports all failures together.
    ///
    /// ## Rules
    /// - All fields are required (non-blank)
    /// - `email` must look like `local@domain.tld`
    /// - `cvv` must have at least 3 characters
    ///
    /// ## Returns
    /// - `Ok(())` when the form can be submitted
    /// - a single error when exactly one field fails
    /// - `ValidationError::Multiple` when several fail
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip code", &self.zip_code),
            ("country", &self.country),
            ("card number", &self.card_number),
            ("expiry date", &self.expiry_date),
            ("cardholder name", &self.cardholder_name),
        ];

        let mut errors: Vec<ValidationError> = required
            .iter()
            .filter_map(|(field, value)| validate_required(field, value).err())
            .collect();

        if let Err(e) = validate_email(&self.email) {
            errors.push(e);
        }
        if let Err(e) = validate_min_length("cvv", &self.cvv, MIN_CVV_LENGTH) {
            errors.push(e);
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }

    /// `"First Last"`, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Last four digits of the card number, ignoring spaces and dashes.
    pub fn card_last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let start = digits.len().saturating_sub(4);
        digits[start..].iter().collect()
    }
}

// =============================================================================
// Order
// =============================================================================

/// Confirmation snapshot of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[ts(as = "String")]
    pub id: Uuid,
    pub lines: Vec<CartLineItem>,
    pub item_count: i64,
    pub total: Money,
    pub ship_to: String,
    pub email: String,
    pub card_last_four: String,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshots the cart into an order.
    ///
    /// The form is validated again here so an order can never be built
    /// from an invalid submission.
    pub fn from_cart(
        id: Uuid,
        cart: &CartState,
        form: &CheckoutForm,
        placed_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        form.validate()?;

        Ok(Order {
            id,
            lines: cart.items().to_vec(),
            item_count: cart.total_item_count(),
            total: cart.total_price(),
            ship_to: form.full_name(),
            email: form.email.trim().to_string(),
            card_last_four: form.card_last_four(),
            placed_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{reduce, CartAction};
    use crate::types::{NewCartItem, ProductId};

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Jane Doe".to_string(),
            ..CheckoutForm::default()
        }
    }

    fn cart_with_two_tees() -> CartState {
        let tee = NewCartItem::new(ProductId::new(1), "Tee", Money::from_cents(4999), "", "M", "white").unwrap();
        let cart = reduce(CartState::new(), CartAction::AddItem(tee.clone()));
        reduce(cart, CartAction::AddItem(tee))
    }

    #[test]
    fn test_default_country() {
        assert_eq!(CheckoutForm::default().country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_filled_form_is_valid() {
        assert!(filled_form().validate().is_ok());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CheckoutForm::default().validate().unwrap_err().into_field_errors();
        // ten blank required fields, email and cvv; country is prefilled
        assert_eq!(errors.len(), 12);
        assert!(errors.contains(&ValidationError::required("email")));
        assert!(errors.contains(&ValidationError::TooShort {
            field: "cvv".to_string(),
            min: 3
        }));
    }

    #[test]
    fn test_single_failure_is_not_wrapped() {
        let form = CheckoutForm {
            cvv: "12".to_string(),
            ..filled_form()
        };
        assert!(matches!(form.validate(), Err(ValidationError::TooShort { .. })));

        let form = CheckoutForm {
            email: "jane.example.com".to_string(),
            ..filled_form()
        };
        assert!(matches!(form.validate(), Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn test_card_last_four() {
        assert_eq!(filled_form().card_last_four(), "4242");
        let short = CheckoutForm {
            card_number: "12".to_string(),
            ..filled_form()
        };
        assert_eq!(short.card_last_four(), "12");
    }

    #[test]
    fn test_order_snapshot() {
        let cart = cart_with_two_tees();
        let id = Uuid::nil();
        let now = Utc::now();

        let order = Order::from_cart(id, &cart, &filled_form(), now).unwrap();
        assert_eq!(order.id, id);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.item_count, 2);
        assert_eq!(order.total, Money::from_cents(9998));
        assert_eq!(order.ship_to, "Jane Doe");
        assert_eq!(order.card_last_four, "4242");
        assert_eq!(order.placed_at, now);
    }

    #[test]
    fn test_order_requires_items_and_valid_form() {
        let empty = CartState::new();
        assert!(matches!(
            Order::from_cart(Uuid::nil(), &empty, &filled_form(), Utc::now()),
            Err(CoreError::EmptyCart)
        ));

        let cart = cart_with_two_tees();
        assert!(matches!(
            Order::from_cart(Uuid::nil(), &cart, &CheckoutForm::default(), Utc::now()),
            Err(CoreError::Validation(_))
        ));
    }
}
