//! # Checkout Command
//!
//! Places an order from the current cart.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Place Order                                          │
//! │                                                                         │
//! │  1. Snapshot cart + validate form ── fail ──► "Checkout failed" toast   │
//! │         │                                    (cart untouched)          │
//! │         ▼                                                               │
//! │  2. Simulated payment (config.payment_delay, 2s by default)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Clear cart ──► "Order placed successfully!" toast ──► Order         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no payment processor; the delay only stands in for one.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use storefront_core::{CartAction, CheckoutForm, Order};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::{AppConfig, CartStore};

/// Validates the form, waits out the simulated payment, then empties the
/// cart.
///
/// ## Returns
/// The placed order (lines, totals and shipping details as of submission)
///
/// ## Errors
/// - `EMPTY_CART` when there is nothing to buy
/// - `VALIDATION_ERROR` with one detail per failing field
pub async fn place_order(
    cart: &CartStore,
    config: &AppConfig,
    notifier: &dyn Notifier,
    form: CheckoutForm,
) -> Result<Order, ApiError> {
    debug!(email = %form.email, "place_order command");

    let snapshot = cart.snapshot();
    let order = match Order::from_cart(Uuid::new_v4(), &snapshot, &form, Utc::now()) {
        Ok(order) => order,
        Err(e) => {
            let err = ApiError::from(e);
            warn!(error = %err.message, "checkout rejected");
            notifier.notify(&Notification::destructive("Checkout failed", err.message.clone()));
            return Err(err);
        }
    };

    debug!(delay_ms = config.payment_delay.as_millis() as u64, "processing payment");
    tokio::time::sleep(config.payment_delay).await;

    cart.dispatch(CartAction::Clear);

    info!(
        order_id = %order.id,
        items = order.item_count,
        total = %config.format_currency(order.total),
        "order placed"
    );
    notifier.notify(&Notification::info(
        "Order placed successfully!",
        "Thank you for your purchase. You will receive a confirmation email shortly.",
    ));

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::{QueuedNotifier, Severity};
    use std::time::Duration;
    use storefront_core::{Catalog, Money, NewCartItem, ProductId};

    fn instant_config() -> AppConfig {
        AppConfig {
            payment_delay: Duration::ZERO,
            ..AppConfig::default()
        }
    }

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "10001".to_string(),
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/30".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Ada Lovelace".to_string(),
            ..CheckoutForm::default()
        }
    }

    fn cart_with_items() -> CartStore {
        let catalog = Catalog::mock();
        let cart = CartStore::new();
        for id in [1, 1, 4] {
            let product = catalog.get(ProductId::new(id)).unwrap();
            cart.dispatch(CartAction::AddItem(NewCartItem::quick_add(product).unwrap()));
        }
        cart
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let cart = cart_with_items();
        let notifier = QueuedNotifier::new();

        let order = place_order(&cart, &instant_config(), &notifier, filled_form()).await.unwrap();

        assert_eq!(order.item_count, 3);
        assert_eq!(order.total, Money::from_cents(2 * 4999 + 7999));
        assert_eq!(order.card_last_four, "4242");
        assert!(cart.read(|c| c.is_empty()));

        let toasts = notifier.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Order placed successfully!");
    }

    #[tokio::test]
    async fn test_invalid_form_keeps_cart() {
        let cart = cart_with_items();
        let notifier = QueuedNotifier::new();
        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            cvv: "12".to_string(),
            ..filled_form()
        };

        let err = place_order(&cart, &instant_config(), &notifier, form).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.details.len(), 2);
        assert_eq!(cart.read(|c| c.total_item_count()), 3);
        assert_eq!(notifier.drain()[0].severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let err = place_order(&CartStore::new(), &instant_config(), &QueuedNotifier::new(), filled_form())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[tokio::test(start_paused = true)]
    async fn test_payment_delay_is_honoured() {
        let cart = cart_with_items();
        let config = AppConfig::default();
        let start = tokio::time::Instant::now();

        place_order(&cart, &config, &QueuedNotifier::new(), filled_form()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
