//! # Cart Commands
//!
//! Commands behind the product card, the detail page and the cart sidebar.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       place_order         │
//! │                   quick_add_to_cart                 (checkout.rs)       │
//! │                   change_cart_quantity                   │              │
//! │                   remove_from_cart                       ▼              │
//! │                        │                           cart cleared         │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use storefront_core::validation::validate_line_quantity;
use storefront_core::{
    CartAction, CartLineItem, CartState, CartTotals, Catalog, NewCartItem, ProductId,
    ValidationError, VariantKey,
};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::CartStore;

/// Most units the detail page adds in one click, even when more are in
/// stock.
pub const MAX_ADD_QUANTITY: i64 = 99;

/// Cart response including items, totals and the panel flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
    pub is_panel_open: bool,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
            is_panel_open: cart.is_panel_open(),
        }
    }
}

fn respond(cart: &CartStore) -> CartResponse {
    cart.read(|s| CartResponse::from(s))
}

/// Checks that the row for `key` can take `adding` more units.
pub(crate) fn ensure_room(cart: &CartStore, key: &VariantKey, adding: i64) -> Result<(), ValidationError> {
    let current = cart.read(|c| c.find(key).map_or(0, |line| line.quantity));
    validate_line_quantity(current.saturating_add(adding))
}

fn item_removed(notifier: &dyn Notifier) {
    notifier.notify(&Notification::info(
        "Item removed",
        "Item has been removed from your cart",
    ));
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    respond(cart)
}

/// Adds a chosen variant from the detail page, then opens the cart.
///
/// ## Behavior
/// - Blank size or color: "Selection Required" toast, nothing added
/// - Size or color not offered by the product: validation error
/// - Out of stock: "Out of Stock" toast, nothing added
/// - Each unit merges like a separate add, so an existing row grows by
///   `quantity`
///
/// ## Arguments
/// * `quantity` - Units to add (default: 1, at most the stock count or
///   [`MAX_ADD_QUANTITY`], whichever is lower)
pub fn add_to_cart(
    catalog: &Catalog,
    cart: &CartStore,
    notifier: &dyn Notifier,
    product_id: ProductId,
    size: &str,
    color: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(%product_id, size, color, quantity, "add_to_cart command");

    let product = catalog.get_or_err(product_id)?;

    if size.trim().is_empty() || color.trim().is_empty() {
        notifier.notify(&Notification::destructive(
            "Selection Required",
            "Please select size and color before adding to cart",
        ));
        let field = if size.trim().is_empty() { "size" } else { "color" };
        return Err(ValidationError::required(field).into());
    }

    if !product.is_in_stock() {
        notifier.notify(&Notification::destructive(
            "Out of Stock",
            format!("{} is currently unavailable", product.name),
        ));
        return Err(ValidationError::OutOfStock {
            product: product.name.clone(),
        }
        .into());
    }

    let max = MAX_ADD_QUANTITY.min(i64::from(product.stock_count));
    if !(1..=max).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: max.to_string(),
        }
        .into());
    }

    for (field, value, offered) in [("size", size, &product.sizes), ("color", color, &product.colors)] {
        if !offered.is_empty() && !offered.iter().any(|o| o == value) {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: format!("'{}' is not offered for {}", value, product.name),
            }
            .into());
        }
    }

    let item = NewCartItem::from_product(product, size, color)?;
    ensure_room(cart, &item.key(), quantity)?;
    for _ in 0..quantity {
        cart.dispatch(CartAction::AddItem(item.clone()));
    }
    cart.dispatch(CartAction::OpenPanel);

    notifier.notify(&Notification::info(
        "Added to Cart",
        format!("{} {} added to your cart", quantity, product.name),
    ));

    Ok(respond(cart))
}

/// One-click add from a product card: first size and color, then the
/// cart opens.
pub fn quick_add_to_cart(
    catalog: &Catalog,
    cart: &CartStore,
    notifier: &dyn Notifier,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(%product_id, "quick_add_to_cart command");

    let product = catalog.get_or_err(product_id)?;
    let item = NewCartItem::quick_add(product)?;
    ensure_room(cart, &item.key(), 1)?;

    cart.dispatch(CartAction::AddItem(item));
    cart.dispatch(CartAction::OpenPanel);

    notifier.notify(&Notification::info(
        "Added to Cart",
        format!("{} added to your cart", product.name),
    ));

    Ok(respond(cart))
}

/// Sidebar +/- buttons: moves a row's quantity by `delta`.
///
/// Dropping to zero or below removes the row and shows "Item removed".
/// Growing past [`storefront_core::MAX_LINE_QUANTITY`] is rejected.
pub fn change_cart_quantity(
    cart: &CartStore,
    notifier: &dyn Notifier,
    key: &VariantKey,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(%key, delta, "change_cart_quantity command");

    let current = cart
        .read(|c| c.find(key).map(|line| line.quantity))
        .ok_or_else(|| ApiError::not_found("Cart item", key))?;

    let quantity = current.saturating_add(delta);
    validate_line_quantity(quantity)?;
    if quantity <= 0 {
        cart.dispatch(CartAction::RemoveItem(key.clone()));
        item_removed(notifier);
    } else {
        cart.dispatch(CartAction::SetQuantity {
            key: key.clone(),
            quantity,
        });
    }

    Ok(respond(cart))
}

/// Overwrites a row's quantity. Unknown keys leave the cart untouched.
///
/// ## Errors
/// - `VALIDATION_ERROR` above [`storefront_core::MAX_LINE_QUANTITY`]
pub fn set_cart_quantity(
    cart: &CartStore,
    notifier: &dyn Notifier,
    key: &VariantKey,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(%key, quantity, "set_cart_quantity command");

    validate_line_quantity(quantity)?;

    let changed = cart.dispatch(CartAction::SetQuantity {
        key: key.clone(),
        quantity,
    });
    if changed && quantity <= 0 {
        item_removed(notifier);
    }

    Ok(respond(cart))
}

/// Removes a row from the cart.
pub fn remove_from_cart(cart: &CartStore, notifier: &dyn Notifier, key: &VariantKey) -> CartResponse {
    debug!(%key, "remove_from_cart command");

    if cart.dispatch(CartAction::RemoveItem(key.clone())) {
        item_removed(notifier);
    }

    respond(cart)
}

/// Empties the cart. The panel stays as it was.
pub fn clear_cart(cart: &CartStore) -> CartResponse {
    debug!("clear_cart command");
    cart.dispatch(CartAction::Clear);
    respond(cart)
}

/// Opens or closes the cart sidebar.
pub fn toggle_cart_panel(cart: &CartStore) -> CartResponse {
    debug!("toggle_cart_panel command");
    cart.dispatch(CartAction::TogglePanel);
    respond(cart)
}
