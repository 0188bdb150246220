//! # Wishlist Commands
//!
//! Heart buttons on product cards and the detail page, plus the wishlist
//! sidebar.
//!
//! ```text
//! heart ──► toggle_wishlist ──► in wishlist? ── yes ──► RemoveItem
//!                                     │
//!                                     └── no ──► AddItem (catalog snapshot)
//!
//! sidebar ──► move_wishlist_item_to_cart ──► cart AddItem (M / default)
//!                                        ──► wishlist RemoveItem
//!                                        ──► cart OpenPanel
//! ```

use serde::Serialize;
use tracing::debug;

use storefront_core::{
    CartAction, Catalog, NewCartItem, ProductId, WishlistAction, WishlistEntry, WishlistState,
    DEFAULT_COLOR, DEFAULT_SIZE,
};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::{CartStore, WishlistStore};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<WishlistEntry>,
    pub total_item_count: usize,
    pub is_panel_open: bool,
}

impl From<&WishlistState> for WishlistResponse {
    fn from(wishlist: &WishlistState) -> Self {
        WishlistResponse {
            items: wishlist.items().to_vec(),
            total_item_count: wishlist.total_item_count(),
            is_panel_open: wishlist.is_panel_open(),
        }
    }
}

fn respond(wishlist: &WishlistStore) -> WishlistResponse {
    wishlist.read(|s| WishlistResponse::from(s))
}

fn removed(notifier: &dyn Notifier, name: &str) {
    notifier.notify(&Notification::info(
        "Removed from Wishlist",
        format!("{} removed from your wishlist", name),
    ));
}

pub fn get_wishlist(wishlist: &WishlistStore) -> WishlistResponse {
    debug!("get_wishlist command");
    respond(wishlist)
}

/// Adds the product if it is not saved yet, removes it otherwise.
pub fn toggle_wishlist(
    catalog: &Catalog,
    wishlist: &WishlistStore,
    notifier: &dyn Notifier,
    product_id: ProductId,
) -> Result<WishlistResponse, ApiError> {
    debug!(%product_id, "toggle_wishlist command");

    let product = catalog.get_or_err(product_id)?;

    if wishlist.is_in_wishlist(product_id) {
        wishlist.dispatch(WishlistAction::RemoveItem(product_id));
        removed(notifier, &product.name);
    } else {
        let entry = WishlistEntry::from_product(product)?;
        wishlist.dispatch(WishlistAction::AddItem(entry));
        notifier.notify(&Notification::info(
            "Added to Wishlist",
            format!("{} added to your wishlist", product.name),
        ));
    }

    Ok(respond(wishlist))
}

/// Removes a saved product. Unknown ids leave the wishlist untouched.
pub fn remove_from_wishlist(
    wishlist: &WishlistStore,
    notifier: &dyn Notifier,
    product_id: ProductId,
) -> WishlistResponse {
    debug!(%product_id, "remove_from_wishlist command");

    let name = wishlist.read(|w| w.find(product_id).map(|e| e.name().to_string()));
    if let Some(name) = name {
        wishlist.dispatch(WishlistAction::RemoveItem(product_id));
        removed(notifier, &name);
    }

    respond(wishlist)
}

/// Moves a saved product into the cart in the default size and color.
///
/// The cart row is built from the wishlist snapshot, so the price is the
/// one the shopper saw when saving it.
pub fn move_wishlist_item_to_cart(
    wishlist: &WishlistStore,
    cart: &CartStore,
    notifier: &dyn Notifier,
    product_id: ProductId,
) -> Result<WishlistResponse, ApiError> {
    debug!(%product_id, "move_wishlist_item_to_cart command");

    let entry = wishlist
        .read(|w| w.find(product_id).cloned())
        .ok_or_else(|| ApiError::not_found("Wishlist item", product_id))?;

    let item = NewCartItem::new(
        entry.product_id(),
        entry.name(),
        entry.unit_price(),
        entry.image_url(),
        DEFAULT_SIZE,
        DEFAULT_COLOR,
    )?;
    super::cart::ensure_room(cart, &item.key(), 1)?;

    cart.dispatch(CartAction::AddItem(item));
    wishlist.dispatch(WishlistAction::RemoveItem(product_id));
    cart.dispatch(CartAction::OpenPanel);

    notifier.notify(&Notification::info(
        "Moved to Cart",
        format!("{} moved from wishlist to cart", entry.name()),
    ));

    Ok(respond(wishlist))
}

pub fn clear_wishlist(wishlist: &WishlistStore) -> WishlistResponse {
    debug!("clear_wishlist command");
    wishlist.dispatch(WishlistAction::Clear);
    respond(wishlist)
}

/// Opens or closes the wishlist sidebar.
pub fn toggle_wishlist_panel(wishlist: &WishlistStore) -> WishlistResponse {
    debug!("toggle_wishlist_panel command");
    wishlist.dispatch(WishlistAction::TogglePanel);
    respond(wishlist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::QueuedNotifier;
    use storefront_core::VariantKey;

    #[test]
    fn test_toggle_adds_then_removes() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();
        let notifier = QueuedNotifier::new();

        let response = toggle_wishlist(&catalog, &wishlist, &notifier, ProductId::new(3)).unwrap();
        assert_eq!(response.total_item_count, 1);
        assert!(wishlist.is_in_wishlist(ProductId::new(3)));

        let response = toggle_wishlist(&catalog, &wishlist, &notifier, ProductId::new(3)).unwrap();
        assert_eq!(response.total_item_count, 0);

        let titles: Vec<String> = notifier.drain().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Added to Wishlist", "Removed from Wishlist"]);
    }

    #[test]
    fn test_toggle_unknown_product() {
        let err = toggle_wishlist(&Catalog::mock(), &WishlistStore::new(), &QueuedNotifier::new(), ProductId::new(0))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_move_to_cart_uses_default_variant() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();
        let cart = CartStore::new();
        let notifier = QueuedNotifier::new();

        toggle_wishlist(&catalog, &wishlist, &notifier, ProductId::new(6)).unwrap();
        notifier.drain();

        let response = move_wishlist_item_to_cart(&wishlist, &cart, &notifier, ProductId::new(6)).unwrap();
        assert!(response.items.is_empty());

        let key = VariantKey::new(ProductId::new(6), "M", "default");
        cart.read(|c| {
            assert!(c.is_panel_open());
            assert_eq!(c.find(&key).map(|line| line.quantity), Some(1));
        });

        let toasts = notifier.drain();
        assert_eq!(toasts[0].title, "Moved to Cart");
        assert_eq!(toasts[0].description, "Athletic Sneakers moved from wishlist to cart");

        let err = move_wishlist_item_to_cart(&wishlist, &cart, &notifier, ProductId::new(6)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();
        let notifier = QueuedNotifier::new();
        for id in [1, 2, 5] {
            toggle_wishlist(&catalog, &wishlist, &notifier, ProductId::new(id)).unwrap();
        }
        notifier.drain();

        let response = remove_from_wishlist(&wishlist, &notifier, ProductId::new(2));
        assert_eq!(response.total_item_count, 2);
        assert_eq!(notifier.drain()[0].description, "Vintage Denim Jacket removed from your wishlist");

        remove_from_wishlist(&wishlist, &notifier, ProductId::new(2));
        assert!(notifier.drain().is_empty());

        assert!(toggle_wishlist_panel(&wishlist).is_panel_open);
        let response = clear_wishlist(&wishlist);
        assert!(response.items.is_empty());
        assert!(get_wishlist(&wishlist).is_panel_open);
    }
}
