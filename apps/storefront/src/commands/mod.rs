//! # Commands Module
//!
//! Every operation a view can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Grid filtering, detail page, related products
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── wishlist.rs  ◄─── Wishlist toggling, move to cart
//! └── checkout.rs  ◄─── Order placement
//! ```
//!
//! ## State Injection
//! Each command takes only the containers it needs, as plain borrows:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartStore) -> CartResponse
//!
//! // Needs the catalog to snapshot the product, plus a toast sink
//! fn quick_add_to_cart(catalog: &Catalog, cart: &CartStore, notifier: &dyn Notifier, ..)
//!
//! // Touches both containers
//! fn move_wishlist_item_to_cart(wishlist: &WishlistStore, cart: &CartStore, ..)
//! ```
//!
//! Toasts are sent here, after the store accepted the change; the stores
//! never notify.

pub mod cart;
pub mod checkout;
pub mod product;
pub mod wishlist;
