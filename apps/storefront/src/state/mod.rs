//! # State Module
//!
//! Owns the application's state containers.
//!
//! ## Why Separate Stores?
//! The cart and the wishlist are independent: a wishlist change never
//! touches the cart and vice versa. Each gets its own container, and each
//! command takes exactly the containers it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront (provider)                      │   │
//! │  │  Storefront::new(catalog, cart, wishlist, config, notifier)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │     ┌──────────────┬─────────┼─────────┬──────────────┐                │
//! │     ▼              ▼         ▼         ▼              ▼                 │
//! │  Catalog      CartStore  WishlistStore AppConfig   Notifier            │
//! │  (immutable)  (watch)    (watch)       (read-only) (toasts)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is a global: every collaborator is handed in by the caller,
//! so tests build a `Storefront` around their own stores.

mod cart;
mod config;
mod wishlist;

use std::sync::Arc;

use storefront_core::Catalog;

use crate::notify::Notifier;

pub use cart::CartStore;
pub use config::AppConfig;
pub use wishlist::WishlistStore;

/// Everything a view needs, bundled for injection.
#[derive(Clone)]
pub struct Storefront {
    pub catalog: Arc<Catalog>,
    pub cart: CartStore,
    pub wishlist: WishlistStore,
    pub config: Arc<AppConfig>,
    pub notifier: Arc<dyn Notifier>,
}

impl Storefront {
    pub fn new(
        catalog: Arc<Catalog>,
        cart: CartStore,
        wishlist: WishlistStore,
        config: Arc<AppConfig>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Storefront {
            catalog,
            cart,
            wishlist,
            config,
            notifier,
        }
    }

    /// Fresh, empty stores over the demo catalog.
    pub fn with_mock_catalog(config: AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        Storefront::new(
            Arc::new(Catalog::mock()),
            CartStore::new(),
            WishlistStore::new(),
            Arc::new(config),
            notifier,
        )
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog.len())
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
