//! # Wishlist Store
//!
//! The single wishlist instance, built the same way as the cart store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use storefront_core::{ProductId, WishlistAction, WishlistState};

/// Shared handle to the wishlist. Clones refer to the same wishlist.
#[derive(Debug, Clone)]
pub struct WishlistStore {
    tx: Arc<watch::Sender<WishlistState>>,
}

impl WishlistStore {
    pub fn new() -> Self {
        Self::with_state(WishlistState::new())
    }

    pub fn with_state(initial: WishlistState) -> Self {
        let (tx, _) = watch::channel(initial);
        WishlistStore { tx: Arc::new(tx) }
    }

    /// Applies an action. Returns whether the wishlist changed.
    pub fn dispatch(&self, action: WishlistAction) -> bool {
        trace!(?action, "wishlist dispatch");
        self.tx.send_if_modified(|state| state.apply(action))
    }

    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&WishlistState) -> R,
    {
        let wishlist = self.tx.borrow();
        f(&wishlist)
    }

    pub fn snapshot(&self) -> WishlistState {
        self.tx.borrow().clone()
    }

    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.read(|w| w.is_in_wishlist(product_id))
    }

    pub fn subscribe(&self) -> watch::Receiver<WishlistState> {
        self.tx.subscribe()
    }
}

impl Default for WishlistStore {
    fn default() -> Self {
        Self::new()
    }
}
