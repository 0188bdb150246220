//! # Cart Store
//!
//! The single cart instance for the running client.
//!
//! ## Change Notification
//! The state sits inside a `tokio::sync::watch` channel. Every mutation goes
//! through [`CartStore::dispatch`], which runs the core transition under the
//! channel's write lock and wakes subscribers only if the state changed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► dispatch(action) ──► CartState::apply ──► changed?         │
//! │                                                          │   │          │
//! │                                                   yes ◄──┘   └──► no    │
//! │                                                    │                    │
//! │                                     subscribers see changed()           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use storefront_core::{CartAction, CartState};

/// Shared handle to the cart. Clones refer to the same cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    tx: Arc<watch::Sender<CartState>>,
}

impl CartStore {
    /// Creates a store holding an empty, closed cart.
    pub fn new() -> Self {
        Self::with_state(CartState::new())
    }

    /// Creates a store around an existing state (tests, previews).
    pub fn with_state(initial: CartState) -> Self {
        let (tx, _) = watch::channel(initial);
        CartStore { tx: Arc::new(tx) }
    }

    /// Applies an action. Returns whether the cart changed.
    pub fn dispatch(&self, action: CartAction) -> bool {
        trace!(?action, "cart dispatch");
        self.tx.send_if_modified(|state| state.apply(action))
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use storefront_app::state::CartStore;
    ///
    /// let store = CartStore::new();
    /// let count = store.read(|cart| cart.total_item_count());
    /// assert_eq!(count, 0);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let cart = self.tx.borrow();
        f(&cart)
    }

    /// An owned copy of the current state.
    pub fn snapshot(&self) -> CartState {
        self.tx.borrow().clone()
    }

    /// Receives every subsequent change to the cart.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.tx.subscribe()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, NewCartItem, ProductId, VariantKey};

    fn tee() -> NewCartItem {
        NewCartItem::new(ProductId::new(1), "Tee", Money::from_cents(4999), "", "M", "white").unwrap()
    }

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::new();
        let other = store.clone();

        store.dispatch(CartAction::AddItem(tee()));
        assert_eq!(other.read(|c| c.total_item_count()), 1);
    }

    #[test]
    fn test_subscribers_only_see_real_changes() {
        let store = CartStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        // removing something absent is a no-op
        let changed = store.dispatch(CartAction::RemoveItem(VariantKey::new(ProductId::new(9), "S", "red")));
        assert!(!changed);
        assert!(!rx.has_changed().unwrap());

        assert!(store.dispatch(CartAction::AddItem(tee())));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_item_count(), 1);
    }

    #[test]
    fn test_dispatch_without_subscribers_still_applies() {
        let store = CartStore::new();
        store.dispatch(CartAction::OpenPanel);
        store.dispatch(CartAction::AddItem(tee()));
        let snapshot = store.snapshot();
        assert!(snapshot.is_panel_open());
        assert_eq!(snapshot.line_count(), 1);
    }
}
