//! # Wishlist State
//!
//! Saved products and the wishlist panel flag.
//!
//! Entries are keyed by product id alone. Adding a product that is already
//! saved leaves the existing entry untouched, even if the new payload
//! carries a newer name or price: the first snapshot wins.

use serde::Serialize;
use ts_rs::TS;

use crate::types::{ProductId, WishlistEntry};

/// Every way the wishlist can change.
#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    /// Append unless the product is already saved.
    AddItem(WishlistEntry),
    RemoveItem(ProductId),
    Clear,
    OpenPanel,
    ClosePanel,
    TogglePanel,
}

/// The wishlist.
///
/// ## Invariants
/// - At most one entry per `product_id`
/// - Entries stay in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WishlistState {
    items: Vec<WishlistEntry>,
    is_panel_open: bool,
}

impl WishlistState {
    pub fn new() -> Self {
        WishlistState::default()
    }

    /// Applies an action in place; returns whether anything changed.
    pub fn apply(&mut self, action: WishlistAction) -> bool {
        match action {
            WishlistAction::AddItem(entry) => {
                if self.is_in_wishlist(entry.product_id()) {
                    return false;
                }
                self.items.push(entry);
                true
            }
            WishlistAction::RemoveItem(product_id) => {
                let before = self.items.len();
                self.items.retain(|entry| entry.product_id() != product_id);
                self.items.len() != before
            }
            WishlistAction::Clear => {
                let changed = !self.items.is_empty();
                self.items.clear();
                changed
            }
            WishlistAction::OpenPanel => self.set_panel(true),
            WishlistAction::ClosePanel => self.set_panel(false),
            WishlistAction::TogglePanel => self.set_panel(!self.is_panel_open),
        }
    }

    fn set_panel(&mut self, open: bool) -> bool {
        let changed = self.is_panel_open != open;
        self.is_panel_open = open;
        changed
    }

    pub fn items(&self) -> &[WishlistEntry] {
        &self.items
    }

    pub fn is_panel_open(&self) -> bool {
        self.is_panel_open
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|entry| entry.product_id() == product_id)
    }

    pub fn find(&self, product_id: ProductId) -> Option<&WishlistEntry> {
        self.items.iter().find(|entry| entry.product_id() == product_id)
    }

    /// Number of saved entries.
    pub fn total_item_count(&self) -> usize {
        self.items.len()
    }
}

/// Pure transition: returns the state after `action`.
pub fn reduce(mut state: WishlistState, action: WishlistAction) -> WishlistState {
    state.apply(action);
    state
}

// =============================================================================
// Unit Tests
// =============================================================================
