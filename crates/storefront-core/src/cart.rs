//! # Cart State
//!
//! The cart's line items, its panel flag, and the pure transition function
//! every cart mutation goes through.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  View Action              CartAction              State Change          │
//! │  ───────────              ──────────              ────────────          │
//! │                                                                         │
//! │  Add to Cart ────────────► AddItem ──────────────► key exists? qty += 1 │
//! │                                                    else push(qty = 1)   │
//! │                                                                         │
//! │  +/- buttons ────────────► SetQuantity ──────────► qty = n, or remove   │
//! │                                                    the row when n <= 0  │
//! │                                                                         │
//! │  Trash icon ─────────────► RemoveItem ───────────► retain(key != k)     │
//! │                                                                         │
//! │  Order placed ───────────► Clear ────────────────► items.clear()        │
//! │                                                                         │
//! │  Cart icon ──────────────► Open/Close/TogglePanel ► is_panel_open only  │
//! │                                                                         │
//! │  Unknown keys are no-ops, never errors.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLineItem, NewCartItem, VariantKey};

// =============================================================================
// Actions
// =============================================================================

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Merge into the matching row (+1) or append a new row with quantity 1.
    AddItem(NewCartItem),
    /// Drop the matching row, if any.
    RemoveItem(VariantKey),
    /// Overwrite the matching row's quantity; `<= 0` removes the row.
    SetQuantity { key: VariantKey, quantity: i64 },
    /// Empty the item list. The panel flag is kept.
    Clear,
    OpenPanel,
    ClosePanel,
    TogglePanel,
}

// =============================================================================
// Cart State
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one row per `(product_id, size, color)`
/// - Every row has `quantity >= 1`
/// - Rows stay in insertion order; mutations never reorder them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
    is_panel_open: bool,
}

impl CartState {
    /// Creates an empty cart with the panel closed.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Applies an action in place.
    ///
    /// ## Returns
    /// `true` when the observable state changed, so containers can skip
    /// notifying views on no-ops.
    pub fn apply(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::AddItem(item) => {
                let key = item.key();
                if let Some(line) = self.items.iter_mut().find(|line| line.matches(&key)) {
                    line.quantity = line.quantity.saturating_add(1);
                } else {
                    self.items.push(CartLineItem::from_new(item));
                }
                true
            }
            CartAction::RemoveItem(key) => {
                let before = self.items.len();
                self.items.retain(|line| !line.matches(&key));
                self.items.len() != before
            }
            CartAction::SetQuantity { key, quantity } => {
                let Some(index) = self.items.iter().position(|line| line.matches(&key)) else {
                    return false;
                };
                if quantity <= 0 {
                    self.items.remove(index);
                    return true;
                }
                match self.items.get_mut(index) {
                    Some(line) if line.quantity != quantity => {
                        line.quantity = quantity;
                        true
                    }
                    _ => false,
                }
            }
            CartAction::Clear => {
                let changed = !self.items.is_empty();
                self.items.clear();
                changed
            }
            CartAction::OpenPanel => self.set_panel(true),
            CartAction::ClosePanel => self.set_panel(false),
            CartAction::TogglePanel => self.set_panel(!self.is_panel_open),
        }
    }

    fn set_panel(&mut self, open: bool) -> bool {
        let changed = self.is_panel_open != open;
        self.is_panel_open = open;
        changed
    }

    /// Rows in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_panel_open(&self) -> bool {
        self.is_panel_open
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct rows.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// The row for a variant key.
    pub fn find(&self, key: &VariantKey) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Sum of quantities across all rows.
    pub fn total_item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of `unit_price × quantity`, exact to the cent. Saturates rather
    /// than overflowing.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Pure transition: returns the state after `action`.
///
/// ## Example
/// ```rust
/// use storefront_core::cart::{reduce, CartAction, CartState};
///
/// let opened = reduce(CartState::new(), CartAction::OpenPanel);
/// assert!(opened.is_panel_open());
/// assert!(opened.items().is_empty());
/// ```
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    state.apply(action);
    state
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart summary for the header badge and the sidebar footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_item_count: i64,
    pub total_price: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_item_count: cart.total_item_count(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn item(id: u32, size: &str, color: &str, price_cents: i64) -> NewCartItem {
        NewCartItem::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(price_cents),
            format!("https://img/{}", id),
            size,
            color,
        )
        .unwrap()
    }

    fn key(id: u32, size: &str, color: &str) -> VariantKey {
        VariantKey::new(ProductId::new(id), size, color)
    }

    fn run(actions: Vec<CartAction>) -> CartState {
        actions.into_iter().fold(CartState::new(), reduce)
    }

    #[test]
    fn test_repeated_add_merges_quantity() {
        let cart = run((0..5).map(|_| CartAction::AddItem(item(1, "M", "red", 1000))).collect());

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_variants_are_separate_rows() {
        let cart = run(vec![
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::AddItem(item(1, "M", "blue", 1000)),
        ]);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.items()[0].key(), key(1, "M", "red"));
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].key(), key(1, "M", "blue"));
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_merge_keeps_original_snapshot() {
        let first = item(1, "M", "red", 1000);
        let repriced = NewCartItem::new(ProductId::new(1), "Renamed", Money::from_cents(1), "x", "M", "red").unwrap();

        let cart = run(vec![CartAction::AddItem(first), CartAction::AddItem(repriced)]);

        assert_eq!(cart.items()[0].name, "Product 1");
        assert_eq!(cart.items()[0].unit_price, Money::from_cents(1000));
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let mut cart = run(vec![
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::AddItem(item(2, "L", "black", 500)),
        ]);

        assert!(cart.apply(CartAction::RemoveItem(key(1, "M", "red"))));
        assert!(cart.find(&key(1, "M", "red")).is_none());

        // absent key: no-op, still absent
        assert!(!cart.apply(CartAction::RemoveItem(key(1, "M", "red"))));
        assert!(!cart.apply(CartAction::RemoveItem(key(9, "S", "green"))));
        assert!(cart.find(&key(1, "M", "red")).is_none());
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        for quantity in [0, -1, -50] {
            let cart = run(vec![
                CartAction::AddItem(item(1, "M", "red", 1000)),
                CartAction::AddItem(item(2, "M", "red", 1000)),
                CartAction::SetQuantity {
                    key: key(1, "M", "red"),
                    quantity,
                },
            ]);
            assert!(cart.find(&key(1, "M", "red")).is_none());
            assert_eq!(cart.line_count(), 1);
        }
    }

    #[test]
    fn test_set_quantity_updates_and_ignores_unknown() {
        let mut cart = run(vec![CartAction::AddItem(item(1, "M", "red", 250))]);

        assert!(cart.apply(CartAction::SetQuantity {
            key: key(1, "M", "red"),
            quantity: 4,
        }));
        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.total_price(), Money::from_cents(1000));

        let before = cart.clone();
        assert!(!cart.apply(CartAction::SetQuantity {
            key: key(1, "M", "blue"),
            quantity: 7,
        }));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear_preserves_panel() {
        let cart = run(vec![
            CartAction::OpenPanel,
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::Clear,
        ]);
        assert!(cart.is_empty());
        assert!(cart.is_panel_open());
    }

    #[test]
    fn test_panel_operations_never_touch_items() {
        let with_panel = run(vec![
            CartAction::OpenPanel,
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::ClosePanel,
        ]);
        let plain = run(vec![CartAction::AddItem(item(1, "M", "red", 1000))]);

        assert_eq!(with_panel.items(), plain.items());
        assert!(!with_panel.is_panel_open());

        let toggled = run(vec![CartAction::TogglePanel]);
        assert!(toggled.is_panel_open());
        let toggled = reduce(toggled, CartAction::TogglePanel);
        assert!(!toggled.is_panel_open());
    }

    #[test]
    fn test_total_price_is_exact_and_stable() {
        let mut cart = run(vec![
            CartAction::AddItem(item(1, "M", "red", 4999)),
            CartAction::AddItem(item(1, "M", "red", 4999)),
            CartAction::AddItem(item(2, "S", "blue", 12999)),
            CartAction::AddItem(item(3, "L", "green", 10)),
        ]);
        cart.apply(CartAction::SetQuantity {
            key: key(3, "L", "green"),
            quantity: 3,
        });
        cart.apply(CartAction::RemoveItem(key(2, "S", "blue")));

        let expected: i64 = cart.items().iter().map(|l| l.unit_price.cents() * l.quantity).sum();
        assert_eq!(cart.total_price().cents(), expected);
        assert_eq!(cart.total_price().cents(), 4999 * 2 + 10 * 3);
        assert_eq!(cart.total_price(), cart.total_price());
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let cart = run(vec![
            CartAction::AddItem(item(3, "M", "red", 100)),
            CartAction::AddItem(item(1, "M", "red", 100)),
            CartAction::AddItem(item(2, "M", "red", 100)),
            CartAction::AddItem(item(3, "M", "red", 100)),
            CartAction::SetQuantity {
                key: key(1, "M", "red"),
                quantity: 9,
            },
        ]);
        let order: Vec<u32> = cart.items().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_totals_summary() {
        let cart = run(vec![
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::AddItem(item(1, "M", "red", 1000)),
            CartAction::AddItem(item(2, "M", "red", 250)),
        ]);
        let totals = cart.totals();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_item_count, 3);
        assert_eq!(totals.total_price, Money::from_cents(2250));
    }

    #[test]
    fn test_huge_quantity_totals_saturate() {
        let cart = run(vec![
            CartAction::AddItem(item(1, "XS", "white", 4999)),
            CartAction::AddItem(item(2, "M", "blue", 12999)),
            CartAction::SetQuantity {
                key: key(1, "XS", "white"),
                quantity: i64::MAX / 2,
            },
            CartAction::SetQuantity {
                key: key(2, "M", "blue"),
                quantity: i64::MAX,
            },
        ]);

        let totals = cart.totals();
        assert_eq!(totals.total_item_count, i64::MAX);
        assert_eq!(totals.total_price.cents(), i64::MAX);

        let grown = reduce(cart, CartAction::AddItem(item(2, "M", "blue", 12999)));
        assert_eq!(grown.items()[1].quantity, i64::MAX);
    }
}
