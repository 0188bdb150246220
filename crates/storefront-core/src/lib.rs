//! # storefront-core: Pure State Model for the Storefront
//!
//! This crate holds the cart and wishlist state model, the product catalog
//! and its filter/sort logic, and checkout form rules. Everything here is a
//! pure function with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Views (product grid, sidebars, checkout)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          apps/storefront (CartStore, WishlistStore, Notifier)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ reduce(state, action)                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │   cart   │ │ wishlist │ │ catalog  │ │ checkout │          │   │
//! │  │   │ variants │ │  unique  │ │  filter  │ │  orders  │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and line item types (Product, CartLineItem, WishlistEntry)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation for payloads and forms
//! - [`catalog`] - The static product catalog and its lookup contract
//! - [`filter`] - Category / price / sort filtering of the product grid
//! - [`cart`] - Cart state and its transition function
//! - [`wishlist`] - Wishlist state and its transition function
//! - [`checkout`] - Checkout form and order snapshots
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::{self, CartAction, CartState};
//! use storefront_core::catalog::Catalog;
//! use storefront_core::types::{NewCartItem, ProductId};
//!
//! let catalog = Catalog::mock();
//! let tee = catalog.get(ProductId::new(1)).unwrap();
//! let item = NewCartItem::from_product(tee, "M", "white").unwrap();
//!
//! let state = cart::reduce(CartState::default(), CartAction::AddItem(item.clone()));
//! let state = cart::reduce(state, CartAction::AddItem(item));
//!
//! assert_eq!(state.items().len(), 1);
//! assert_eq!(state.total_item_count(), 2);
//! assert_eq!(state.total_price().cents(), 9998);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod filter;
pub mod money;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAction, CartState, CartTotals};
pub use catalog::Catalog;
pub use checkout::{CheckoutForm, Order};
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{CategoryFilter, PriceRange, ProductFilter, SortBy};
pub use money::Money;
pub use types::*;
pub use wishlist::{WishlistAction, WishlistState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Size used when an item is added without a size choice and the product
/// lists none.
pub const DEFAULT_SIZE: &str = "M";

/// Color used when an item is added without a color choice and the product
/// lists none.
pub const DEFAULT_COLOR: &str = "default";

/// Upper bound of the price filter slider, $200.
pub const DEFAULT_PRICE_CEILING: Money = Money::from_cents(20_000);

/// Most units a single cart row may hold. The reducer itself accepts any
/// quantity; commands check this bound before dispatching.
pub const MAX_LINE_QUANTITY: i64 = 9_999;
