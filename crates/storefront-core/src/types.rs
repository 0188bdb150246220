//! # Domain Types
//!
//! Catalog products and the two kinds of saved rows: cart line items and
//! wishlist entries.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  CartLineItem   │   │  WishlistEntry  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product_id ┐   │   │  product_id     │       │
//! │  │  price          │   │  size       ├key│   │  (unique key)   │       │
//! │  │  sizes, colors  │   │  color      ┘   │   │  unit_price     │       │
//! │  │  category       │   │  quantity > 0   │   │  category       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Name, image and price are copied from the catalog when an item is added
//! and never re-fetched, so a later catalog change does not alter what the
//! shopper already saved.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name, validate_rating, validate_required};
use crate::{DEFAULT_COLOR, DEFAULT_SIZE};

// =============================================================================
// Product Id
// =============================================================================

/// Integer identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: "must be a non-negative integer".to_string(),
            })
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category shown in the filter sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
}

impl Category {
    /// Every category, in sidebar order.
    pub const ALL: [Category; 5] = [
        Category::Tops,
        Category::Bottoms,
        Category::Dresses,
        Category::Outerwear,
        Category::Shoes,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dresses",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
        }
    }

    /// Human-readable label.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Tops => "Tops",
            Category::Bottoms => "Bottoms",
            Category::Dresses => "Dresses",
            Category::Outerwear => "Outerwear",
            Category::Shoes => "Shoes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("unknown category '{}'", s.trim()),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Pre-sale price, present when the product is discounted.
    pub original_price: Option<Money>,
    pub image_url: String,
    pub category: Category,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Average review score, 0.0 to 5.0.
    pub rating: f64,
    pub is_new: bool,
    /// Units left; caps how many the detail page adds at once.
    #[serde(default)]
    pub stock_count: u32,
}

impl Product {
    /// True when an original price above the current price is listed.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock_count > 0
    }

    /// First listed size, or [`DEFAULT_SIZE`].
    pub fn default_size(&self) -> &str {
        self.sizes.first().map_or(DEFAULT_SIZE, String::as_str)
    }

    /// First listed color, or [`DEFAULT_COLOR`].
    pub fn default_color(&self) -> &str {
        self.colors.first().map_or(DEFAULT_COLOR, String::as_str)
    }
}

// =============================================================================
// Variant Key
// =============================================================================

/// The `(product_id, size, color)` triple identifying one cart row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl VariantKey {
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        VariantKey {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({}, {})", self.product_id, self.size, self.color)
    }
}

// =============================================================================
// New Cart Item (add payload)
// =============================================================================

/// Validated payload for adding to the cart: a line item without quantity.
///
/// Fields are private so every instance went through [`NewCartItem::new`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    product_id: ProductId,
    name: String,
    unit_price: Money,
    image_url: String,
    size: String,
    color: String,
}

impl NewCartItem {
    /// Builds an add payload, validating the fields the cart relies on.
    ///
    /// ## Rules
    /// - `name` must not be blank
    /// - `unit_price` must not be negative
    /// - `size` and `color` must not be blank (they are part of the key)
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image_url: impl Into<String>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let item = NewCartItem {
            product_id,
            name: name.into(),
            unit_price,
            image_url: image_url.into(),
            size: size.into(),
            color: color.into(),
        };

        validate_product_name(&item.name)?;
        validate_price("unit price", item.unit_price)?;
        validate_required("size", &item.size)?;
        validate_required("color", &item.color)?;

        Ok(item)
    }

    /// Snapshots a catalog product in the chosen size and color.
    pub fn from_product(product: &Product, size: &str, color: &str) -> Result<Self, ValidationError> {
        NewCartItem::new(
            product.id,
            product.name.clone(),
            product.price,
            product.image_url.clone(),
            size,
            color,
        )
    }

    /// Snapshots a catalog product in its first size and color, as the
    /// product card's quick-add button does.
    pub fn quick_add(product: &Product) -> Result<Self, ValidationError> {
        NewCartItem::from_product(product, product.default_size(), product.default_color())
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// The variant key this payload merges on.
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.size.clone(), self.color.clone())
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One cart row.
///
/// ## Invariants (held by `CartState`)
/// - `quantity` is always >= 1; a row whose quantity would drop to 0 or
///   below is removed instead.
/// - No two rows share a variant key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: ProductId,
    /// Product name at time of adding (frozen).
    pub name: String,
    pub image_url: String,
    /// Price at time of adding (frozen).
    pub unit_price: Money,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

impl CartLineItem {
    pub(crate) fn from_new(item: NewCartItem) -> Self {
        CartLineItem {
            product_id: item.product_id,
            name: item.name,
            image_url: item.image_url,
            unit_price: item.unit_price,
            size: item.size,
            color: item.color,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.size.clone(), self.color.clone())
    }

    pub fn matches(&self, key: &VariantKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }
}

// =============================================================================
// Wishlist Entry
// =============================================================================

/// A saved product. Keyed by `product_id` alone; there is no variant.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    product_id: ProductId,
    name: String,
    unit_price: Money,
    original_price: Option<Money>,
    image_url: String,
    category: Category,
    rating: f64,
    is_new: bool,
}

impl WishlistEntry {
    /// Builds a wishlist entry, validating name, prices and rating.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        original_price: Option<Money>,
        image_url: impl Into<String>,
        category: Category,
        rating: f64,
        is_new: bool,
    ) -> Result<Self, ValidationError> {
        let entry = WishlistEntry {
            product_id,
            name: name.into(),
            unit_price,
            original_price,
            image_url: image_url.into(),
            category,
            rating,
            is_new,
        };

        validate_product_name(&entry.name)?;
        validate_price("unit price", entry.unit_price)?;
        if let Some(orig) = entry.original_price {
            validate_price("original price", orig)?;
        }
        validate_rating(entry.rating)?;

        Ok(entry)
    }

    /// Snapshots a catalog product.
    pub fn from_product(product: &Product) -> Result<Self, ValidationError> {
        WishlistEntry::new(
            product.id,
            product.name.clone(),
            product.price,
            product.original_price,
            product.image_url.clone(),
            product.category,
            product.rating,
            product.is_new,
        )
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn original_price(&self) -> Option<Money> {
        self.original_price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_category_parse() {
        assert_eq!("tops".parse::<Category>().unwrap(), Category::Tops);
        assert_eq!(" Shoes ".parse::<Category>().unwrap(), Category::Shoes);
        assert!("hats".parse::<Category>().is_err());
    }

    #[test]
    fn test_product_id_parse() {
        assert_eq!("7".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert!("-1".parse::<ProductId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_new_cart_item_validation() {
        let ok = NewCartItem::new(ProductId::new(1), "Tee", Money::from_cents(0), "", "M", "red");
        assert!(ok.is_ok());

        let negative = NewCartItem::new(ProductId::new(1), "Tee", Money::from_cents(-1), "", "M", "red");
        assert!(matches!(
            negative,
            Err(ValidationError::MustBeNonNegative { .. })
        ));

        let blank_name = NewCartItem::new(ProductId::new(1), "  ", Money::from_cents(100), "", "M", "red");
        assert!(matches!(blank_name, Err(ValidationError::Required { .. })));

        let blank_size = NewCartItem::new(ProductId::new(1), "Tee", Money::from_cents(100), "", "", "red");
        assert!(blank_size.is_err());
    }

    #[test]
    fn test_quick_add_uses_first_variant() {
        let catalog = Catalog::mock();
        let sneakers = catalog.get(ProductId::new(6)).unwrap();
        let item = NewCartItem::quick_add(sneakers).unwrap();
        assert_eq!(item.size(), "7");
        assert_eq!(item.color(), "white");
        assert_eq!(item.unit_price(), sneakers.price);
    }

    #[test]
    fn test_quick_add_falls_back_to_defaults() {
        let mut product = Catalog::mock().get(ProductId::new(1)).unwrap().clone();
        product.sizes.clear();
        product.colors.clear();
        let item = NewCartItem::quick_add(&product).unwrap();
        assert_eq!(item.size(), DEFAULT_SIZE);
        assert_eq!(item.color(), DEFAULT_COLOR);
    }

    #[test]
    fn test_wishlist_entry_rejects_bad_rating() {
        let entry = WishlistEntry::new(
            ProductId::new(1),
            "Tee",
            Money::from_cents(100),
            None,
            "",
            Category::Tops,
            7.5,
            false,
        );
        assert!(matches!(entry, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn test_is_on_sale() {
        let catalog = Catalog::mock();
        assert!(catalog.get(ProductId::new(1)).unwrap().is_on_sale());
        assert!(!catalog.get(ProductId::new(2)).unwrap().is_on_sale());
    }

    #[test]
    fn test_line_item_serializes_camel_case() {
        let item = CartLineItem {
            product_id: ProductId::new(3),
            name: "Dress".to_string(),
            image_url: "img".to_string(),
            unit_price: Money::from_cents(8999),
            size: "S".to_string(),
            color: "floral".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], 3);
        assert_eq!(json["unitPrice"], 8999);
        assert_eq!(json["imageUrl"], "img");
    }
}
