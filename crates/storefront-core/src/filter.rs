//! # Product Grid Filtering
//!
//! Narrows and orders the catalog for the product grid.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (original order)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  category == selected ?   (skipped when "all")                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  min <= price <= max ?    (inclusive both ends)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stable sort by SortBy    (Default keeps catalog order)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering always starts again from the catalog, never from a previous
//! result, so switching back to the default sort restores catalog order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product};
use crate::validation::validate_price_range;
use crate::DEFAULT_PRICE_CEILING;

// =============================================================================
// Category Filter
// =============================================================================

/// Either every category or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// The sentinel accepted in place of a category name.
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_SENTINEL),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds.
///
/// Deserializing goes through [`PriceRange::new`], so a payload with
/// `min > max` is rejected like any other bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPriceRange")]
pub struct PriceRange {
    min: Money,
    max: Money,
}

/// Unchecked wire shape of a [`PriceRange`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPriceRange {
    min: Money,
    max: Money,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = ValidationError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        PriceRange::new(raw.min, raw.max)
    }
}

impl PriceRange {
    /// Creates a range, rejecting negative bounds and `min > max`.
    pub fn new(min: Money, max: Money) -> Result<Self, ValidationError> {
        validate_price_range(min, max)?;
        Ok(PriceRange { min, max })
    }

    /// Range from whole-dollar bounds, as the slider reports them.
    pub fn from_dollars(min: i64, max: i64) -> Result<Self, ValidationError> {
        let to_money = |field: &str, dollars: i64| {
            Money::checked_from_dollars(dollars).ok_or_else(|| ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "amount too large".to_string(),
            })
        };
        PriceRange::new(to_money("minimum price", min)?, to_money("maximum price", max)?)
    }

    /// Range from typed-in decimal bounds such as `"0"` and `"59.99"`.
    pub fn parse(min: &str, max: &str) -> Result<Self, ValidationError> {
        PriceRange::new(min.parse()?, max.parse()?)
    }

    pub fn min(&self) -> Money {
        self.min
    }

    pub fn max(&self) -> Money {
        self.max
    }

    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    /// `[$0, $200]`, the full slider.
    fn default() -> Self {
        PriceRange {
            min: Money::zero(),
            max: DEFAULT_PRICE_CEILING,
        }
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Grid ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    /// Catalog order.
    #[default]
    #[serde(rename = "")]
    Default,
    #[serde(rename = "price-low")]
    PriceAscending,
    #[serde(rename = "price-high")]
    PriceDescending,
    #[serde(rename = "rating")]
    RatingDescending,
    /// New arrivals first.
    #[serde(rename = "newest")]
    Newest,
}

impl SortBy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Default => "",
            SortBy::PriceAscending => "price-low",
            SortBy::PriceDescending => "price-high",
            SortBy::RatingDescending => "rating",
            SortBy::Newest => "newest",
        }
    }

    /// Ordering between two products, or `None` for catalog order.
    fn compare(&self, a: &Product, b: &Product) -> Option<Ordering> {
        match self {
            SortBy::Default => None,
            SortBy::PriceAscending => Some(a.price.cmp(&b.price)),
            SortBy::PriceDescending => Some(b.price.cmp(&a.price)),
            SortBy::RatingDescending => Some(b.rating.total_cmp(&a.rating)),
            SortBy::Newest => Some(b.is_new.cmp(&a.is_new)),
        }
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "default" => Ok(SortBy::Default),
            "price-low" => Ok(SortBy::PriceAscending),
            "price-high" => Ok(SortBy::PriceDescending),
            "rating" => Ok(SortBy::RatingDescending),
            "newest" => Ok(SortBy::Newest),
            other => Err(ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: format!("unknown sort '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// The grid's filter settings. Each dimension resets independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub sort_by: SortBy,
}

impl ProductFilter {
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn reset_category(&mut self) {
        self.category = CategoryFilter::default();
    }

    pub fn reset_price_range(&mut self) {
        self.price_range = PriceRange::default();
    }

    pub fn reset_sort(&mut self) {
        self.sort_by = SortBy::default();
    }

    /// "Clear All": every dimension back to its default.
    pub fn reset(&mut self) {
        *self = ProductFilter::default();
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product) && self.price_range.contains(product.price)
    }

    /// Filters and orders the catalog.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        let mut products: Vec<&Product> = catalog
            .products()
            .iter()
            .filter(|p| self.matches(p))
            .collect();

        // slice::sort_by is stable; equal keys keep catalog order
        if self.sort_by != SortBy::Default {
            let sort_by = self.sort_by;
            products.sort_by(|a, b| sort_by.compare(a, b).unwrap_or(Ordering::Equal));
        }

        products
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
