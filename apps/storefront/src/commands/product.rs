//! # Product Commands
//!
//! Catalog reads for the product grid and the detail page.
//!
//! ## Grid Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Grid Flow                                    │
//! │                                                                         │
//! │  Sidebar: category radio, price slider, sort dropdown                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_products(filter)                                                  │
//! │       │                                                                 │
//! │       ├── keep: category matches AND min <= price <= max                │
//! │       ├── order: price-low | price-high | rating | newest | catalog     │
//! │       ▼                                                                 │
//! │  Vec<ProductDto>, each flagged on-sale / wishlisted for the card        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

use storefront_core::{Catalog, Product, ProductFilter, ProductId};

use crate::error::ApiError;
use crate::state::WishlistStore;

/// A product as the card and the detail page render it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    pub is_on_sale: bool,
    pub is_wishlisted: bool,
}

impl ProductDto {
    fn new(product: &Product, wishlist: &WishlistStore) -> Self {
        ProductDto {
            product: product.clone(),
            is_on_sale: product.is_on_sale(),
            is_wishlisted: wishlist.is_in_wishlist(product.id),
        }
    }
}

/// Filtered, ordered product grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
    pub filter: ProductFilter,
}

/// Lists the catalog through the grid's filter.
///
/// ## Returns
/// Matching products; catalog order unless a sort is chosen. An empty
/// list is a normal result ("No products found").
pub fn list_products(catalog: &Catalog, wishlist: &WishlistStore, filter: ProductFilter) -> ProductListResponse {
    let start = Instant::now();
    debug!(?filter, "list_products command");

    let products: Vec<ProductDto> = filter
        .apply(catalog)
        .into_iter()
        .map(|p| ProductDto::new(p, wishlist))
        .collect();

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        "list_products complete"
    );

    ProductListResponse { products, filter }
}

/// Catalog search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchResponse {
    pub products: Vec<ProductDto>,
    pub term: String,
}

/// Searches product names and categories, ignoring case.
pub fn search_products(catalog: &Catalog, wishlist: &WishlistStore, term: &str) -> ProductSearchResponse {
    debug!(term, "search_products command");

    let products = catalog
        .search(term)
        .into_iter()
        .map(|p| ProductDto::new(p, wishlist))
        .collect();

    ProductSearchResponse {
        products,
        term: term.trim().to_string(),
    }
}

/// Gets a single product for the detail page.
pub fn get_product(catalog: &Catalog, wishlist: &WishlistStore, id: ProductId) -> Result<ProductDto, ApiError> {
    debug!(%id, "get_product command");
    let product = catalog.get_or_err(id)?;
    Ok(ProductDto::new(product, wishlist))
}

/// "You may also like": other products in the same category.
pub fn related_products(
    catalog: &Catalog,
    wishlist: &WishlistStore,
    id: ProductId,
    limit: usize,
) -> Result<Vec<ProductDto>, ApiError> {
    debug!(%id, limit, "related_products command");
    catalog.get_or_err(id)?;

    Ok(catalog
        .related(id, limit)
        .into_iter()
        .map(|p| ProductDto::new(p, wishlist))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{Category, CategoryFilter, PriceRange, SortBy, WishlistAction, WishlistEntry};

    fn ids(products: &[ProductDto]) -> Vec<u32> {
        products.iter().map(|p| p.product.id.get()).collect()
    }

    #[test]
    fn test_list_with_filter_and_sort() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();

        let filter = ProductFilter::default()
            .with_price_range(PriceRange::from_dollars(50, 100).unwrap())
            .with_sort(SortBy::PriceDescending);
        let response = list_products(&catalog, &wishlist, filter);
        assert_eq!(ids(&response.products), vec![5, 3, 4]);
        assert_eq!(response.filter, filter);

        let filter = ProductFilter::default().with_category(CategoryFilter::Only(Category::Shoes));
        assert_eq!(ids(&list_products(&catalog, &wishlist, filter).products), vec![6]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let catalog = Catalog::mock();
        let filter = ProductFilter::default()
            .with_category(CategoryFilter::Only(Category::Dresses))
            .with_price_range(PriceRange::from_dollars(0, 10).unwrap());
        assert!(list_products(&catalog, &WishlistStore::new(), filter).products.is_empty());
    }

    #[test]
    fn test_dto_flags_and_json_shape() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();
        let entry = WishlistEntry::from_product(catalog.get(ProductId::new(1)).unwrap()).unwrap();
        wishlist.dispatch(WishlistAction::AddItem(entry));

        let dto = get_product(&catalog, &wishlist, ProductId::new(1)).unwrap();
        assert!(dto.is_on_sale);
        assert!(dto.is_wishlisted);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["name"], "Premium Cotton T-Shirt");
        assert_eq!(json["isOnSale"], true);
        assert_eq!(json["isWishlisted"], true);
        assert_eq!(json["stockCount"], 45);
    }

    #[test]
    fn test_search_products() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();

        let response = search_products(&catalog, &wishlist, " Jacket ");
        assert_eq!(ids(&response.products), vec![2]);
        assert_eq!(response.term, "Jacket");

        assert_eq!(ids(&search_products(&catalog, &wishlist, "TOPS").products), vec![1, 5]);
        assert!(search_products(&catalog, &wishlist, "scarf").products.is_empty());
    }

    #[test]
    fn test_related_products() {
        let catalog = Catalog::mock();
        let wishlist = WishlistStore::new();

        let related = related_products(&catalog, &wishlist, ProductId::new(1), 4).unwrap();
        assert_eq!(ids(&related), vec![5]);

        let err = related_products(&catalog, &wishlist, ProductId::new(42), 4).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
