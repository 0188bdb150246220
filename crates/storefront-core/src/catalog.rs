//! # Catalog
//!
//! The static product list the grid, detail page and sidebars read from.
//! The storefront has no backend, so the catalog is built in memory and
//! never changes while the client runs.
//!
//! ## Lookup Contract
//! ```text
//! ProductId ──► Catalog::get ──► Option<&Product>
//!                     │
//!                     └── get_or_err ──► CoreError::ProductNotFound
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product, ProductId};

/// An immutable, ordered product list.
///
/// Catalog order is meaningful: the unsorted product grid shows products in
/// exactly this order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from a product list, keeping the first product for
    /// any repeated id.
    pub fn new(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }
        Catalog { products: unique }
    }

    /// The six-product demo catalog.
    pub fn mock() -> Self {
        Catalog::new(vec![
            mock_product(
                1,
                "Premium Cotton T-Shirt",
                4999,
                Some(6999),
                "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400",
                Category::Tops,
                &["XS", "S", "M", "L", "XL"],
                &["white", "black", "navy"],
                4.5,
                true,
                45,
            ),
            mock_product(
                2,
                "Vintage Denim Jacket",
                12999,
                None,
                "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=400",
                Category::Outerwear,
                &["S", "M", "L", "XL"],
                &["blue", "black"],
                4.8,
                false,
                12,
            ),
            mock_product(
                3,
                "Floral Summer Dress",
                8999,
                None,
                "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=400",
                Category::Dresses,
                &["XS", "S", "M", "L"],
                &["floral", "white"],
                4.6,
                true,
                8,
            ),
            mock_product(
                4,
                "Classic Chino Pants",
                7999,
                None,
                "https://images.unsplash.com/photo-1506629905607-52e4ac8ba5f1?w=400",
                Category::Bottoms,
                &["28", "30", "32", "34", "36"],
                &["khaki", "navy", "black"],
                4.3,
                false,
                0,
            ),
            mock_product(
                5,
                "Wool Blend Sweater",
                9999,
                Some(13999),
                "https://images.unsplash.com/photo-1576566588028-4147f3842f27?w=400",
                Category::Tops,
                &["S", "M", "L", "XL"],
                &["cream", "gray", "navy"],
                4.7,
                false,
                23,
            ),
            mock_product(
                6,
                "Athletic Sneakers",
                15999,
                None,
                "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400",
                Category::Shoes,
                &["7", "8", "9", "10", "11"],
                &["white", "black", "gray"],
                4.4,
                true,
                15,
            ),
        ])
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a product up by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::get`] but reports a missing id as an error.
    pub fn get_or_err(&self, id: ProductId) -> CoreResult<&Product> {
        self.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Case-insensitive substring search over product names and category
    /// labels, in catalog order. A blank term matches everything.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Catalog;
    ///
    /// let catalog = Catalog::mock();
    /// let names: Vec<&str> = catalog.search("DENIM").iter().map(|p| p.name.as_str()).collect();
    /// assert_eq!(names, vec!["Vintage Denim Jacket"]);
    /// ```
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.display_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Other products in the same category, in catalog order.
    ///
    /// Returns an empty list for an unknown id.
    pub fn related(&self, id: ProductId, limit: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.id != id && p.category == product.category)
            .take(limit)
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn mock_product(
    id: u32,
    name: &str,
    price_cents: i64,
    original_price_cents: Option<i64>,
    image_url: &str,
    category: Category,
    sizes: &[&str],
    colors: &[&str],
    rating: f64,
    is_new: bool,
    stock_count: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Money::from_cents(price_cents),
        original_price: original_price_cents.map(Money::from_cents),
        image_url: image_url.to_string(),
        category,
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        colors: colors.iter().map(|c| c.to_string()).collect(),
        rating,
        is_new,
        stock_count,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_has_six_products() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.len(), 6);
        let ids: Vec<u32> = catalog.products().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_get_and_get_or_err() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name, "Vintage Denim Jacket");
        assert!(catalog.get(ProductId::new(99)).is_none());
        assert!(matches!(
            catalog.get_or_err(ProductId::new(99)),
            Err(CoreError::ProductNotFound(id)) if id == ProductId::new(99)
        ));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mock = Catalog::mock();
        let mut products = mock.products().to_vec();
        let mut dup = products[0].clone();
        dup.name = "Impostor".to_string();
        products.push(dup);

        let catalog = Catalog::new(products);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name, "Premium Cotton T-Shirt");
    }

    #[test]
    fn test_related_same_category() {
        let catalog = Catalog::mock();
        let related: Vec<u32> = catalog
            .related(ProductId::new(1), 4)
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(related, vec![5]);

        assert!(catalog.related(ProductId::new(6), 4).is_empty());
        assert!(catalog.related(ProductId::new(42), 4).is_empty());
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let catalog = Catalog::mock();
        let ids = |term: &str| -> Vec<u32> { catalog.search(term).iter().map(|p| p.id.get()).collect() };

        assert_eq!(ids("tops"), vec![1, 5]);
        assert_eq!(ids("  Sweat "), vec![5]);
        assert_eq!(ids("wear"), vec![2]);
        assert_eq!(ids("es"), vec![3, 6]);
        assert_eq!(ids(""), vec![1, 2, 3, 4, 5, 6]);
        assert!(ids("hat").is_empty());
    }

    #[test]
    fn test_mock_stock_levels() {
        let catalog = Catalog::mock();
        let stock: Vec<u32> = catalog.products().iter().map(|p| p.stock_count).collect();
        assert_eq!(stock, vec![45, 12, 8, 0, 23, 15]);
        assert!(!catalog.get(ProductId::new(4)).unwrap().is_in_stock());
    }
}
