//! Catalog Query Service
//!
//! Builds the public product listing from optional search text and the
//! on-sale flag. Filtering runs in Rust over the store's rows so name
//! matching is Unicode case-insensitive (SQLite `LIKE` only folds ASCII).

use sqlx::SqlitePool;
use crate::models::product::Product;
use crate::store;

/// Sale policy: a discount counts only when it is strictly below the price.
pub fn is_on_sale(product: &Product) -> bool {
    matches!(product.discount_price, Some(discount) if discount < product.price)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Lowercased, trimmed search text. `None` when blank.
    search: Option<String>,
    pub on_sale: bool,
}

impl CatalogFilter {
    pub fn new(search: &str, on_sale: bool) -> Self {
        let trimmed = search.trim();
        Self {
            search: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
            on_sale,
        }
    }

    /// Builds the filter from the listing's query parameters; `akcija=1` means on sale only.
    pub fn from_params(search: Option<&str>, akcija: Option<&str>) -> Self {
        Self::new(search.unwrap_or_default(), akcija == Some("1"))
    }

    #[cfg(test)]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.search {
            if !product.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        !self.on_sale || is_on_sale(product)
    }
}

/// Products matching `filter`, in insertion order.
pub async fn list_products(pool: &SqlitePool, filter: &CatalogFilter) -> Result<Vec<Product>, sqlx::Error> {
    let products = store::products::find_all(pool).await?;
    Ok(products.into_iter().filter(|p| filter.matches(p)).collect())
}
