//! Product and catalog page types.
//!
//! These mirror the shape of the remote catalog API responses
//! (`GET /products?limit&skip` and friends), with a clean domain surface
//! on top: prices are `rust_decimal::Decimal` (the wire carries JSON
//! floats), ids are [`ProductId`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::id::ProductId;

// =============================================================================
// Product
// =============================================================================

/// A single catalog product.
///
/// Immutable once fetched - the client only reads and re-displays products,
/// never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Externally assigned, stable identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Category name (finite but open set, scoped by the remote catalog).
    pub category: String,
    /// Unit price. The wire format is a JSON float (e.g. `9.99`).
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Discount percentage (e.g. `12.96` for 12.96% off).
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average rating, 0-5 inclusive.
    #[serde(default)]
    pub rating: f64,
    /// Units in stock at fetch time (informational only).
    #[serde(default)]
    pub stock: i64,
    /// Brand name; absent for some categories (e.g. groceries).
    #[serde(default)]
    pub brand: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Full-size image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

// =============================================================================
// Catalog Page
// =============================================================================

/// One bounded fetch of products at a given offset/limit/category.
///
/// Created per fetch, consumed once by the accumulator, then superseded by
/// the page cache entry for its key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Products in the order the remote catalog returned them.
    pub products: Vec<Product>,
    /// Upper bound of items available for the requested category.
    pub total: u64,
    /// Offset that produced this page.
    pub skip: u64,
    /// Page size that produced this page.
    pub limit: u64,
}

// =============================================================================
// Category Filter
// =============================================================================

/// The active category scope: everything, or a single named category.
///
/// The remote API spells the unscoped case `"all"`, which maps to
/// [`CategoryFilter::All`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No category scoping.
    #[default]
    All,
    /// Exact-match scoping to one category name.
    Named(String),
}

impl CategoryFilter {
    /// Parse a user- or wire-supplied category value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    /// The wire spelling of this filter (`"all"` for the unscoped case).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Named(name) => name,
        }
    }

    /// Whether a product with the given category name passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for CategoryFilter {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Price sort direction for the derived product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Price: low to high.
    #[default]
    Asc,
    /// Price: high to low.
    Desc,
}

/// Error parsing a [`SortOrder`] from a string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid sort order {value:?}, expected \"asc\" or \"desc\"")]
pub struct ParseSortOrderError {
    /// The rejected input.
    pub value: String,
}

impl core::str::FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortOrderError {
                value: s.to_string(),
            }),
        }
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_deserializes_from_wire_shape() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "A popular mascara",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "tags": ["beauty", "mascara"],
            "brand": "Essence",
            "thumbnail": "https://cdn.example.com/1/thumb.png",
            "images": ["https://cdn.example.com/1/full.png"]
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize product");
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(999, 2));
        assert_eq!(product.category, "beauty");
        assert_eq!(product.brand.as_deref(), Some("Essence"));
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": 2,
            "title": "Plain Product",
            "category": "groceries",
            "price": 3.5
        }"#;

        let product: Product = serde_json::from_str(json).expect("deserialize product");
        assert!(product.brand.is_none());
        assert!(product.images.is_empty());
        assert_eq!(product.rating, 0.0);
    }

    #[test]
    fn test_catalog_page_deserializes_from_wire_shape() {
        let json = r#"{
            "products": [],
            "total": 194,
            "skip": 0,
            "limit": 15
        }"#;

        let page: CatalogPage = serde_json::from_str(json).expect("deserialize page");
        assert_eq!(page.total, 194);
        assert_eq!(page.limit, 15);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("beauty"),
            CategoryFilter::Named("beauty".to_string())
        );
    }

    #[test]
    fn test_category_filter_matches() {
        assert!(CategoryFilter::All.matches("beauty"));
        assert!(CategoryFilter::parse("beauty").matches("beauty"));
        assert!(!CategoryFilter::parse("beauty").matches("groceries"));
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("price".parse::<SortOrder>().is_err());
    }
}
