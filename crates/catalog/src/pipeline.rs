//! Pure filter/sort pipeline over the accumulated products.
//!
//! No I/O, no side effects: the pipeline derives the rendered view and never
//! mutates or truncates the accumulation itself.

use shopwindow_core::{CategoryFilter, Product, SortOrder};

/// The user's current view parameters.
#[derive(Debug, Clone, Default)]
pub struct ProductFilters {
    /// Case-insensitive title substring; empty keeps all.
    pub search: String,
    /// Category scope; [`CategoryFilter::All`] keeps all.
    pub category: CategoryFilter,
    /// Minimum rating, inclusive.
    pub min_rating: f64,
    /// Price sort direction.
    pub sort: SortOrder,
}

/// Derive the view: text filter, category filter, rating filter, then a
/// stable price sort. Equal-price products keep the relative order the
/// filter steps produced.
///
/// An empty result is a valid state ("no products found"), not an error.
#[must_use]
pub fn apply<'a>(products: &'a [Product], filters: &ProductFilters) -> Vec<&'a Product> {
    let needle = filters.search.to_lowercase();

    let mut view: Vec<&Product> = products
        .iter()
        .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
        .filter(|p| filters.category.matches(&p.category))
        .filter(|p| p.rating >= filters.min_rating)
        .collect();

    // Vec::sort_by is stable, which the equal-price ordering relies on.
    view.sort_by(|a, b| match filters.sort {
        SortOrder::Asc => a.price.cmp(&b.price),
        SortOrder::Desc => b.price.cmp(&a.price),
    });

    view
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopwindow_core::ProductId;

    use super::*;

    fn product(id: i64, title: &str, category: &str, price: &str, rating: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            price: price.parse::<Decimal>().expect("valid decimal"),
            discount_percentage: 0.0,
            rating,
            stock: 1,
            brand: None,
            tags: Vec::new(),
            thumbnail: None,
            images: Vec::new(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Red Lipstick", "beauty", "12.99", 4.5),
            product(2, "Blue Mascara", "beauty", "9.99", 3.2),
            product(3, "Rice Cooker", "kitchen", "49.00", 4.8),
            product(4, "Red Rice", "groceries", "3.50", 4.1),
        ]
    }

    fn view_ids(view: &[&Product]) -> Vec<i64> {
        view.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let products = catalog();
        let filters = ProductFilters {
            search: "red".to_string(),
            ..ProductFilters::default()
        };

        assert_eq!(view_ids(&apply(&products, &filters)), vec![4, 1]);
    }

    #[test]
    fn test_empty_search_keeps_all() {
        let products = catalog();
        let view = apply(&products, &ProductFilters::default());
        assert_eq!(view.len(), products.len());
    }

    #[test]
    fn test_category_filter_exact_match() {
        let products = catalog();
        let filters = ProductFilters {
            category: CategoryFilter::parse("beauty"),
            ..ProductFilters::default()
        };

        assert_eq!(view_ids(&apply(&products, &filters)), vec![2, 1]);
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let products = catalog();
        let filters = ProductFilters {
            min_rating: 4.1,
            ..ProductFilters::default()
        };

        assert_eq!(view_ids(&apply(&products, &filters)), vec![4, 1, 3]);
    }

    #[test]
    fn test_sort_descending() {
        let products = catalog();
        let filters = ProductFilters {
            sort: SortOrder::Desc,
            ..ProductFilters::default()
        };

        assert_eq!(view_ids(&apply(&products, &filters)), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_equal_prices_keep_relative_order_both_directions() {
        let products = vec![
            product(1, "A", "beauty", "5.00", 4.0),
            product(2, "B", "beauty", "5.00", 4.0),
            product(3, "C", "beauty", "1.00", 4.0),
            product(4, "D", "beauty", "5.00", 4.0),
        ];

        let asc = apply(
            &products,
            &ProductFilters {
                sort: SortOrder::Asc,
                ..ProductFilters::default()
            },
        );
        assert_eq!(view_ids(&asc), vec![3, 1, 2, 4]);

        let desc = apply(
            &products,
            &ProductFilters {
                sort: SortOrder::Desc,
                ..ProductFilters::default()
            },
        );
        assert_eq!(view_ids(&desc), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_pipeline_does_not_mutate_input() {
        let products = catalog();
        let before: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();

        let _ = apply(
            &products,
            &ProductFilters {
                sort: SortOrder::Desc,
                min_rating: 4.0,
                ..ProductFilters::default()
            },
        );

        let after: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let products = catalog();
        let filters = ProductFilters {
            search: "zzz".to_string(),
            ..ProductFilters::default()
        };

        assert!(apply(&products, &filters).is_empty());
    }
}
