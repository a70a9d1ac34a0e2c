pub mod filter;
pub mod paginate;
pub mod sort;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::database::models::product::Product;

/// Request-scoped query options for the product catalog. All fields are
/// optional; missing or nonsensical values degrade to a no-op rather than
/// an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQueryOptions {
    pub minimum_price: Option<Decimal>,
    pub maximum_price: Option<Decimal>,
    pub order_by_property_name: Option<String>,
    pub is_descending: bool,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// Run the catalog query pipeline. Stage order is fixed (filter, then sort,
/// then paginate) so page windows are always computed over the filtered and
/// sorted view.
pub fn apply(products: Vec<Product>, options: &ProductQueryOptions) -> Vec<Product> {
    let products = filter::apply_price_filter(products, options);
    let products = sort::apply_sort(products, options);
    paginate::paginate(products, options.page_number, options.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn product(name: &str, price: Decimal) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Keyboard", dec!(45.00)),
            product("Monitor", dec!(220.00)),
            product("Mouse", dec!(25.50)),
            product("Dock", dec!(180.00)),
            product("Webcam", dec!(60.00)),
        ]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn no_options_returns_the_sequence_unchanged() {
        let result = apply(catalog(), &ProductQueryOptions::default());

        assert_eq!(
            names(&result),
            vec!["Keyboard", "Monitor", "Mouse", "Dock", "Webcam"]
        );
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let options = ProductQueryOptions {
            minimum_price: Some(dec!(25.50)),
            maximum_price: Some(dec!(60.00)),
            ..Default::default()
        };

        let result = apply(catalog(), &options);

        assert_eq!(names(&result), vec!["Keyboard", "Mouse", "Webcam"]);
    }

    #[test]
    fn absent_bound_imposes_no_constraint() {
        let options = ProductQueryOptions {
            minimum_price: Some(dec!(100.00)),
            ..Default::default()
        };

        let result = apply(catalog(), &options);

        assert_eq!(names(&result), vec!["Monitor", "Dock"]);
    }

    // Documented-but-possibly-accidental: inverted bounds yield an empty
    // result instead of rejecting the request. Nothing ties the two bounds
    // together, so each simply filters everything out.
    #[test]
    fn minimum_above_maximum_yields_empty() {
        let options = ProductQueryOptions {
            minimum_price: Some(dec!(100.00)),
            maximum_price: Some(dec!(50.00)),
            ..Default::default()
        };

        assert!(apply(catalog(), &options).is_empty());
    }

    #[test]
    fn ascending_and_descending_price_sorts_are_reverses() {
        let ascending = apply(
            catalog(),
            &ProductQueryOptions {
                order_by_property_name: Some("price".to_string()),
                ..Default::default()
            },
        );
        let descending = apply(
            catalog(),
            &ProductQueryOptions {
                order_by_property_name: Some("price".to_string()),
                is_descending: true,
                ..Default::default()
            },
        );

        let mut reversed = names(&descending);
        reversed.reverse();
        assert_eq!(names(&ascending), reversed);
        assert_eq!(
            names(&ascending),
            vec!["Mouse", "Keyboard", "Webcam", "Dock", "Monitor"]
        );
    }

    #[test]
    fn sort_field_name_is_matched_case_insensitively() {
        let options = ProductQueryOptions {
            order_by_property_name: Some("NAME".to_string()),
            ..Default::default()
        };

        let result = apply(catalog(), &options);

        assert_eq!(
            names(&result),
            vec!["Dock", "Keyboard", "Monitor", "Mouse", "Webcam"]
        );
    }

    #[test]
    fn unrecognized_sort_field_leaves_order_unchanged() {
        let options = ProductQueryOptions {
            order_by_property_name: Some("color".to_string()),
            ..Default::default()
        };

        let result = apply(catalog(), &options);

        assert_eq!(
            names(&result),
            vec!["Keyboard", "Monitor", "Mouse", "Dock", "Webcam"]
        );
    }

    #[test]
    fn pagination_windows_the_post_sort_view() {
        let page = |number: i64| {
            apply(
                catalog(),
                &ProductQueryOptions {
                    order_by_property_name: Some("name".to_string()),
                    page_number: Some(number),
                    page_size: Some(2),
                    ..Default::default()
                },
            )
        };

        // Sorted by name: Dock, Keyboard, Monitor, Mouse, Webcam
        assert_eq!(names(&page(1)), vec!["Dock", "Keyboard"]);
        assert_eq!(names(&page(3)), vec!["Webcam"]);
        assert!(page(4).is_empty());
    }

    #[test]
    fn pagination_requires_both_page_number_and_page_size() {
        let only_number = ProductQueryOptions {
            page_number: Some(1),
            ..Default::default()
        };
        let only_size = ProductQueryOptions {
            page_size: Some(2),
            ..Default::default()
        };

        assert_eq!(apply(catalog(), &only_number).len(), 5);
        assert_eq!(apply(catalog(), &only_size).len(), 5);
    }

    #[test]
    fn filter_runs_before_pagination() {
        // Two pages of cheap items; the expensive ones never enter the window.
        let options = ProductQueryOptions {
            maximum_price: Some(dec!(100.00)),
            order_by_property_name: Some("price".to_string()),
            page_number: Some(2),
            page_size: Some(2),
            ..Default::default()
        };

        let result = apply(catalog(), &options);

        assert_eq!(names(&result), vec!["Webcam"]);
    }
}
