use std::cmp::Ordering;

use super::ProductQueryOptions;
use crate::database::models::product::Product;

/// Sortable catalog fields. A user-supplied field name outside this set is
/// not an error; the sort stage simply passes the sequence through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
}

impl SortField {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("name") {
            Some(SortField::Name)
        } else if name.eq_ignore_ascii_case("price") {
            Some(SortField::Price)
        } else {
            None
        }
    }
}

/// Reorder by the requested field, flipped when descending. No secondary
/// key; ties keep whatever relative order the sort leaves them in.
pub fn apply_sort(mut products: Vec<Product>, options: &ProductQueryOptions) -> Vec<Product> {
    let Some(name) = options.order_by_property_name.as_deref() else {
        return products;
    };
    let Some(field) = SortField::from_name(name) else {
        return products;
    };

    let compare = move |a: &Product, b: &Product| -> Ordering {
        match field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.cmp(&b.price),
        }
    };

    if options.is_descending {
        products.sort_by(|a, b| compare(b, a));
    } else {
        products.sort_by(compare);
    }

    products
}
