use super::ProductQueryOptions;
use crate::database::models::product::Product;

/// Keep products inside the inclusive price window. Each bound filters
/// independently; inverted bounds therefore yield an empty result rather
/// than an error.
pub fn apply_price_filter(
    products: Vec<Product>,
    options: &ProductQueryOptions,
) -> Vec<Product> {
    if options.minimum_price.is_none() && options.maximum_price.is_none() {
        return products;
    }

    products
        .into_iter()
        .filter(|p| options.minimum_price.map_or(true, |min| p.price >= min))
        .filter(|p| options.maximum_price.map_or(true, |max| p.price <= max))
        .collect()
}
