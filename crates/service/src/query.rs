//! Filtered/sorted views over flat collections.
//!
//! `Criteria` is a transient per-request value: optional substring match on
//! a text field, equality on a category field, numeric range on a price
//! field and a sort direction. Anything exposing those three accessors via
//! `Catalog` can be queried.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

/// Accessors the filter predicates run against.
pub trait Catalog {
    fn text(&self) -> &str;
    fn category(&self) -> &str;
    fn price(&self) -> f64;
}

/// Apply all present predicates, then sort. The category value `all`
/// matches everything; substring and category matches are case-insensitive.
pub fn apply<T: Catalog>(items: Vec<T>, criteria: &Criteria) -> Vec<T> {
    let mut results: Vec<T> = items
        .into_iter()
        .filter(|item| {
            if let Some(category) = &criteria.category {
                if !category.eq_ignore_ascii_case("all")
                    && !item.category().eq_ignore_ascii_case(category)
                {
                    return false;
                }
            }
            if let Some(search) = &criteria.search {
                if !item.text().to_lowercase().contains(&search.to_lowercase()) {
                    return false;
                }
            }
            if let Some(min) = criteria.min_price {
                if item.price() < min {
                    return false;
                }
            }
            if let Some(max) = criteria.max_price {
                if item.price() > max {
                    return false;
                }
            }
            true
        })
        .collect();

    match criteria.sort {
        Some(SortOrder::PriceAsc) => results.sort_by(|a, b| a.price().total_cmp(&b.price())),
        Some(SortOrder::PriceDesc) => results.sort_by(|a, b| b.price().total_cmp(&a.price())),
        None => {}
    }
    results
}
