use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Product;

/// How a text filter compares against a single product field. Both sides are
/// lower-cased before comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Exact,
    Substring,
}

impl MatchMode {
    /// `needle` must already be lower-cased.
    pub fn matches(self, field: &str, needle: &str) -> bool {
        let field = field.to_lowercase();
        match self {
            Self::Exact => field == needle,
            Self::Substring => field.contains(needle),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "substring" | "contains" => Ok(Self::Substring),
            other => Err(format!("unknown match mode `{other}`")),
        }
    }
}

pub fn matches_category(product: &Product, category: &str, mode: MatchMode) -> bool {
    mode.matches(&product.category, category)
}

pub fn matches_instructor(product: &Product, instructor: &str, mode: MatchMode) -> bool {
    mode.matches(&product.instructor.name, instructor)
}

/// True when any product tag equals any requested tag. `tags` are lower-cased.
pub fn matches_any_tag(product: &Product, tags: &[String]) -> bool {
    product.tags.iter().any(|t| {
        let t = t.to_lowercase();
        tags.iter().any(|wanted| *wanted == t)
    })
}

/// Inclusive on both ends; a missing bound is unbounded.
pub fn within_price(product: &Product, min: Option<f64>, max: Option<f64>) -> bool {
    let price = product.price as f64;
    min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
}

pub fn meets_rating(product: &Product, min_rating: f64) -> bool {
    product.rating >= min_rating
}

/// Substring search over every text field a shopper would recognise. `needle`
/// must already be lower-cased.
pub fn matches_search(product: &Product, needle: &str) -> bool {
    [
        product.title.as_str(),
        product.description.as_str(),
        product.full_description.as_str(),
        product.instructor.name.as_str(),
        product.category.as_str(),
    ]
    .into_iter()
    .chain(product.tags.iter().map(String::as_str))
    .any(|field| field.to_lowercase().contains(needle))
}
