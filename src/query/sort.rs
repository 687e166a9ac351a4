use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Price,
    Rating,
    Students,
    LastUpdated,
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            "rating" => Ok(Self::Rating),
            "students" => Ok(Self::Students),
            "lastupdated" => Ok(Self::LastUpdated),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }
}

pub fn compare(a: &Product, b: &Product, field: SortField) -> Ordering {
    match field {
        SortField::Title => title_cmp(&a.title, &b.title),
        SortField::Price => a.price.cmp(&b.price),
        SortField::Rating => a.rating.total_cmp(&b.rating),
        SortField::Students => a.students.cmp(&b.students),
        SortField::LastUpdated => a.last_updated.cmp(&b.last_updated),
    }
}

/// Stable: products that compare equal keep their incoming order in both directions.
pub fn sort_products(products: &mut [&Product], spec: SortSpec) {
    products.sort_by(|a, b| {
        let ordering = compare(a, b, spec.field);
        match spec.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

// Case-folded first so "advanced" and "Advanced" sit together, then raw text.
fn title_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
