//! Catalog-wide filter options and summary statistics.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Product;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub instructors: Vec<String>,
    pub price_range: Range<u64>,
    pub rating_range: Range<f64>,
    pub stats: Stats,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_products: usize,
    pub total_instructors: usize,
    pub total_categories: usize,
    pub average_price: u64,
    pub average_rating: f64,
}

impl Facets {
    pub fn from_products(products: &[Product]) -> Self {
        let categories: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
        let tags: BTreeSet<&str> = products.iter().flat_map(|p| p.tags.iter().map(String::as_str)).collect();
        let instructors: BTreeSet<&str> = products.iter().map(|p| p.instructor.name.as_str()).collect();

        let (price_range, rating_range, average_price, average_rating) = match products {
            [] => (Range::default(), Range::default(), 0, 0.0),
            _ => {
                let count = products.len();
                let prices = products.iter().map(|p| p.price);
                let ratings = products.iter().map(|p| p.rating);
                let price_range = Range { min: prices.clone().min().unwrap_or(0), max: prices.clone().max().unwrap_or(0) };
                let rating_range = Range {
                    min: ratings.clone().fold(f64::INFINITY, f64::min),
                    max: ratings.clone().fold(f64::NEG_INFINITY, f64::max),
                };
                let average_price = (prices.sum::<u64>() as f64 / count as f64).round() as u64;
                let average_rating = (ratings.sum::<f64>() / count as f64 * 10.0).round() / 10.0;
                (price_range, rating_range, average_price, average_rating)
            }
        };

        Self {
            stats: Stats {
                total_products: products.len(),
                total_instructors: instructors.len(),
                total_categories: categories.len(),
                average_price,
                average_rating,
            },
            categories: categories.into_iter().map(str::to_string).collect(),
            tags: tags.into_iter().map(str::to_string).collect(),
            instructors: instructors.into_iter().map(str::to_string).collect(),
            price_range,
            rating_range,
        }
    }
}
