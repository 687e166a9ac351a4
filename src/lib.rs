//! OpenSASE Courses
//!
//! Self-hosted online course marketplace: catalog browsing, search and
//! filtering, favorites, cart, view history and suggestions.
//!
//! ## Features
//! - Product query engine (filter, sort, paginate)
//! - Interest-based suggestions
//! - Per-user favorites and per-session cart/history stores
//! - Keyword assistant
//! - Filter facets

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod api;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod facets;
pub mod query;
pub mod services;
pub mod storage;
pub mod suggestions;

// =============================================================================
// Core Types
// =============================================================================

/// Catalog record for a single course. Immutable once the catalog is loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub full_description: String,
    /// Whole VND, no minor unit.
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    pub image: String,
    pub instructor: Instructor,
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub students: u32,
    pub duration: String,
    pub last_updated: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("product not found")]
    ProductNotFound,

    #[error("Invalid catalog fixture: {0}")]
    InvalidFixture(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;


#[cfg(test)]
mod tests {
    use super::fixtures::product;

    #[test]
    fn test_product_json_is_camel_case() {
        let json = serde_json::to_value(product("1", 100)).unwrap();
        assert!(json.get("fullDescription").is_some());
        assert!(json.get("lastUpdated").is_some());
        assert!(json.get("originalPrice").is_none());
    }
}
