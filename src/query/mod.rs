//! Product query engine: filter, then sort, then paginate.
//!
//! [`execute`] is a pure function of the catalog slice and a [`ProductQuery`];
//! it performs no I/O and never fails. Raw request parameters are turned into
//! a query by [`params`], which falls back to defaults instead of erroring.

pub mod filter;
pub mod pagination;
pub mod params;
pub mod sort;

use serde::Serialize;

use crate::Product;
use filter::MatchMode;
use pagination::{paginate, Page, PageRequest};
use sort::{SortField, SortOrder, SortSpec};

pub use params::{ListingParams, SearchFilters, SearchRequest};

/// Per-endpoint defaults. The general listing and the catalog browse listing
/// differ in sort, page size and, optionally, match modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingDefaults {
    pub sort: SortSpec,
    pub limit: u32,
    pub category_match: MatchMode,
    pub instructor_match: MatchMode,
}

impl ListingDefaults {
    /// Best rated first, nine per page.
    pub const fn products() -> Self {
        Self {
            sort: SortSpec::new(SortField::Rating, SortOrder::Desc),
            limit: 9,
            category_match: MatchMode::Exact,
            instructor_match: MatchMode::Exact,
        }
    }

    /// Alphabetical, twelve per page.
    pub const fn catalog() -> Self {
        Self {
            sort: SortSpec::new(SortField::Title, SortOrder::Asc),
            limit: 12,
            category_match: MatchMode::Exact,
            instructor_match: MatchMode::Exact,
        }
    }
}

/// A fully normalised query. Text filters are stored trimmed and lower-cased;
/// empty strings never reach this type.
///
/// Serialises as the `filters` echo of a listing response.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    #[serde(skip)]
    pub page: PageRequest,
    #[serde(skip)]
    pub category_match: MatchMode,
    #[serde(skip)]
    pub instructor_match: MatchMode,
}

impl ProductQuery {
    /// A query with no filters, first page, using the listing defaults.
    pub fn new(defaults: &ListingDefaults) -> Self {
        Self {
            search: None,
            category: None,
            instructor: None,
            tags: vec![],
            min_price: None,
            max_price: None,
            min_rating: None,
            sort_by: defaults.sort.field,
            sort_order: defaults.sort.order,
            page: PageRequest::first(defaults.limit),
            category_match: defaults.category_match,
            instructor_match: defaults.instructor_match,
        }
    }

    pub fn sort(&self) -> SortSpec {
        SortSpec::new(self.sort_by, self.sort_order)
    }
}

/// Runs `query` over `catalog`. Filters apply in a fixed order (category,
/// instructor, tag, price, rating, search); pagination totals come from the
/// filtered set.
pub fn execute<'a>(catalog: &'a [Product], query: &ProductQuery) -> Page<&'a Product> {
    let mut products: Vec<&Product> = catalog.iter().collect();

    if let Some(category) = &query.category {
        products.retain(|p| filter::matches_category(p, category, query.category_match));
    }
    if let Some(instructor) = &query.instructor {
        products.retain(|p| filter::matches_instructor(p, instructor, query.instructor_match));
    }
    if !query.tags.is_empty() {
        products.retain(|p| filter::matches_any_tag(p, &query.tags));
    }
    if query.min_price.is_some() || query.max_price.is_some() {
        products.retain(|p| filter::within_price(p, query.min_price, query.max_price));
    }
    if let Some(min_rating) = query.min_rating {
        products.retain(|p| filter::meets_rating(p, min_rating));
    }
    if let Some(search) = &query.search {
        products.retain(|p| filter::matches_search(p, search));
    }

    sort::sort_products(&mut products, query.sort());
    paginate(products, query.page)
}
