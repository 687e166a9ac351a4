//! Raw request parameters and their fail-soft conversion into a [`ProductQuery`].
//!
//! Nothing here returns an error: a value that does not parse is treated as
//! absent and the listing default applies.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::pagination::PageRequest;
use super::{ListingDefaults, ProductQuery};

/// Query-string parameters of the listing endpoints, kept as raw strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub instructor: Option<String>,
    pub tag: Option<String>,
    pub tags: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListingParams {
    pub fn into_query(self, defaults: &ListingDefaults) -> ProductQuery {
        let mut query = ProductQuery::new(defaults);
        query.search = text(self.search);
        query.category = text(self.category);
        query.instructor = text(self.instructor);
        query.tags = [self.tag, self.tags]
            .into_iter()
            .flatten()
            .flat_map(|raw| split_list(&raw))
            .map(|t| t.to_lowercase())
            .collect();
        query.tags.dedup();
        query.min_price = number(self.min_price.as_deref());
        query.max_price = number(self.max_price.as_deref());
        query.min_rating = number(self.min_rating.as_deref());
        if let Some(field) = self.sort_by.as_deref().and_then(|s| s.parse().ok()) {
            query.sort_by = field;
        }
        if let Some(order) = self.sort_order.as_deref().and_then(|s| s.parse().ok()) {
            query.sort_order = order;
        }
        query.page = page_request(self.page.as_deref(), self.limit.as_deref(), defaults.limit);
        query
    }
}

/// JSON body of `POST /api/products`. Numbers may arrive as JSON numbers or strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub page: Option<Value>,
    pub limit: Option<Value>,
    pub sort_by: Option<Value>,
    pub sort_order: Option<Value>,
    pub filters: SearchFilters,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub search: Option<Value>,
    pub category: Option<Value>,
    pub instructor: Option<Value>,
    pub tag: Option<Value>,
    pub tags: Option<Value>,
    pub min_price: Option<Value>,
    pub max_price: Option<Value>,
    pub min_rating: Option<Value>,
}

impl From<SearchRequest> for ListingParams {
    fn from(body: SearchRequest) -> Self {
        let f = body.filters;
        Self {
            search: param(f.search),
            category: param(f.category),
            instructor: param(f.instructor),
            tag: param(f.tag),
            tags: param(f.tags),
            min_price: param(f.min_price),
            max_price: param(f.max_price),
            min_rating: param(f.min_rating),
            sort_by: param(body.sort_by),
            sort_order: param(body.sort_order),
            page: param(body.page),
            limit: param(body.limit),
        }
    }
}

/// Builds a parameter struct from raw query pairs. A repeated key keeps its
/// first value; anything that still fails to deserialise yields the defaults.
pub fn from_pairs<T: DeserializeOwned + Default>(pairs: Vec<(String, String)>) -> T {
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }
    serde_json::from_value(Value::Object(fields)).unwrap_or_default()
}

/// Page and limit with the shared fallbacks: a bad page is page 1, a bad
/// limit is the endpoint default. Both are then clamped.
pub fn page_request(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> PageRequest {
    let page = number::<i64>(page).unwrap_or(1);
    let limit = number::<i64>(limit).unwrap_or(default_limit as i64);
    PageRequest::new(page, limit)
}

/// Splits a comma-separated id or tag list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

fn text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_lowercase()).filter(|v| !v.is_empty())
}

fn number<T: FromStr + Finite>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse::<T>().ok()).filter(Finite::is_finite)
}

fn param(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let joined: Vec<String> = items.into_iter().filter_map(|v| param(Some(v))).collect();
            Some(joined.join(","))
        }
        Value::Null | Value::Object(_) => None,
    }
}

trait Finite {
    fn is_finite(&self) -> bool;
}

impl Finite for f64 {
    fn is_finite(&self) -> bool { f64::is_finite(*self) }
}

impl Finite for i64 {
    fn is_finite(&self) -> bool { true }
}
