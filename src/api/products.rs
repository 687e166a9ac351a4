//! Listing, search, detail and facet endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use super::response::{ok, ApiResult, QueryPairs};
use super::AppState;
use crate::query::pagination::PaginationInfo;
use crate::query::params::from_pairs;
use crate::query::{self, ListingDefaults, ListingParams, ProductQuery, SearchRequest};
use crate::{CatalogError, Product};

const RELATED_LIMIT: usize = 4;

#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    pub products: Vec<&'a Product>,
    pub pagination: PaginationInfo,
    pub filters: ProductQuery,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ProductDetail<'a> {
    pub product: &'a Product,
    pub related: Vec<&'a Product>,
}

fn listing<'a>(state: &'a AppState, params: ListingParams, defaults: ListingDefaults) -> Listing<'a> {
    let filters = params.into_query(&defaults);
    let page = query::execute(state.catalog.products(), &filters);
    debug!(?filters, total = page.pagination.total_items, "listing executed");
    Listing { total: page.pagination.total_items, products: page.items, pagination: page.pagination, filters }
}

/// `GET /api/products`
pub async fn list_products(State(state): State<AppState>, params: QueryPairs) -> ApiResult {
    let Query(pairs) = params?;
    Ok(ok(listing(&state, from_pairs(pairs), state.products)))
}

/// `POST /api/products`
pub async fn search_products(State(state): State<AppState>, body: Result<Json<SearchRequest>, JsonRejection>) -> ApiResult {
    let Json(body) = body?;
    Ok(ok(listing(&state, body.into(), state.products)))
}

/// `GET /api/catalog`
pub async fn browse_catalog(State(state): State<AppState>, params: QueryPairs) -> ApiResult {
    let Query(pairs) = params?;
    Ok(ok(listing(&state, from_pairs(pairs), state.browse)))
}

/// `GET /api/products/:id`
pub async fn get_product(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let product = state.catalog.get(&id).ok_or(CatalogError::ProductNotFound)?;
    let related = state.catalog.related(product, RELATED_LIMIT);
    Ok(ok(ProductDetail { product, related }))
}

/// `GET /api/filters`
pub async fn filters(State(state): State<AppState>) -> ApiResult {
    Ok(ok(&*state.facets))
}
