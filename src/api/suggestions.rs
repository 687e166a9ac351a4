//! `GET /api/suggestions`

use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::debug;

use super::favorites::ProductPage;
use super::response::{ok, user_id, ApiResult, QueryPairs};
use super::AppState;
use crate::query::params::{from_pairs, page_request, split_list};
use crate::suggestions::suggest_page;

const DEFAULT_LIMIT: u32 = 12;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionQuery {
    pub user_id: Option<String>,
    pub viewed_products: Option<String>,
    pub favorite_products: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub async fn suggestions(State(state): State<AppState>, query: QueryPairs) -> ApiResult {
    let Query(pairs) = query?;
    let query: SuggestionQuery = from_pairs(pairs);
    let user = user_id("userId", query.user_id.unwrap_or_default())?;
    let viewed = query.viewed_products.as_deref().map(split_list).unwrap_or_default();
    let favorites = query.favorite_products.as_deref().map(split_list).unwrap_or_default();
    let request = page_request(query.page.as_deref(), query.limit.as_deref(), DEFAULT_LIMIT);

    if !state.suggestion_delay.is_zero() {
        tokio::time::sleep(state.suggestion_delay).await;
    }

    let page = suggest_page(&state.catalog, &viewed, &favorites, state.suggestion_cap, request);
    debug!(user = %user, viewed = viewed.len(), favorites = favorites.len(), found = page.pagination.total_items, "suggestions computed");
    Ok(ok(ProductPage { products: page.items, pagination: page.pagination }))
}
