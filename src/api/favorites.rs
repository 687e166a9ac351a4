//! Server-side favorites keyed by `userId`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::response::{ok, user_id, ApiError, ApiResult, IdParam, QueryPairs};
use super::AppState;
use crate::query::pagination::{paginate, PaginationInfo};
use crate::query::params::{from_pairs, page_request};
use crate::Product;

const DEFAULT_LIMIT: u32 = 12;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FavoritesQuery {
    pub user_id: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FavoriteRequest {
    #[validate(length(min = 1))]
    pub user_id: String,
    pub product_id: IdParam,
    #[validate(length(min = 1))]
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct ProductPage<'a> {
    pub products: Vec<&'a Product>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteUpdate {
    pub message: &'static str,
    pub changed: bool,
}

/// `GET /api/favorites?userId=&page=&limit=`
pub async fn list_favorites(State(state): State<AppState>, query: QueryPairs) -> ApiResult {
    let Query(pairs) = query?;
    let query: FavoritesQuery = from_pairs(pairs);
    let user = user_id("userId", query.user_id.unwrap_or_default())?;
    let request = page_request(query.page.as_deref(), query.limit.as_deref(), DEFAULT_LIMIT);
    let page = paginate(state.favorites.products(&user).await, request);
    Ok(ok(ProductPage { products: page.items, pagination: page.pagination }))
}

/// `POST /api/favorites` with `{userId, productId, action: add|remove}`
pub async fn update_favorite(State(state): State<AppState>, body: Result<Json<FavoriteRequest>, JsonRejection>) -> ApiResult {
    let Json(body) = body?;
    body.validate()?;
    let user = user_id("userId", body.user_id)?;
    let product = body.product_id.product_id()?;

    let update = match body.action.as_str() {
        "add" => FavoriteUpdate {
            message: "Added the product to the favorites list",
            changed: state.favorites.add(&user, product).await?,
        },
        "remove" => FavoriteUpdate {
            message: "Removed the product from the favorites list",
            changed: state.favorites.remove(&user, &product).await?,
        },
        other => return Err(ApiError::bad_request(format!("action must be \"add\" or \"remove\", got \"{other}\""))),
    };
    Ok(ok(update))
}
