//! Session-scoped favorites, cart and view history under `/api/sessions/:session`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::response::{ok, product_id, user_id, ApiError, ApiResult, IdParam};
use super::AppState;
use crate::domain::aggregates::Toggle;
use crate::domain::value_objects::ProductId;
use crate::services::{CartAdd, CartView};
use crate::Product;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductBody {
    pub product_id: IdParam,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdList<'a> {
    pub product_ids: Vec<ProductId>,
    pub products: Vec<&'a Product>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResult {
    pub product_id: ProductId,
    pub status: Toggle,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct CartResult<'a> {
    pub result: CartAdd,
    pub cart: CartView<'a>,
}

#[derive(Debug, Serialize)]
pub struct CartRemoval<'a> {
    pub removed: bool,
    pub cart: CartView<'a>,
}

fn body_product(body: Result<Json<ProductBody>, JsonRejection>) -> Result<ProductId, ApiError> {
    let Json(body) = body?;
    body.product_id.product_id()
}

// -----------------------------------------------------------------------------
// Favorites
// -----------------------------------------------------------------------------

pub async fn list_favorites(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult {
    let session = user_id("session", session)?;
    Ok(ok(IdList {
        product_ids: state.sessions.favorite_ids(&session),
        products: state.sessions.favorite_products(&session),
    }))
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(session): Path<String>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult {
    let session = user_id("session", session)?;
    let product = body_product(body)?;
    let status = state.sessions.toggle_favorite(&session, product.clone()).await?;
    Ok(ok(ToggleResult { is_favorite: status == Toggle::Added, status, product_id: product }))
}

pub async fn clear_favorites(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult {
    let session = user_id("session", session)?;
    state.sessions.clear_favorites(&session).await?;
    Ok(ok(IdList { product_ids: vec![], products: vec![] }))
}

// -----------------------------------------------------------------------------
// Cart
// -----------------------------------------------------------------------------

pub async fn get_cart(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult {
    let session = user_id("session", session)?;
    Ok(ok(state.sessions.cart(&session).await))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(session): Path<String>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult {
    let session = user_id("session", session)?;
    let product = body_product(body)?;
    let result = state.sessions.add_to_cart(&session, product).await?;
    Ok(ok(CartResult { result, cart: state.sessions.cart(&session).await }))
}

pub async fn remove_from_cart(State(state): State<AppState>, Path((session, product)): Path<(String, String)>) -> ApiResult {
    let session = user_id("session", session)?;
    let product = product_id(product)?;
    let removed = state.sessions.remove_from_cart(&session, &product).await?;
    Ok(ok(CartRemoval { removed, cart: state.sessions.cart(&session).await }))
}

pub async fn clear_cart(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult {
    let session = user_id("session", session)?;
    state.sessions.clear_cart(&session).await?;
    Ok(ok(state.sessions.cart(&session).await))
}

// -----------------------------------------------------------------------------
// View history
// -----------------------------------------------------------------------------

pub async fn list_history(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult {
    let session = user_id("session", session)?;
    Ok(ok(IdList {
        product_ids: state.sessions.history_ids(&session),
        products: state.sessions.history_products(&session),
    }))
}

pub async fn record_view(
    State(state): State<AppState>,
    Path(session): Path<String>,
    body: Result<Json<ProductBody>, JsonRejection>,
) -> ApiResult {
    let session = user_id("session", session)?;
    let product = body_product(body)?;
    let product_ids = state.sessions.record_view(&session, product).await?;
    Ok(ok(IdList { products: state.catalog.resolve(&product_ids), product_ids }))
}

pub async fn clear_history(State(state): State<AppState>, Path(session): Path<String>) -> ApiResult {
    let session = user_id("session", session)?;
    state.sessions.clear_history(&session).await?;
    Ok(ok(IdList { product_ids: vec![], products: vec![] }))
}
