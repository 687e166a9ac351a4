//! HTTP surface: shared state, router and handlers.

pub mod assistant;
pub mod favorites;
pub mod products;
pub mod response;
pub mod sessions;
pub mod suggestions;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::facets::Facets;
use crate::query::ListingDefaults;
use crate::services::{FavoriteRegistry, SessionStores};
use crate::storage::KeyValueStore;

/// Everything the handlers share. Owned by the composition root and cloned
/// per request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub facets: Arc<Facets>,
    pub products: ListingDefaults,
    pub browse: ListingDefaults,
    pub favorites: Arc<FavoriteRegistry>,
    pub sessions: Arc<SessionStores>,
    pub suggestion_cap: usize,
    pub suggestion_delay: Duration,
}

impl AppState {
    pub fn new(catalog: Catalog, storage: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            facets: Arc::new(Facets::from_products(catalog.products())),
            products: config.catalog.products,
            browse: config.catalog.browse,
            favorites: Arc::new(FavoriteRegistry::new(catalog.clone())),
            sessions: Arc::new(SessionStores::new(
                catalog.clone(),
                storage,
                config.stores.history_capacity,
                config.stores.cart_add_delay,
            )),
            suggestion_cap: config.catalog.suggestion_cap,
            suggestion_delay: config.catalog.suggestion_delay,
            catalog,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-courses"})) }))
        .route("/api/products", get(products::list_products).post(products::search_products))
        .route("/api/products/:id", get(products::get_product))
        .route("/api/catalog", get(products::browse_catalog))
        .route("/api/filters", get(products::filters))
        .route("/api/favorites", get(favorites::list_favorites).post(favorites::update_favorite))
        .route("/api/suggestions", get(suggestions::suggestions))
        .route("/api/assistant", post(assistant::ask))
        .route(
            "/api/sessions/:session/favorites",
            get(sessions::list_favorites).post(sessions::toggle_favorite).delete(sessions::clear_favorites),
        )
        .route("/api/sessions/:session/cart", get(sessions::get_cart).post(sessions::add_to_cart).delete(sessions::clear_cart))
        .route("/api/sessions/:session/cart/:product_id", delete(sessions::remove_from_cart))
        .route(
            "/api/sessions/:session/history",
            get(sessions::list_history).post(sessions::record_view).delete(sessions::clear_history),
        )
        .layer(ServiceBuilder::new().layer(trace).layer(CorsLayer::permissive()))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Response;

    use crate::storage::MemoryStore;

    /// Embedded catalog, in-memory storage and no artificial delays.
    pub fn state() -> AppState {
        let mut config = Config::default();
        config.catalog.suggestion_delay = Duration::ZERO;
        config.stores.cart_add_delay = Duration::ZERO;
        AppState::new(Catalog::embedded().unwrap(), Arc::new(MemoryStore::new()), &config)
    }

    pub async fn read_json(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
