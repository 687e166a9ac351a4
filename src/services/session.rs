//! Session-scoped favorites, cart and view history, persisted through the
//! key-value port under `{session}:{key}`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::domain::aggregates::{AddOutcome, Cart, Favorites, Toggle, ViewHistory};
use crate::domain::value_objects::{Capacity, ProductId, UserId};
use crate::storage::{self, KeyValueStore, CART_KEY, FAVORITES_KEY, VIEW_HISTORY_KEY};
use crate::{CatalogError, Product, Result};

use super::log_events;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CartAdd {
    Added,
    AlreadyInCart,
    Busy,
}

pub struct SessionStores {
    catalog: Arc<Catalog>,
    storage: Arc<dyn KeyValueStore>,
    history_capacity: Capacity,
    cart_latency: Duration,
    // Carts stay resident because the in-flight add flag is never persisted.
    carts: Mutex<HashMap<UserId, Cart>>,
    // Serialises read-modify-write of favorites and history within this process.
    write_lock: Mutex<()>,
}

impl SessionStores {
    pub fn new(
        catalog: Arc<Catalog>,
        storage: Arc<dyn KeyValueStore>,
        history_capacity: Capacity,
        cart_latency: Duration,
    ) -> Self {
        Self {
            catalog,
            storage,
            history_capacity,
            cart_latency,
            carts: Mutex::new(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    pub fn favorite_ids(&self, session: &UserId) -> Vec<ProductId> {
        self.favorites(session).ids().to_vec()
    }

    pub fn favorite_products(&self, session: &UserId) -> Vec<&Product> {
        self.catalog.resolve(self.favorites(session).ids())
    }

    pub fn is_favorite(&self, session: &UserId, product: &ProductId) -> bool {
        self.favorites(session).is_favorite(product)
    }

    /// Adding needs a catalog product. Removing does not, so a stale id can
    /// always be toggled off.
    pub async fn toggle_favorite(&self, session: &UserId, product: ProductId) -> Result<Toggle> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.favorites(session);
        if !favorites.is_favorite(&product) {
            self.ensure_exists(&product)?;
        }
        let toggle = favorites.toggle(product);
        self.save_ids(session, FAVORITES_KEY, favorites.ids()).await?;
        log_events(session.as_str(), favorites.take_events());
        Ok(toggle)
    }

    pub async fn clear_favorites(&self, session: &UserId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut favorites = self.favorites(session);
        favorites.clear();
        self.persist(self.key(session, FAVORITES_KEY), None).await?;
        log_events(session.as_str(), favorites.take_events());
        Ok(())
    }

    fn favorites(&self, session: &UserId) -> Favorites {
        Favorites::from_ids(self.load_ids(session, FAVORITES_KEY))
    }

    // -------------------------------------------------------------------------
    // View history
    // -------------------------------------------------------------------------

    pub fn history_ids(&self, session: &UserId) -> Vec<ProductId> {
        self.history(session).ids().to_vec()
    }

    pub fn history_products(&self, session: &UserId) -> Vec<&Product> {
        self.catalog.resolve(self.history(session).ids())
    }

    pub async fn record_view(&self, session: &UserId, product: ProductId) -> Result<Vec<ProductId>> {
        self.ensure_exists(&product)?;
        let _guard = self.write_lock.lock().await;
        let mut history = self.history(session);
        history.record(product);
        self.save_ids(session, VIEW_HISTORY_KEY, history.ids()).await?;
        log_events(session.as_str(), history.take_events());
        Ok(history.ids().to_vec())
    }

    pub async fn clear_history(&self, session: &UserId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.history(session);
        history.clear();
        self.persist(self.key(session, VIEW_HISTORY_KEY), None).await?;
        log_events(session.as_str(), history.take_events());
        Ok(())
    }

    fn history(&self, session: &UserId) -> ViewHistory {
        ViewHistory::from_ids(self.load_ids(session, VIEW_HISTORY_KEY), self.history_capacity)
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds after the configured latency. While one add is in flight for a
    /// session, further adds to that session are dropped as [`CartAdd::Busy`].
    pub async fn add_to_cart(&self, session: &UserId, product: ProductId) -> Result<CartAdd> {
        self.ensure_exists(&product)?;
        let outcome = {
            let mut carts = self.carts.lock().await;
            self.cart_entry(&mut carts, session).begin_add(product)
        };
        match outcome {
            AddOutcome::AlreadyInCart => return Ok(CartAdd::AlreadyInCart),
            AddOutcome::Busy => {
                debug!(session = %session, "cart add already in flight");
                return Ok(CartAdd::Busy);
            }
            AddOutcome::Started => {}
        }

        tokio::time::sleep(self.cart_latency).await;

        let mut carts = self.carts.lock().await;
        let cart = self.cart_entry(&mut carts, session);
        let added = cart.complete_add();
        log_events(session.as_str(), cart.take_events());
        let items = cart.items().to_vec();
        self.save_ids(session, CART_KEY, &items).await?;
        info!(session = %session, product = ?added, "cart item added");
        Ok(CartAdd::Added)
    }

    pub async fn remove_from_cart(&self, session: &UserId, product: &ProductId) -> Result<bool> {
        let mut carts = self.carts.lock().await;
        let cart = self.cart_entry(&mut carts, session);
        let removed = cart.remove_item(product);
        log_events(session.as_str(), cart.take_events());
        if removed {
            let items = cart.items().to_vec();
            self.save_ids(session, CART_KEY, &items).await?;
        }
        Ok(removed)
    }

    pub async fn clear_cart(&self, session: &UserId) -> Result<()> {
        let mut carts = self.carts.lock().await;
        let cart = self.cart_entry(&mut carts, session);
        cart.clear();
        log_events(session.as_str(), cart.take_events());
        self.persist(self.key(session, CART_KEY), None).await
    }

    pub async fn cart(&self, session: &UserId) -> CartView<'_> {
        let mut carts = self.carts.lock().await;
        let cart = self.cart_entry(&mut carts, session);
        CartView {
            products: self.catalog.resolve(cart.items()),
            count: cart.count(),
            is_adding: cart.is_adding(),
        }
    }

    fn cart_entry<'c>(&self, carts: &'c mut HashMap<UserId, Cart>, session: &UserId) -> &'c mut Cart {
        carts
            .entry(session.clone())
            .or_insert_with(|| Cart::from_ids(self.load_ids(session, CART_KEY)))
    }

    // -------------------------------------------------------------------------

    fn key(&self, session: &UserId, key: &str) -> String {
        storage::session_key(session.as_str(), key)
    }

    async fn save_ids(&self, session: &UserId, key: &str, ids: &[ProductId]) -> Result<()> {
        let value = storage::encode_ids(ids)?;
        self.persist(self.key(session, key), Some(value)).await
    }

    /// Sets or removes `key` on the blocking pool; a file-backed store does disk I/O.
    async fn persist(&self, key: String, value: Option<String>) -> Result<()> {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || match value {
            Some(value) => storage.set(&key, value),
            None => storage.remove(&key),
        })
        .await
        .map_err(|error| CatalogError::Storage(format!("storage task failed: {error}")))?
    }

    fn load_ids(&self, session: &UserId, key: &str) -> Vec<ProductId> {
        storage::read_ids(self.storage.as_ref(), &self.key(session, key))
            .into_iter()
            .filter_map(|id| ProductId::new(id).ok())
            .collect()
    }

    fn ensure_exists(&self, product: &ProductId) -> Result<()> {
        if self.catalog.contains(product.as_str()) { Ok(()) } else { Err(CatalogError::ProductNotFound) }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub products: Vec<&'a Product>,
    pub count: usize,
    pub is_adding: bool,
}
