//! Server-side favorites keyed by user id.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::catalog::Catalog;
use crate::domain::aggregates::Favorites;
use crate::domain::value_objects::{ProductId, UserId};
use crate::{CatalogError, Product, Result};

use super::log_events;

/// Process-wide favorites map owned by the application state. Writes for
/// different users never touch the same entry; concurrent writes for the same
/// user are last-write-wins.
pub struct FavoriteRegistry {
    catalog: Arc<Catalog>,
    users: RwLock<HashMap<UserId, Favorites>>,
}

impl FavoriteRegistry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, users: RwLock::new(HashMap::new()) }
    }

    /// Adds a favorite, creating the user's set on first write.
    pub async fn add(&self, user: &UserId, product: ProductId) -> Result<bool> {
        self.ensure_exists(&product)?;
        let mut users = self.users.write().await;
        let favorites = users.entry(user.clone()).or_default();
        let added = favorites.add(product);
        log_events(user.as_str(), favorites.take_events());
        info!(user = %user, added, "favorite added");
        Ok(added)
    }

    pub async fn remove(&self, user: &UserId, product: &ProductId) -> Result<bool> {
        self.ensure_exists(product)?;
        let mut users = self.users.write().await;
        let Some(favorites) = users.get_mut(user) else { return Ok(false) };
        let removed = favorites.remove(product);
        log_events(user.as_str(), favorites.take_events());
        info!(user = %user, removed, "favorite removed");
        Ok(removed)
    }

    pub async fn is_favorite(&self, user: &UserId, product: &ProductId) -> bool {
        self.users.read().await.get(user).is_some_and(|f| f.is_favorite(product))
    }

    /// The user's favorites in catalog order. Ids no longer in the catalog are dropped.
    pub async fn products(&self, user: &UserId) -> Vec<&Product> {
        let ids: Vec<ProductId> = match self.users.read().await.get(user) {
            Some(favorites) => favorites.ids().to_vec(),
            None => return vec![],
        };
        self.catalog.resolve_in_catalog_order(&ids)
    }

    fn ensure_exists(&self, product: &ProductId) -> Result<()> {
        if self.catalog.contains(product.as_str()) { Ok(()) } else { Err(CatalogError::ProductNotFound) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::product;

    fn registry() -> FavoriteRegistry {
        let catalog = Catalog::new(vec![product("1", 100), product("2", 200), product("3", 300)]).unwrap();
        FavoriteRegistry::new(Arc::new(catalog))
    }

    fn user(v: &str) -> UserId { UserId::new(v).unwrap() }
    fn id(v: &str) -> ProductId { ProductId::new(v).unwrap() }

    #[tokio::test]
    async fn test_add_and_list_in_catalog_order() {
        let registry = registry();
        assert!(registry.add(&user("u1"), id("3")).await.unwrap());
        assert!(registry.add(&user("u1"), id("1")).await.unwrap());
        assert!(!registry.add(&user("u1"), id("1")).await.unwrap());
        let ids: Vec<&str> = registry.products(&user("u1")).await.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(registry.products(&user("u2")).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let registry = registry();
        let err = registry.add(&user("u1"), id("404")).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound));
        assert_eq!(err.to_string(), "product not found");
        assert!(registry.remove(&user("u1"), &id("404")).await.is_err());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let registry = registry();
        registry.add(&user("u1"), id("2")).await.unwrap();
        assert!(registry.is_favorite(&user("u1"), &id("2")).await);
        assert!(!registry.is_favorite(&user("u2"), &id("2")).await);
        assert!(!registry.remove(&user("u2"), &id("2")).await.unwrap());
        assert!(registry.remove(&user("u1"), &id("2")).await.unwrap());
        assert!(!registry.is_favorite(&user("u1"), &id("2")).await);
    }
}
