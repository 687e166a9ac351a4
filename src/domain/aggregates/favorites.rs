//! Favorites Aggregate

use serde::Serialize;
use crate::domain::value_objects::ProductId;
use crate::domain::events::{DomainEvent, FavoriteEvent};

/// Deduplicated set of favorited products. Insertion order is kept only so the
/// persisted array is stable; membership is what matters.
#[derive(Clone, Debug, Default)]
pub struct Favorites {
    ids: Vec<ProductId>,
    events: Vec<DomainEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle { Added, Removed }

impl Favorites {
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut favorites = Self::default();
        for id in ids {
            if !favorites.ids.contains(&id) { favorites.ids.push(id); }
        }
        favorites
    }

    pub fn ids(&self) -> &[ProductId] { &self.ids }
    pub fn len(&self) -> usize { self.ids.len() }
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }
    pub fn is_favorite(&self, id: &ProductId) -> bool { self.ids.contains(id) }

    /// Flips membership. Two calls in a row restore the original state.
    pub fn toggle(&mut self, id: ProductId) -> Toggle {
        if self.remove(&id) { Toggle::Removed } else { self.add(id); Toggle::Added }
    }

    /// Returns false when the id was already present.
    pub fn add(&mut self, id: ProductId) -> bool {
        if self.is_favorite(&id) { return false; }
        self.ids.push(id.clone());
        self.raise_event(DomainEvent::Favorite(FavoriteEvent::Added { product_id: id }));
        true
    }

    /// Returns false when the id was not present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|i| i != id);
        if self.ids.len() == before { return false; }
        self.raise_event(DomainEvent::Favorite(FavoriteEvent::Removed { product_id: id.clone() }));
        true
    }

    pub fn clear(&mut self) {
        let count = std::mem::take(&mut self.ids).len();
        self.raise_event(DomainEvent::Favorite(FavoriteEvent::Cleared { count }));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: &str) -> ProductId { ProductId::new(v).unwrap() }

    #[test]
    fn test_toggle_round_trip() {
        let mut favorites = Favorites::default();
        assert_eq!(favorites.toggle(id("p1")), Toggle::Added);
        assert!(favorites.is_favorite(&id("p1")));
        assert_eq!(favorites.toggle(id("p1")), Toggle::Removed);
        assert!(!favorites.is_favorite(&id("p1")));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut favorites = Favorites::from_ids([id("a"), id("b")]);
        favorites.toggle(id("b"));
        favorites.toggle(id("b"));
        favorites.toggle(id("c"));
        favorites.toggle(id("c"));
        assert!(favorites.is_favorite(&id("a")) && favorites.is_favorite(&id("b")));
        assert!(!favorites.is_favorite(&id("c")));
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_from_ids_deduplicates() {
        let favorites = Favorites::from_ids([id("a"), id("a"), id("b")]);
        assert_eq!(favorites.ids(), &[id("a"), id("b")]);
    }

    #[test]
    fn test_events() {
        let mut favorites = Favorites::default();
        favorites.add(id("a"));
        assert!(!favorites.add(id("a")));
        favorites.clear();
        let events = favorites.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], DomainEvent::Favorite(FavoriteEvent::Cleared { count: 1 }));
        assert!(favorites.take_events().is_empty());
    }
}
