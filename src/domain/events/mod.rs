//! Domain events
use crate::domain::value_objects::ProductId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainEvent {
    Favorite(FavoriteEvent),
    Cart(CartEvent),
    History(HistoryEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FavoriteEvent {
    Added { product_id: ProductId },
    Removed { product_id: ProductId },
    Cleared { count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    AddStarted { product_id: ProductId },
    Added { product_id: ProductId },
    Removed { product_id: ProductId },
    Cleared { count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryEvent {
    Recorded { product_id: ProductId, evicted: Option<ProductId> },
    Cleared { count: usize },
}
