//! View History Aggregate

use crate::domain::value_objects::{Capacity, ProductId};
use crate::domain::events::{DomainEvent, HistoryEvent};

/// Most-recent-first list of viewed products, capped.
#[derive(Clone, Debug, Default)]
pub struct ViewHistory {
    ids: Vec<ProductId>,
    capacity: Capacity,
    events: Vec<DomainEvent>,
}

impl ViewHistory {
    pub fn new(capacity: Capacity) -> Self {
        Self { ids: vec![], capacity, events: vec![] }
    }

    /// Rebuilds from a persisted list, dropping duplicates and anything past the cap.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>, capacity: Capacity) -> Self {
        let mut history = Self::new(capacity);
        for id in ids {
            if history.ids.len() == capacity.value() { break; }
            if !history.ids.contains(&id) { history.ids.push(id); }
        }
        history
    }

    pub fn ids(&self) -> &[ProductId] { &self.ids }
    pub fn len(&self) -> usize { self.ids.len() }
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }
    pub fn is_viewed(&self, id: &ProductId) -> bool { self.ids.contains(id) }

    /// Moves `id` to the front, inserting it if new. Returns the id pushed out
    /// by the cap, if any.
    pub fn record(&mut self, id: ProductId) -> Option<ProductId> {
        self.ids.retain(|i| *i != id);
        self.ids.insert(0, id.clone());
        let evicted = if self.ids.len() > self.capacity.value() { self.ids.pop() } else { None };
        self.raise_event(DomainEvent::History(HistoryEvent::Recorded { product_id: id, evicted: evicted.clone() }));
        evicted
    }

    pub fn clear(&mut self) {
        let count = std::mem::take(&mut self.ids).len();
        self.raise_event(DomainEvent::History(HistoryEvent::Cleared { count }));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: &str) -> ProductId { ProductId::new(v).unwrap() }

    #[test]
    fn test_record_moves_to_front() {
        let mut history = ViewHistory::new(Capacity::new(6));
        history.record(id("a"));
        history.record(id("b"));
        history.record(id("c"));
        assert_eq!(history.record(id("a")), None);
        assert_eq!(history.ids(), &[id("a"), id("c"), id("b")]);
        assert_eq!(history.len(), 3);
        assert!(history.is_viewed(&id("c")));
        assert!(!history.is_viewed(&id("z")));
    }

    #[test]
    fn test_record_past_cap_drops_oldest() {
        let mut history = ViewHistory::new(Capacity::new(3));
        for v in ["1", "2", "3"] { history.record(id(v)); }
        assert_eq!(history.record(id("4")), Some(id("1")));
        assert_eq!(history.ids(), &[id("4"), id("3"), id("2")]);
        assert!(!history.is_viewed(&id("1")));
    }

    #[test]
    fn test_from_ids_respects_cap() {
        let history = ViewHistory::from_ids([id("1"), id("1"), id("2"), id("3")], Capacity::new(2));
        assert_eq!(history.ids(), &[id("1"), id("2")]);
    }

    #[test]
    fn test_clear() {
        let mut history = ViewHistory::from_ids([id("1")], Capacity::default());
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.take_events(), vec![DomainEvent::History(HistoryEvent::Cleared { count: 1 })]);
    }
}
