//! Cart Aggregate

use serde::Serialize;
use crate::domain::value_objects::ProductId;
use crate::domain::events::{CartEvent, DomainEvent};

/// Set of product ids with one in-flight add slot for the whole cart.
///
/// Adding is split in two steps so callers can model latency between them:
/// [`Cart::begin_add`] claims the slot, [`Cart::complete_add`] settles the id
/// into the cart and frees the slot.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<ProductId>,
    adding: Option<ProductId>,
    events: Vec<DomainEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOutcome {
    Started,
    AlreadyInCart,
    Busy,
}

impl Cart {
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut cart = Self::default();
        for id in ids {
            if !cart.items.contains(&id) { cart.items.push(id); }
        }
        cart
    }

    pub fn items(&self) -> &[ProductId] { &self.items }
    pub fn count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn is_in_cart(&self, id: &ProductId) -> bool { self.items.contains(id) }
    pub fn is_adding(&self) -> bool { self.adding.is_some() }

    pub fn begin_add(&mut self, id: ProductId) -> AddOutcome {
        if self.is_in_cart(&id) { return AddOutcome::AlreadyInCart; }
        if self.is_adding() { return AddOutcome::Busy; }
        self.raise_event(DomainEvent::Cart(CartEvent::AddStarted { product_id: id.clone() }));
        self.adding = Some(id);
        AddOutcome::Started
    }

    /// Settles the pending add. Returns the id that landed, if any.
    pub fn complete_add(&mut self) -> Option<ProductId> {
        let id = self.adding.take()?;
        if !self.items.contains(&id) { self.items.push(id.clone()); }
        self.raise_event(DomainEvent::Cart(CartEvent::Added { product_id: id.clone() }));
        Some(id)
    }

    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != id);
        if self.items.len() == before { return false; }
        self.raise_event(DomainEvent::Cart(CartEvent::Removed { product_id: id.clone() }));
        true
    }

    pub fn clear(&mut self) {
        let count = std::mem::take(&mut self.items).len();
        self.raise_event(DomainEvent::Cart(CartEvent::Cleared { count }));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: &str) -> ProductId { ProductId::new(v).unwrap() }

    #[test]
    fn test_cart_operations() {
        let mut cart = Cart::default();
        assert_eq!(cart.begin_add(id("P1")), AddOutcome::Started);
        assert!(cart.is_adding());
        assert!(!cart.is_in_cart(&id("P1")));
        assert_eq!(cart.complete_add(), Some(id("P1")));
        assert_eq!(cart.count(), 1);
        assert!(!cart.is_adding());
        assert_eq!(cart.begin_add(id("P1")), AddOutcome::AlreadyInCart);
        assert!(cart.remove_item(&id("P1")));
        assert!(!cart.remove_item(&id("P1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_single_flight_per_cart() {
        let mut cart = Cart::default();
        assert_eq!(cart.begin_add(id("P1")), AddOutcome::Started);
        assert_eq!(cart.begin_add(id("P2")), AddOutcome::Busy);
        cart.complete_add();
        assert_eq!(cart.items(), &[id("P1")]);
        assert_eq!(cart.complete_add(), None);
    }

    #[test]
    fn test_clear_keeps_pending_add() {
        let mut cart = Cart::from_ids([id("A"), id("B")]);
        cart.begin_add(id("C"));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.complete_add(), Some(id("C")));
        assert_eq!(cart.count(), 1);
    }
}
