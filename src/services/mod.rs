//! Stateful services owned by the application state.

pub mod favorites;
pub mod session;

pub use favorites::FavoriteRegistry;
pub use session::{CartAdd, CartView, SessionStores};

use crate::domain::events::DomainEvent;

pub(crate) fn log_events(owner: &str, events: Vec<DomainEvent>) {
    for event in events {
        tracing::debug!(owner, ?event, "domain event");
    }
}
