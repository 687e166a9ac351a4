//! Aggregates module
pub mod favorites;
pub mod cart;
pub mod history;

pub use favorites::{Favorites, Toggle};
pub use cart::{AddOutcome, Cart};
pub use history::ViewHistory;
