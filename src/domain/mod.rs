//! Per-user and per-session state: favorites, cart and view history.
pub mod aggregates;
pub mod events;
pub mod value_objects;
