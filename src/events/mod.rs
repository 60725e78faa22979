// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};
pub use types::{
    CatalogLoaded, CatalogSaved, DomainEvent, MovieAdded, MovieDestroyed, MovieUpdated,
    PersonAdded, PersonDestroyed, PersonUpdated,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
