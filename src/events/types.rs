// events/types.rs
//
// All domain events in the catalog.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{MovieId, PersonId, PersonKind};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// PERSON EVENTS
// ============================================================================

/// A person entered the registry, or gained the `kind` role
#[derive(Debug, Clone, Serialize)]
pub struct PersonAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub person_id: PersonId,
    pub kind: PersonKind,
}

impl PersonAdded {
    pub fn new(person_id: PersonId, kind: PersonKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            person_id,
            kind,
        }
    }
}

impl_domain_event!(PersonAdded);

#[derive(Debug, Clone, Serialize)]
pub struct PersonUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub person_id: PersonId,
    pub updated_properties: Vec<String>,
}

impl PersonUpdated {
    pub fn new(person_id: PersonId, updated_properties: Vec<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            person_id,
            updated_properties,
        }
    }
}

impl_domain_event!(PersonUpdated);

/// A person left the registry, or lost the `kind` role
#[derive(Debug, Clone, Serialize)]
pub struct PersonDestroyed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub person_id: PersonId,
    pub kind: PersonKind,
}

impl PersonDestroyed {
    pub fn new(person_id: PersonId, kind: PersonKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            person_id,
            kind,
        }
    }
}

impl_domain_event!(PersonDestroyed);

// ============================================================================
// MOVIE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MovieAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub title: String,
}

impl MovieAdded {
    pub fn new(movie_id: MovieId, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

impl_domain_event!(MovieAdded);

#[derive(Debug, Clone, Serialize)]
pub struct MovieUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub updated_properties: Vec<String>,
}

impl MovieUpdated {
    pub fn new(movie_id: MovieId, updated_properties: Vec<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            updated_properties,
        }
    }
}

impl_domain_event!(MovieUpdated);

#[derive(Debug, Clone, Serialize)]
pub struct MovieDestroyed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
}

impl MovieDestroyed {
    pub fn new(movie_id: MovieId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

impl_domain_event!(MovieDestroyed);

// ============================================================================
// PERSISTENCE EVENTS
// ============================================================================

/// Emitted after every collection was written
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSaved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub persons: usize,
    pub actors: usize,
    pub directors: usize,
    pub movies: usize,
}

impl CatalogSaved {
    pub fn new(persons: usize, actors: usize, directors: usize, movies: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            persons,
            actors,
            directors,
            movies,
        }
    }
}

impl_domain_event!(CatalogSaved);

/// Emitted after the registries were rebuilt from storage
#[derive(Debug, Clone, Serialize)]
pub struct CatalogLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub persons: usize,
    pub movies: usize,
    /// Records dropped because they violated a constraint
    pub rejected: usize,
}

impl CatalogLoaded {
    pub fn new(persons: usize, movies: usize, rejected: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            persons,
            movies,
            rejected,
        }
    }
}

impl_domain_event!(CatalogLoaded);
