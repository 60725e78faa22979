// src/lib.rs
// MovieDB - movies, the people who make them, and their associations
//
// Architecture:
// - Domain-centric: every rule lives in the domain, which never touches storage
// - Explicit context: the `Catalog` owns the registries, nothing is global
// - Event-driven: committed changes are announced on the event bus
// - Local storage: collections are JSON text in a SQLite file

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod utils;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    ActorRole, ConstraintViolation, DirectorRole, Enumeration, EnumerationError, Movie,
    MovieCategory, MovieId, MovieLookup, MovieSlots, Outcome, OutcomeExt, Person, PersonId,
    PersonKind, PersonLookup, PersonSlots, ViolationKind, GENRE, MOVIE_CATEGORY, MOVIE_RATING,
};

// ============================================================================
// PUBLIC API - Errors and configuration
// ============================================================================

pub use config::{CatalogConfig, CollectionNames};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{create_event_bus, DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{
    CollectionStorage, CollectionStorageExt, MemoryCollectionStorage, SqliteCollectionStorage,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{Catalog, LoadReport, UpdateMovieRequest, UpdatePersonRequest, UpdateReport};
