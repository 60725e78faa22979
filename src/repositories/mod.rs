// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Registries and storages are DUMB containers
// - NO invariant enforcement (the domain and the catalog do that)
// - NO event emission
// - Storage moves collection text only

pub mod collection_storage;
pub mod movie_registry;
pub mod person_registry;
pub mod records;
pub mod sqlite_collection_storage;

pub use collection_storage::{
    CollectionStorage, CollectionStorageExt, MemoryCollectionStorage, Records,
};
pub use movie_registry::MovieRegistry;
pub use person_registry::PersonRegistry;
pub use records::{ActorRecord, MovieRecord, PersonRecord};
pub use sqlite_collection_storage::SqliteCollectionStorage;

#[cfg(test)]
pub use collection_storage::MockCollectionStorage;
