// src/repositories/collection_storage.rs
//
// Key-value storage of entity collections
//
// A collection is a JSON object mapping string ids to plain records.
// Backends only move text; parsing and the "absent or malformed means
// empty" rule live in the provided methods.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Records of one collection, keyed by the entity id as a string
pub type Records = BTreeMap<String, Value>;

#[cfg_attr(test, mockall::automock)]
pub trait CollectionStorage: Send + Sync {
    /// Raw JSON text of a collection, `None` when it was never written
    fn read_raw(&self, name: &str) -> AppResult<Option<String>>;

    fn write_raw(&self, name: &str, body: &str) -> AppResult<()>;

    /// Write several (name, body) pairs. Either every body is stored or,
    /// on error, none of them is.
    fn write_all_raw(&self, bodies: &[(String, String)]) -> AppResult<()>;

    fn remove_raw(&self, name: &str) -> AppResult<()>;
}

/// Collection-level operations available on every storage backend
pub trait CollectionStorageExt {
    /// Load a collection. Never fails: a storage error, a missing
    /// collection or malformed text all yield an empty mapping.
    fn load_collection(&self, name: &str) -> Records;

    fn save_collection(&self, name: &str, records: &Records) -> AppResult<()>;

    /// Save several collections in one all-or-nothing write
    fn save_collections(&self, collections: &[(&str, Records)]) -> AppResult<()>;

    fn clear_collection(&self, name: &str) -> AppResult<()>;
}

impl<S: CollectionStorage + ?Sized> CollectionStorageExt for S {
    fn load_collection(&self, name: &str) -> Records {
        let body = match self.read_raw(name) {
            Ok(Some(body)) => body,
            Ok(None) => return Records::new(),
            Err(e) => {
                log::error!("Error when reading collection '{}': {}", name, e);
                return Records::new();
            }
        };
        match serde_json::from_str::<Records>(&body) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Collection '{}' is malformed, treating it as empty: {}", name, e);
                Records::new()
            }
        }
    }

    fn save_collection(&self, name: &str, records: &Records) -> AppResult<()> {
        let body = serde_json::to_string(records)?;
        self.write_raw(name, &body)
    }

    fn save_collections(&self, collections: &[(&str, Records)]) -> AppResult<()> {
        let bodies = collections
            .iter()
            .map(|(name, records)| Ok((name.to_string(), serde_json::to_string(records)?)))
            .collect::<AppResult<Vec<_>>>()?;
        self.write_all_raw(&bodies)
    }

    fn clear_collection(&self, name: &str) -> AppResult<()> {
        self.remove_raw(name)
    }
}

/// Process-local storage, used by tests and scratch catalogs
#[derive(Debug, Default)]
pub struct MemoryCollectionStorage {
    collections: RwLock<HashMap<String, String>>,
}

impl MemoryCollectionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> AppError {
        AppError::Storage("in-memory storage lock poisoned".to_string())
    }
}

impl CollectionStorage for MemoryCollectionStorage {
    fn read_raw(&self, name: &str) -> AppResult<Option<String>> {
        let collections = self.collections.read().map_err(|_| Self::poisoned())?;
        Ok(collections.get(name).cloned())
    }

    fn write_raw(&self, name: &str, body: &str) -> AppResult<()> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;
        collections.insert(name.to_string(), body.to_string());
        Ok(())
    }

    fn write_all_raw(&self, bodies: &[(String, String)]) -> AppResult<()> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;
        for (name, body) in bodies {
            collections.insert(name.clone(), body.clone());
        }
        Ok(())
    }

    fn remove_raw(&self, name: &str) -> AppResult<()> {
        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;
        collections.remove(name);
        Ok(())
    }
}
