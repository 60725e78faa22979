// src/services/test_support.rs
//
// Shared fixtures for the catalog scenario tests

use std::sync::Arc;

use crate::config::CollectionNames;
use crate::domain::{MovieSlots, PersonSlots};
use crate::events::EventBus;
use crate::repositories::{CollectionStorage, MemoryCollectionStorage};
use crate::services::Catalog;

pub fn empty_catalog() -> Catalog {
    catalog_on(Arc::new(MemoryCollectionStorage::new()))
}

pub fn catalog_on(storage: Arc<dyn CollectionStorage>) -> Catalog {
    Catalog::new(storage, Arc::new(EventBus::new()), CollectionNames::default())
}

/// The sample data set, in memory
pub fn sample_catalog() -> Catalog {
    let mut catalog = empty_catalog();
    catalog.create_test_data().unwrap();
    catalog
}

pub fn slots(person_id: i64, name: &str) -> PersonSlots {
    PersonSlots {
        person_id: Some(person_id),
        name: Some(name.to_string()),
        agent_id: None,
    }
}

pub fn movie(movie_id: i64, title: &str, director: i64, actors: &[i64]) -> MovieSlots {
    MovieSlots {
        movie_id: Some(movie_id),
        title: Some(title.to_string()),
        release_date: Some("1977-05-25".to_string()),
        director_id: Some(director),
        actor_ids: actors.to_vec(),
        ..Default::default()
    }
}
