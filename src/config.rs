// src/config.rs
//
// Catalog configuration
//
// Resolution order for the database path:
// CLI flag > MOVIEDB_DATABASE > {data_dir}/moviedb/moviedb.db

use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Environment variable overriding the database location
pub const DATABASE_ENV_VAR: &str = "MOVIEDB_DATABASE";

const DEFAULT_DB_FILE: &str = "moviedb.db";
const APP_DIR: &str = "moviedb";

/// Storage keys of the four collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub persons: String,
    pub actors: String,
    pub directors: String,
    pub movies: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            persons: "persons".to_string(),
            actors: "actors".to_string(),
            directors: "directors".to_string(),
            movies: "movies".to_string(),
        }
    }
}

impl CollectionNames {
    pub fn all(&self) -> [&str; 4] {
        [&self.persons, &self.actors, &self.directors, &self.movies]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub database_path: PathBuf,
    pub collections: CollectionNames,
}

impl CatalogConfig {
    /// Configuration from the environment, falling back to the user data directory
    pub fn from_env() -> AppResult<Self> {
        let database_path = match env::var(DATABASE_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        Ok(Self {
            database_path,
            collections: CollectionNames::default(),
        })
    }

    /// Replace the database path, e.g. from a command-line flag
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }
}

fn default_database_path() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        AppError::Other("Could not determine the user data directory".to_string())
    })?;
    Ok(data_dir.join(APP_DIR).join(DEFAULT_DB_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collection_names() {
        let names = CollectionNames::default();
        assert_eq!(names.all(), ["persons", "actors", "directors", "movies"]);
    }

    #[test]
    fn test_explicit_path_wins() {
        let config = CatalogConfig {
            database_path: PathBuf::from("a.db"),
            collections: CollectionNames::default(),
        }
        .with_database_path("/tmp/b.db");
        assert_eq!(config.database_path, PathBuf::from("/tmp/b.db"));
    }
}
