// src/repositories/sqlite_collection_storage.rs
//
// Collection storage backed by the `collections` table
//
// One row per collection; the body column holds the JSON text as-is.

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use crate::db::{get_connection, initialize_database, ConnectionPool};
use crate::error::AppResult;
use crate::repositories::collection_storage::CollectionStorage;

const UPSERT_COLLECTION: &str = "INSERT OR REPLACE INTO collections (name, body, updated_at)
     VALUES (?1, ?2, datetime('now'))";

pub struct SqliteCollectionStorage {
    pool: Arc<ConnectionPool>,
}

impl SqliteCollectionStorage {
    /// Wrap a pool, making sure the schema exists first
    pub fn new(pool: Arc<ConnectionPool>) -> AppResult<Self> {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Names of the collections currently stored
    pub fn collection_names(&self) -> AppResult<Vec<String>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare("SELECT name FROM collections ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl CollectionStorage for SqliteCollectionStorage {
    fn read_raw(&self, name: &str) -> AppResult<Option<String>> {
        let conn = get_connection(&self.pool)?;
        let body = conn
            .query_row(
                "SELECT body FROM collections WHERE name = ?1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(body)
    }

    fn write_raw(&self, name: &str, body: &str) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        conn.execute(UPSERT_COLLECTION, params![name, body])?;
        Ok(())
    }

    fn write_all_raw(&self, bodies: &[(String, String)]) -> AppResult<()> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;
        for (name, body) in bodies {
            tx.execute(UPSERT_COLLECTION, params![name, body])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_raw(&self, name: &str) -> AppResult<()> {
        let conn = get_connection(&self.pool)?;
        conn.execute("DELETE FROM collections WHERE name = ?1", params![name])?;
        Ok(())
    }
}
