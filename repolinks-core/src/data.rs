use crate::index::RepositoryRecord;
use crate::structure::Structure;
use rusqlite::{Connection, OpenFlags, Result, params};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Local document store: repository structures kept as JSON in a SQLite file,
/// grouped by collection name the same way the document database groups them.
pub struct Database {
    conn: Connection,
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl Database {
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Create (or reuse) a store at `path` and make sure the schema is there.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an existing store. Fails instead of creating an empty file when
    /// nothing is at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
CREATE TABLE IF NOT EXISTS repo_structures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    repo TEXT,                -- NULL when the document had no name
    structure TEXT,           -- JSON; NULL when the document had no structure field
    stored_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_repo_structures_collection ON repo_structures(collection);
            ",
        )?;
        Ok(())
    }

    /// Store one document. `structure` of `None` records a document without a
    /// structure field, which is different from a stored JSON `null`.
    pub fn insert_document(
        &self,
        collection: &str,
        repo: Option<&str>,
        structure: Option<&Structure>,
    ) -> Result<i64> {
        let timestamp = current_timestamp();
        let structure_json = match structure {
            Some(s) => Some(
                serde_json::to_string(s)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?,
            ),
            None => None,
        };

        self.conn.execute(
            "INSERT INTO repo_structures (collection, repo, structure, stored_at) VALUES (?1, ?2, ?3, ?4)",
            params![collection, repo, structure_json, timestamp],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Every document of `collection`, in insertion order.
    pub fn get_records_by_collection(&self, collection: &str) -> Result<Vec<RepositoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT repo, structure FROM repo_structures WHERE collection = ?1 ORDER BY id",
        )?;

        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(repo, structure_json)| {
                let structure = match structure_json {
                    Some(json) => {
                        let value: serde_json::Value = serde_json::from_str(&json).map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                1,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?;
                        Some(Structure::from(value))
                    }
                    None => None,
                };
                Ok(RepositoryRecord::new(repo, structure))
            })
            .collect()
    }

    pub fn count_documents(&self, collection: &str) -> Result<i64> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM repo_structures WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
    }

    pub fn list_collections(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT collection, COUNT(*) FROM repo_structures GROUP BY collection ORDER BY collection",
        )?;

        let collections = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>>>()?;

        Ok(collections)
    }
}
