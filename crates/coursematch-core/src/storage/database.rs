//! SQLite-based persistence.
//!
//! Provides:
//! - Key-value store for application state (the persisted wizard session)
//! - History of successful classifications

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError};
use crate::gateway::Recommendation;
use crate::profile::Profile;

/// One stored classification: the profile that was sent and what came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRecord {
    pub id: i64,
    pub personality_type: String,
    pub profile: Profile,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

/// Raw row before JSON columns are decoded.
type ClassificationRow = (i64, String, String, String, String);

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/coursematch/coursematch.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("coursematch.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        migrations::migrate(&self.conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // ── Key-value store ──────────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key; returns whether it existed.
    pub fn kv_delete(&self, key: &str) -> Result<bool, DatabaseError> {
        let removed = self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }

    // ── Classification history ───────────────────────────────────────

    /// Store a successful classification and return its id.
    pub fn record_classification(
        &self,
        profile: &Profile,
        recommendations: &[Recommendation],
    ) -> Result<i64, CoreError> {
        let personality_type = profile
            .personality_type()
            .map(|t| t.to_string())
            .unwrap_or_default();
        let profile_json = serde_json::to_string(profile)?;
        let recommendations_json = serde_json::to_string(recommendations)?;

        self.conn
            .execute(
                "INSERT INTO classifications (personality_type, profile_json, recommendations_json, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    personality_type,
                    profile_json,
                    recommendations_json,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(DatabaseError::from)?;
        let id = self.conn.last_insert_rowid();
        debug!(id, %personality_type, count = recommendations.len(), "classification recorded");
        Ok(id)
    }

    /// Most recent classifications first.
    pub fn list_classifications(&self, limit: usize) -> Result<Vec<ClassificationRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, personality_type, profile_json, recommendations_json, created_at
             FROM classifications
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], read_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(decode_row(row?)?);
        }
        Ok(records)
    }

    pub fn get_classification(&self, id: i64) -> Result<Option<ClassificationRecord>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, personality_type, profile_json, recommendations_json, created_at
                 FROM classifications WHERE id = ?1",
                params![id],
                read_row,
            )
            .optional()?;
        row.map(decode_row).transpose()
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClassificationRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode_row(row: ClassificationRow) -> Result<ClassificationRecord, DatabaseError> {
    let (id, personality_type, profile_json, recommendations_json, created_at) = row;
    let corrupt = |message: String| DatabaseError::CorruptRecord { id, message };

    let profile = serde_json::from_str(&profile_json).map_err(|e| corrupt(e.to_string()))?;
    let recommendations =
        serde_json::from_str(&recommendations_json).map_err(|e| corrupt(e.to_string()))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| corrupt(e.to_string()))?
        .with_timezone(&Utc);

    Ok(ClassificationRecord {
        id,
        personality_type,
        profile,
        recommendations,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        let mut profile = Profile::new();
        profile.add_subject("Physics");
        profile.add_hobby("astronomy");
        profile
    }

    fn recs(names: &[&str]) -> Vec<Recommendation> {
        names
            .iter()
            .map(|name| Recommendation {
                name: name.to_string(),
                description: String::new(),
                fit_reason: String::new(),
                career_paths: vec!["Researcher".into()],
            })
            .collect()
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
        assert!(db.kv_delete("test").unwrap());
        assert!(!db.kv_delete("test").unwrap());
        assert!(db.kv_get("test").unwrap().is_none());
    }

    #[test]
    fn record_and_query() {
        let db = Database::open_memory().unwrap();
        let first = db.record_classification(&profile(), &recs(&["Physics"])).unwrap();
        let second = db
            .record_classification(&profile(), &recs(&["Astronomy", "Mathematics"]))
            .unwrap();

        let listed = db.list_classifications(10).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second);
        assert_eq!(listed[1].id, first);
        assert_eq!(listed[0].recommendations.len(), 2);
        assert!(listed[0].profile.has_subject("Physics"));

        assert_eq!(db.list_classifications(1).unwrap().len(), 1);

        let fetched = db.get_classification(first).unwrap().unwrap();
        assert_eq!(fetched.recommendations[0].name, "Physics");
        assert_eq!(fetched.personality_type, "");
        assert!(db.get_classification(999).unwrap().is_none());
    }

    #[test]
    fn corrupt_row_is_reported() {
        let db = Database::open_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO classifications (personality_type, profile_json, recommendations_json, created_at)
                 VALUES ('INTJ', 'not json', '[]', '2024-01-01T00:00:00+00:00')",
                [],
            )
            .unwrap();
        let id = db.conn().last_insert_rowid();
        assert!(matches!(
            db.get_classification(id),
            Err(DatabaseError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coursematch.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.kv_set("k", "v").unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.kv_get("k").unwrap().as_deref(), Some("v"));
    }
}
