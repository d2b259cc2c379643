//! Database layer for the shift board.

mod schema;
mod patients;
mod professionals;
mod slots;
mod candidacies;
mod ledger;

pub use schema::*;
#[allow(unused_imports)]
pub use patients::*;
#[allow(unused_imports)]
pub use professionals::*;
#[allow(unused_imports)]
pub use slots::*;
#[allow(unused_imports)]
pub use candidacies::*;
pub use ledger::*;

use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DbError {
    /// Another connection holds the lock this operation needed.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            DbError::Sqlite(rusqlite::Error::SqliteFailure(e, _))
                if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        )
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// How long a file-backed handle waits for another handle's write lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.set_busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Set how long to wait for a lock held by another handle.
    pub fn set_busy_timeout(&self, timeout: Duration) -> DbResult<()> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Begin a write transaction through a shared reference.
    ///
    /// The write lock is taken up front (`BEGIN IMMEDIATE`); other handles
    /// wait for it up to their busy timeout. Every `Database` method issued
    /// before `commit` runs inside it; dropping the transaction rolls back.
    pub fn begin(&self) -> DbResult<Transaction<'_>> {
        Ok(Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        // Check that tables exist
        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"professionals".to_string()));
        assert!(tables.contains(&"shift_slots".to_string()));
        assert!(tables.contains(&"candidacies".to_string()));
        assert!(tables.contains(&"slot_events".to_string()));
    }

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Dona Maria".into());

        {
            let _tx = db.begin().unwrap();
            db.insert_patient(&patient).unwrap();
        }
        assert!(db.get_patient(&patient.patient_id).unwrap().is_none());

        let tx = db.begin().unwrap();
        db.insert_patient(&patient).unwrap();
        tx.commit().unwrap();
        assert!(db.get_patient(&patient.patient_id).unwrap().is_some());
    }

    #[test]
    fn test_write_lock_held_by_other_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lock.db");
        let first = Database::open(&path).unwrap();
        let second = Database::open(&path).unwrap();
        second.set_busy_timeout(Duration::from_millis(20)).unwrap();

        let held = first.begin().unwrap();
        let err = second.begin().unwrap_err();
        assert!(err.is_busy());

        held.commit().unwrap();
        assert!(second.begin().is_ok());
    }
}
