//! Result Store: append-only persistence for diagnosis outcomes.
//!
//! One SQLite connection behind a mutex: concurrent saves are serialized
//! into single-row inserts. There are no cross-record invariants, so no
//! coarser locking is needed.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use uuid::Uuid;

use super::repository::{count_diagnosis_results, get_diagnosis_result, insert_diagnosis_result};
use super::{open_database, open_memory_database, DatabaseError};
use crate::models::DiagnosisResult;

pub struct ResultStore {
    conn: Mutex<Connection>,
}

impl ResultStore {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        tracing::info!(path = %path.display(), "Opening result store");
        Ok(Self {
            conn: Mutex::new(open_database(path)?),
        })
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: Mutex::new(open_memory_database()?),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }

    /// Persist `result`, allocating an identifier when it has none.
    ///
    /// Records are never overwritten: if the identifier is already stored,
    /// the stored record is returned unchanged.
    pub fn save(&self, mut result: DiagnosisResult) -> Result<DiagnosisResult, DatabaseError> {
        let conn = self.lock()?;

        match result.id {
            Some(id) => {
                if let Some(existing) = get_diagnosis_result(&conn, &id)? {
                    tracing::debug!(%id, "Diagnosis result already stored");
                    return Ok(existing);
                }
            }
            None => result.id = Some(Uuid::new_v4()),
        }

        let id = insert_diagnosis_result(&conn, &result)?;
        tracing::debug!(%id, "Diagnosis result stored");
        Ok(result)
    }

    pub fn find(&self, id: &Uuid) -> Result<Option<DiagnosisResult>, DatabaseError> {
        let conn = self.lock()?;
        get_diagnosis_result(&conn, id)
    }

    pub fn count(&self) -> Result<i64, DatabaseError> {
        let conn = self.lock()?;
        count_diagnosis_results(&conn)
    }
}
