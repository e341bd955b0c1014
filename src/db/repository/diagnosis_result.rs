use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::DiagnosisResult;

/// Insert a result that already carries its identifier.
pub fn insert_diagnosis_result(
    conn: &Connection,
    result: &DiagnosisResult,
) -> Result<Uuid, DatabaseError> {
    let id = result.id.ok_or_else(|| {
        DatabaseError::ConstraintViolation("diagnosis result has no id".into())
    })?;

    conn.execute(
        "INSERT INTO diagnosis_results (id, symptoms, gender, year_of_birth, diagnosis, is_valid, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id.to_string(),
            result.symptoms,
            result.gender,
            result.year_of_birth,
            result.diagnosis,
            result.is_valid as i32,
            result.timestamp,
        ],
    )?;
    Ok(id)
}

pub fn get_diagnosis_result(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<DiagnosisResult>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, symptoms, gender, year_of_birth, diagnosis, is_valid, timestamp
             FROM diagnosis_results WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, i32>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i32>(5)?,
                    row.get::<_, NaiveDateTime>(6)?,
                ))
            },
        )
        .optional()?;

    let Some((id, symptoms, gender, year_of_birth, diagnosis, is_valid, timestamp)) = row else {
        return Ok(None);
    };

    Ok(Some(DiagnosisResult {
        id: Some(
            Uuid::parse_str(&id).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        ),
        symptoms,
        gender,
        year_of_birth,
        diagnosis,
        is_valid: is_valid != 0,
        timestamp,
    }))
}

pub fn count_diagnosis_results(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM diagnosis_results", [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(count)
}
