/// Query Execution Module
///
/// The four student operations. Each runs a single parametrized statement
/// against the session connection; mutations run inside their own
/// transaction that commits on success and rolls back on failure.

use crate::core::{Result, StudentDbError};
use rusqlite::{params, types::ValueRef, Connection, Transaction};
use std::io::Write;
use tracing::{debug, error, info, warn};

const SELECT_ALL_SQL: &str = "SELECT * FROM students;";

const INSERT_SQL: &str = r#"
INSERT INTO students (first_name, last_name, email, enrollment_date)
VALUES (?1, ?2, ?3, ?4);
"#;

const UPDATE_EMAIL_SQL: &str = r#"
UPDATE students
SET email = ?1
WHERE student_id = ?2;
"#;

const DELETE_SQL: &str = r#"
DELETE FROM students
WHERE student_id = ?1;
"#;

/// Fields for a student that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub enrollment_date: String,
}

impl NewStudent {
    /// Names of the fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("enrollment_date", &self.enrollment_date),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Runs `op` inside a transaction on `conn`.
///
/// Commits when `op` succeeds. When `op` or the commit fails, the transaction
/// is rolled back and the driver error is returned as
/// `StudentDbError::Query` tagged with `operation`.
pub fn with_transaction<T, F>(conn: &Connection, operation: &'static str, op: F) -> Result<T>
where
    F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
{
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| StudentDbError::query(operation, e))?;

    let outcome = op(&tx);
    match outcome {
        Ok(value) => match tx.commit() {
            Ok(()) => {
                debug!(operation, "transaction committed");
                Ok(value)
            }
            Err(e) => {
                // Dropping the uncommitted transaction rolls it back.
                error!(operation, error = %e, "commit failed, transaction rolled back");
                Err(StudentDbError::query(operation, e))
            }
        },
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(operation, error = %rollback_err, "rollback did not complete");
            }
            error!(operation, error = %e, "statement failed, transaction rolled back");
            Err(StudentDbError::query(operation, e))
        }
    }
}

/// Writes every row of the `students` table to `out`, one tuple per line.
///
/// Rows are written as they are read; nothing is buffered beyond the row
/// being printed.
///
/// # Returns
///
/// The number of rows written.
pub fn list_students<W: Write>(conn: &Connection, out: &mut W) -> Result<usize> {
    let mut stmt = conn
        .prepare(SELECT_ALL_SQL)
        .map_err(|e| StudentDbError::query("list", e))?;
    let column_count = stmt.column_count();

    let mut rows = stmt.query([]).map_err(|e| StudentDbError::query("list", e))?;
    let mut count = 0;
    while let Some(row) = rows.next().map_err(|e| StudentDbError::query("list", e))? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            let value = row.get_ref(i).map_err(|e| StudentDbError::query("list", e))?;
            values.push(format_value(value));
        }
        writeln!(out, "({})", values.join(", "))?;
        count += 1;
    }

    debug!(rows = count, "listed students");
    Ok(count)
}

/// Inserts a student and returns the identifier the database assigned.
pub fn add_student(conn: &Connection, student: &NewStudent) -> Result<i64> {
    let id = with_transaction(conn, "add", |tx| {
        tx.execute(
            INSERT_SQL,
            params![
                student.first_name,
                student.last_name,
                student.email,
                student.enrollment_date
            ],
        )?;
        Ok(tx.last_insert_rowid())
    })?;

    info!(student_id = id, "student added");
    Ok(id)
}

/// Sets the email of the student with `student_id`.
///
/// # Returns
///
/// The number of rows changed; zero when no student has that identifier.
pub fn update_student_email(
    conn: &Connection,
    student_id: i64,
    new_email: &str,
) -> Result<usize> {
    let changed = with_transaction(conn, "update", |tx| {
        tx.execute(UPDATE_EMAIL_SQL, params![new_email, student_id])
    })?;

    info!(student_id, rows = changed, "student email updated");
    Ok(changed)
}

/// Deletes the student with `student_id`.
///
/// # Returns
///
/// The number of rows removed; zero when no student has that identifier.
pub fn delete_student(conn: &Connection, student_id: i64) -> Result<usize> {
    let removed = with_transaction(conn, "delete", |tx| {
        tx.execute(DELETE_SQL, params![student_id])
    })?;

    info!(student_id, rows = removed, "student deleted");
    Ok(removed)
}

/// Formats a column value the way a row tuple shows it.
fn format_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "None".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => quote_text(&String::from_utf8_lossy(t)),
        ValueRef::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}

/// Quotes text like a tuple literal: single quotes unless the text holds a
/// single quote and no double quote, backslashes and the chosen quote
/// escaped.
fn quote_text(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\");
    if text.contains('\'') && !text.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}
