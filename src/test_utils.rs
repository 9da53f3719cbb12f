/// # Test Utilities Module
///
/// Shared fixtures for the unit tests:
/// - an isolated in-memory database with the students schema
/// - sample rows matching the classic three-student data set
/// - failure injection through triggers
/// - a console scripted from a string

use crate::console::Console;
use crate::core::db::{self, ConnectParams};
use crate::core::{Result, StudentDbError};
use rusqlite::{Connection, OptionalExtension};
use std::io::Cursor;

/// Full row tuple: id, first name, last name, email, enrollment date.
pub type StudentRow = (i64, String, String, String, String);

/// Isolated database test fixture
pub struct DatabaseFixture {
    pub connection: Connection,
}

impl DatabaseFixture {
    /// Create an in-memory database through the regular connect path
    pub fn new() -> Result<Self> {
        let params = ConnectParams {
            database: ":memory:".to_string(),
            ..Default::default()
        };
        Ok(DatabaseFixture {
            connection: db::connect(&params)?,
        })
    }

    /// Create fixture with sample data
    pub fn with_sample_data() -> Result<Self> {
        let fixture = Self::new()?;
        fixture
            .populate_sample_data()
            .map_err(|e| StudentDbError::query("seed", e))?;
        Ok(fixture)
    }

    pub fn populate_sample_data(&self) -> rusqlite::Result<()> {
        self.connection.execute_batch(
            "
            INSERT INTO students (first_name, last_name, email, enrollment_date) VALUES
                ('John', 'Doe', 'john.doe@example.com', '2023-09-01'),
                ('Jane', 'Smith', 'jane.smith@example.com', '2023-09-01'),
                ('Jim', 'Beam', 'jim.beam@example.com', '2023-09-02');
            ",
        )
    }

    /// Make every write to `students` fail, simulating a database error
    pub fn fail_all_writes(&self) -> rusqlite::Result<()> {
        self.connection.execute_batch(
            "
            CREATE TRIGGER fail_insert BEFORE INSERT ON students
            BEGIN SELECT RAISE(ABORT, 'simulated failure'); END;
            CREATE TRIGGER fail_update BEFORE UPDATE ON students
            BEGIN SELECT RAISE(ABORT, 'simulated failure'); END;
            CREATE TRIGGER fail_delete BEFORE DELETE ON students
            BEGIN SELECT RAISE(ABORT, 'simulated failure'); END;
            ",
        )
    }

    pub fn student_count(&self) -> i64 {
        self.connection
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))
            .unwrap()
    }

    /// Name, email and enrollment date of one student
    pub fn student_row(&self, student_id: i64) -> Option<(String, String, String, String)> {
        self.connection
            .query_row(
                "SELECT first_name, last_name, email, enrollment_date
                 FROM students WHERE student_id = ?1",
                [student_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()
            .unwrap()
    }

    pub fn student_email(&self, student_id: i64) -> Option<String> {
        self.student_row(student_id).map(|row| row.2)
    }

    /// Every row, ordered by id
    pub fn all_rows(&self) -> Vec<StudentRow> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT student_id, first_name, last_name, email, enrollment_date
                 FROM students ORDER BY student_id",
            )
            .unwrap();
        stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })
        .unwrap()
        .collect::<std::result::Result<Vec<_>, _>>()
        .unwrap()
    }
}

/// A console that reads `input` and records everything written to it
pub fn scripted_console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}
