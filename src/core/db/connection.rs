/// Connection Management Module
///
/// Opens the single session connection from the loaded configuration,
/// bootstraps the `students` table, and closes the connection at shutdown.

use crate::core::{ConnectionError, Result};
use rusqlite::Connection;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Message reported once the connection has been closed.
pub const CLOSED_MESSAGE: &str = "Database connection closed.";

/// Message reported when the engine refused a clean close.
pub const CLOSE_FAILED_MESSAGE: &str = "Database connection did not close cleanly.";

const STUDENTS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    student_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    enrollment_date DATE
)"#;

/// Connection parameters read from the configuration section.
///
/// `database` locates the database (a file path or `:memory:`). `host`,
/// `user` and `password` are carried for configuration compatibility; the
/// embedded engine has no server to authenticate against.
#[derive(Clone, Default, PartialEq)]
pub struct ConnectParams {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl ConnectParams {
    /// Builds parameters from a configuration mapping.
    ///
    /// Only `database` is required; the other keys default to empty.
    pub fn from_config(
        config: &HashMap<String, String>,
    ) -> std::result::Result<Self, ConnectionError> {
        let get = |key: &str| config.get(key).cloned().unwrap_or_default();
        let database = config
            .get("database")
            .cloned()
            .ok_or(ConnectionError::MissingParameter("database"))?;

        Ok(ConnectParams {
            host: get("host"),
            database,
            user: get("user"),
            password: get("password"),
        })
    }
}

/// Opens the database described by `params` and prepares it for use.
///
/// # Errors
///
/// Returns `StudentDbError::Connection` if the database cannot be opened or
/// the schema bootstrap fails. The error is logged before it is returned.
pub fn connect(params: &ConnectParams) -> Result<Connection> {
    debug!(
        host = %params.host,
        database = %params.database,
        user = %params.user,
        "opening database connection"
    );

    open(params).map_err(|e| {
        error!(database = %params.database, error = %e, "failed to connect to the database");
        e.into()
    })
}

fn open(params: &ConnectParams) -> std::result::Result<Connection, ConnectionError> {
    if params.database.is_empty() {
        return Err(ConnectionError::MissingParameter("database"));
    }

    let conn = Connection::open(&params.database)?;

    // Initialize connection and make sure the students table exists
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(STUDENTS_TABLE_SQL)?;

    info!(database = %params.database, "connected to the database");
    Ok(conn)
}

/// Closes the session connection, if there is one.
///
/// Returns the message to report: the confirmation when the connection
/// closed cleanly, a warning when the engine refused, and `None` when there
/// was nothing to close.
pub fn close(connection: Option<Connection>) -> Option<&'static str> {
    let conn = connection?;
    match conn.close() {
        Ok(()) => {
            info!("database connection closed");
            Some(CLOSED_MESSAGE)
        }
        Err((_conn, e)) => {
            // Dropping `_conn` retries the close.
            warn!(error = %e, "database connection did not close cleanly");
            Some(CLOSE_FAILED_MESSAGE)
        }
    }
}
