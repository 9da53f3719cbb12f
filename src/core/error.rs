/// StudentDB Error Module
///
/// This module defines the error types for the studentdb application.
/// Every failure the session can hit is a value of `StudentDbError`, so
/// callers can tell a bad config apart from a failed statement without
/// parsing log text.
use thiserror::Error;

/// Errors raised while loading the INI configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The requested section does not exist in the file
    #[error("Section {section} not found in the {file} file")]
    SectionNotFound { section: String, file: String },

    /// An option appears twice in the section, ignoring case
    #[error("Duplicate option {key} in section {section} of the {file} file")]
    DuplicateKey {
        section: String,
        key: String,
        file: String,
    },

    /// The file could not be read
    #[error("Failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
}

/// Errors raised while opening the database connection.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// A parameter the engine needs is absent from the configuration
    #[error("missing connection parameter '{0}'")]
    MissingParameter(&'static str),

    /// The engine refused to open the database
    #[error("{0}")]
    Open(#[from] rusqlite::Error),
}

/// Comprehensive error type for the studentdb application.
#[derive(Error, Debug)]
pub enum StudentDbError {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connection errors; the session cannot start
    #[error("{0}")]
    Connection(#[from] ConnectionError),

    /// A statement failed and its transaction was rolled back
    #[error("{source}")]
    Query {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A student identifier that does not parse as an integer
    #[error("Invalid student ID '{0}'")]
    InvalidStudentId(String),

    /// Console I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Standard input closed while a prompt was waiting
    #[error("Input stream closed")]
    InputClosed,
}

impl StudentDbError {
    /// Wraps a driver error raised by the named operation.
    pub fn query(operation: &'static str, source: rusqlite::Error) -> Self {
        StudentDbError::Query { operation, source }
    }
}

/// Type alias for Result to use StudentDbError as the error type.
pub type Result<T> = std::result::Result<T, StudentDbError>;
