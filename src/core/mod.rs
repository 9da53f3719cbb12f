/// Core Module for studentdb
///
/// Shared infrastructure for the application: the error types and the
/// database layer the menu handlers call into.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{ConfigError, ConnectionError, Result, StudentDbError};
