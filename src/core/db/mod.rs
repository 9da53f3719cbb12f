/// Database Module
///
/// This module provides the database functionality for studentdb,
/// organized into focused submodules.
///
/// ## Architecture
///
/// - **Connection Management** (`connection.rs`): opens, bootstraps and closes the connection
/// - **Query Execution** (`query.rs`): the four student operations and their transaction handling
///
/// ## Error Handling
///
/// All database operations return the standardized `StudentDbError` type. A
/// failed mutation has already been rolled back by the time its error reaches
/// the caller.
pub mod connection;
pub mod query;

pub use connection::*;
pub use query::*;
