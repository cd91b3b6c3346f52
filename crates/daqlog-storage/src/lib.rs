//! # daqlog-storage
//!
//! SQLite persistence layer for append-only DAQ logging.
//! WAL mode with relaxed fsync, one mutex-serialized connection per store,
//! schema-on-first-append, windowed reads, CSV interchange.

pub mod connection;
pub mod csv;
pub mod queries;
pub mod store;

pub use connection::Database;
pub use store::TableStore;

use daqlog_core::StorageError;

/// Helper to carry a SQLite failure as a `StorageError`.
pub(crate) fn sql_err(e: impl std::fmt::Display) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}
