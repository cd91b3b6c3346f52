//! Storage-layer errors for SQLite operations.

/// Errors surfaced by the table store.
///
/// Engine failures are carried as display strings rather than being mapped
/// into a richer taxonomy; the store only inspects the text for the two
/// conditions it handles locally (duplicate schema on create, missing table
/// on append).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("CSV error: {message}")]
    Csv { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },
}
