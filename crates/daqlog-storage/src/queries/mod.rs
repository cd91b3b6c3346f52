//! SQL assembly over `&Connection`.
//!
//! Free functions returning `rusqlite::Result`; the store maps failures to
//! `StorageError` and owns the recovery policy. Table and column names are
//! free-form strings and are always embedded through [`quote_ident`].

pub mod rows;
pub mod schema;

/// Quote an identifier for SQLite. Embedded double quotes are doubled, never
/// rejected, so reserved words and hostile names stay usable.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
