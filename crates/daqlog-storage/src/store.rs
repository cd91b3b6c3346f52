//! The table store façade: schema-on-demand, appends, windowed reads, CSV
//! interchange, purges. One lock acquisition per statement.

use std::path::Path;

use tracing::{debug, warn};

use daqlog_core::{Columns, Record, StorageError};

use crate::connection::Database;
use crate::queries::{rows, schema};
use crate::{csv, sql_err};

/// Append-only table store over one SQLite connection.
///
/// Intended use is one instance per thread/task; a shared instance is safe
/// (every statement runs under the connection lock) but serializes callers.
/// Concurrent writers against the same file should each open their own store
/// and let SQLite's WAL locking coordinate them.
pub struct TableStore {
    db: Database,
}

impl TableStore {
    /// Open or create the backing file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    /// In-memory store (tests, scratch captures).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    /// Backing file path (`None` for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }

    /// Create `table` shaped like `sample`: an `id INTEGER PRIMARY KEY`
    /// column plus one column per field, typed from the field's value.
    ///
    /// Creating a table that already exists is logged and suppressed; the
    /// existing table and its data are left untouched. Any other failure
    /// propagates.
    pub fn create_table(&self, table: &str, sample: &Record) -> Result<(), StorageError> {
        let result = self
            .db
            .with_conn(|conn| schema::create_table(conn, table, sample).map_err(sql_err));
        match result {
            Err(e) if is_already_exists(&e) => {
                warn!(table, error = %e, "create_table suppressed schema conflict");
                Ok(())
            }
            other => other,
        }
    }

    /// Append one row, binding `record`'s values in field order.
    ///
    /// If the insert fails because the table does not exist, the table is
    /// created from the record's shape and the insert retried exactly once; a
    /// second failure propagates. The lock is released between the failed
    /// insert, the create, and the retry, so two stores on the same file can
    /// race the creation — the loser's create is suppressed as a schema
    /// conflict and its retry proceeds against the winner's table.
    pub fn append_row(&self, table: &str, record: &Record) -> Result<(), StorageError> {
        let first = self
            .db
            .with_conn(|conn| rows::insert_row(conn, table, record).map_err(sql_err));
        match first {
            Err(e) if is_missing_table(&e) => {
                debug!(table, "append against missing table, creating from record shape");
                self.create_table(table, record)?;
                self.db
                    .with_conn(|conn| rows::insert_row(conn, table, record).map_err(sql_err))
            }
            other => other,
        }
    }

    /// The `n` most recently inserted rows, all columns, most-recent-first
    /// (descending id). A table with fewer than `n` rows returns what exists.
    pub fn last_n_rows(&self, table: &str, n: usize) -> Result<Columns, StorageError> {
        self.db
            .with_conn(|conn| rows::last_rows(conn, table, n).map_err(sql_err))
    }

    /// One column over the same window as [`Self::last_n_rows`],
    /// most-recent-first.
    pub fn last_n_column(
        &self,
        table: &str,
        column: &str,
        n: usize,
    ) -> Result<Columns, StorageError> {
        self.db
            .with_conn(|conn| rows::last_columns(conn, table, &[column], n).map_err(sql_err))
    }

    /// A column subset over the same window, reordered to chronological
    /// (ascending id) order before return.
    ///
    /// Note the asymmetry: [`Self::last_n_column`] and [`Self::last_n_rows`]
    /// return the window most-recent-first, while this variant returns it
    /// oldest-first. Both orderings are long-standing observable behavior and
    /// are kept as-is.
    pub fn last_n_columns(
        &self,
        table: &str,
        columns: &[&str],
        n: usize,
    ) -> Result<Columns, StorageError> {
        let mut result = self
            .db
            .with_conn(|conn| rows::last_columns(conn, table, columns, n).map_err(sql_err))?;
        result.reverse_rows();
        Ok(result)
    }

    /// Every row for the named columns, storage (ascending id) order.
    pub fn all_columns(&self, table: &str, columns: &[&str]) -> Result<Columns, StorageError> {
        self.db
            .with_conn(|conn| rows::all_columns(conn, table, columns).map_err(sql_err))
    }

    /// Export to CSV: a header row, then either the whole table in storage
    /// order or the last `n` rows re-reversed into chronological order.
    pub fn export_csv(
        &self,
        table: &str,
        path: impl AsRef<Path>,
        n: Option<usize>,
    ) -> Result<(), StorageError> {
        csv::export(&self.db, table, path.as_ref(), n)
    }

    /// Import a CSV: the header row becomes an all-TEXT table (no type
    /// inference), every following line one row of TEXT values. Unlike
    /// [`Self::create_table`], an existing table is an error here.
    pub fn import_csv(&self, table: &str, path: impl AsRef<Path>) -> Result<(), StorageError> {
        csv::import(&self.db, table, path.as_ref())
    }

    /// Delete every row from `table`; the schema persists and the table keeps
    /// accepting appends.
    pub fn reset_table(&self, table: &str) -> Result<(), StorageError> {
        self.db
            .with_conn(|conn| rows::delete_all(conn, table).map_err(sql_err))?;
        Ok(())
    }

    /// Raw scoped access for operations the store does not cover.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_conn(f)
    }

    /// Close the connection. Consuming `self` makes use-after-close
    /// unrepresentable.
    pub fn close(self) -> Result<(), StorageError> {
        self.db.close()
    }
}

// SQLite reports both conditions below as plain SQLITE_ERROR, so the message
// text is the only available classifier.

fn is_missing_table(err: &StorageError) -> bool {
    matches!(err, StorageError::Sqlite { message } if message.contains("no such table"))
}

fn is_already_exists(err: &StorageError) -> bool {
    matches!(err, StorageError::Sqlite { message } if message.contains("already exists"))
}
