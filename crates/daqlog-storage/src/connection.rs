//! Single-connection owner with DAQ-friendly pragmas.
//!
//! One `Database` per thread/task is the intended use; the mutex makes a
//! shared instance safe by serializing every statement. Coordination between
//! connections on the same file is left to SQLite (WAL + busy_timeout).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use daqlog_core::StorageError;

use crate::sql_err;

/// Owns one SQLite connection and the lock that serializes access to it.
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create a file-backed database and apply pragmas.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(sql_err)?;
        configure_connection(&conn)?;
        debug!(path = %path.display(), "opened daq store");
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (tests, scratch captures).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sql_err)?;
        configure_connection(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Backing file path (`None` for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run one closure under the connection lock.
    ///
    /// The lock is held for the duration of the closure and released on every
    /// exit path, including errors. Store operations make exactly one
    /// acquisition per statement.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().map_err(|_| StorageError::Sqlite {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&conn)
    }

    /// Close the connection. Consuming `self` makes use-after-close
    /// unrepresentable.
    pub fn close(self) -> Result<(), StorageError> {
        let conn = self.conn.into_inner().map_err(|_| StorageError::Sqlite {
            message: "connection lock poisoned".to_string(),
        })?;
        conn.close().map_err(|(_, e)| sql_err(e))
    }
}

/// Apply the store's pragma set on a fresh connection.
///
/// WAL with `synchronous = NORMAL`: a crash can drop the last few committed
/// transactions but never corrupts the file. busy_timeout covers lock
/// contention from other connections on the same file.
fn configure_connection(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .map_err(sql_err)
}
