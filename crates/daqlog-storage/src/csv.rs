//! CSV interchange: table snapshots out, text tables in.
//!
//! Export writes a header row plus the selected window in chronological
//! order. Import takes the header row as an all-TEXT schema and streams the
//! remaining lines in, one insert (and one lock acquisition) per row.

use std::path::Path;

use daqlog_core::StorageError;

use crate::connection::Database;
use crate::queries::{rows, schema};
use crate::sql_err;

fn csv_err(e: csv::Error) -> StorageError {
    StorageError::Csv {
        message: e.to_string(),
    }
}

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Io {
        message: e.to_string(),
    }
}

/// Export `table` to `path`: all rows in storage order, or the last `n` rows
/// re-reversed into chronological order. The snapshot is taken under the
/// connection lock; the file is written outside it.
pub fn export(
    db: &Database,
    table: &str,
    path: &Path,
    n: Option<usize>,
) -> Result<(), StorageError> {
    let (headers, mut data) =
        db.with_conn(|conn| rows::fetch_rows(conn, table, n).map_err(sql_err))?;
    if n.is_some() {
        // windowed fetch comes back most-recent-first
        data.reverse();
    }

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(&headers).map_err(csv_err)?;
    for row in &data {
        writer
            .write_record(row.iter().map(|value| value.to_string()))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)
}

/// Import `path` into a new table named `table`, all columns TEXT.
///
/// The create is not suppressed here: importing onto an existing table is an
/// error. A row whose field count differs from the header surfaces as the
/// engine's parameter-count failure.
pub fn import(db: &Database, table: &str, path: &Path) -> Result<(), StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();

    db.with_conn(|conn| schema::create_text_table(conn, table, &headers).map_err(sql_err))?;

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let fields: Vec<&str> = record.iter().collect();
        db.with_conn(|conn| {
            rows::insert_positional(conn, table, headers.len(), &fields).map_err(sql_err)
        })?;
    }
    Ok(())
}
