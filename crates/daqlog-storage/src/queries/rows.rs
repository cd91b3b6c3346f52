//! Row inserts, windowed selects, and purges.

use rusqlite::{params, params_from_iter, Connection, Statement};

use daqlog_core::{Columns, Record, Value};

use super::quote_ident;

/// Insert one row with an explicit column list, parameters bound in record
/// order.
pub fn insert_row(conn: &Connection, table: &str, record: &Record) -> rusqlite::Result<()> {
    let columns: Vec<String> = record.names().map(quote_ident).collect();
    let placeholders = vec!["?"; record.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        columns.join(", "),
        placeholders
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(params_from_iter(record.values()))?;
    Ok(())
}

/// Positional insert without a column list (CSV import path). `width` is the
/// table's column count; a field-count mismatch surfaces as the engine's
/// parameter-count error.
pub fn insert_positional(
    conn: &Connection,
    table: &str,
    width: usize,
    fields: &[&str],
) -> rusqlite::Result<()> {
    let placeholders = vec!["?"; width].join(", ");
    let sql = format!("INSERT INTO {} VALUES ({})", quote_ident(table), placeholders);
    let mut stmt = conn.prepare_cached(&sql)?;
    stmt.execute(params_from_iter(fields.iter()))?;
    Ok(())
}

/// Last `n` rows, all columns, most-recent-first (descending id).
pub fn last_rows(conn: &Connection, table: &str, n: usize) -> rusqlite::Result<Columns> {
    let sql = format!("SELECT * FROM {} ORDER BY id DESC LIMIT ?1", quote_ident(table));
    let mut stmt = conn.prepare_cached(&sql)?;
    collect_columns(&mut stmt, Some(n as i64))
}

/// Last `n` rows over a named column subset, most-recent-first. Callers that
/// want chronological order flip the result.
pub fn last_columns(
    conn: &Connection,
    table: &str,
    columns: &[&str],
    n: usize,
) -> rusqlite::Result<Columns> {
    let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let sql = format!(
        "SELECT {} FROM {} ORDER BY id DESC LIMIT ?1",
        cols.join(", "),
        quote_ident(table)
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    collect_columns(&mut stmt, Some(n as i64))
}

/// Every row for the named columns, storage (ascending id) order.
pub fn all_columns(conn: &Connection, table: &str, columns: &[&str]) -> rusqlite::Result<Columns> {
    let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let sql = format!("SELECT {} FROM {}", cols.join(", "), quote_ident(table));
    let mut stmt = conn.prepare_cached(&sql)?;
    collect_columns(&mut stmt, None)
}

/// Row-major fetch for CSV export: header names plus each row's values. With
/// a window the rows come back most-recent-first; the caller reverses.
pub fn fetch_rows(
    conn: &Connection,
    table: &str,
    n: Option<usize>,
) -> rusqlite::Result<(Vec<String>, Vec<Vec<Value>>)> {
    let sql = match n {
        Some(_) => format!("SELECT * FROM {} ORDER BY id DESC LIMIT ?1", quote_ident(table)),
        None => format!("SELECT * FROM {}", quote_ident(table)),
    };
    let mut stmt = conn.prepare_cached(&sql)?;
    let names: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = names.len();

    let mut rows = match n {
        Some(limit) => stmt.query(params![limit as i64])?,
        None => stmt.query([])?,
    };
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(width);
        for idx in 0..width {
            fields.push(row.get(idx)?);
        }
        out.push(fields);
    }
    Ok((names, out))
}

/// Delete every row; the table definition persists.
pub fn delete_all(conn: &Connection, table: &str) -> rusqlite::Result<usize> {
    conn.execute(&format!("DELETE FROM {}", quote_ident(table)), [])
}

/// Collect a prepared select into column-major form. The selected column
/// names are captured before iteration so empty results keep their shape.
fn collect_columns(stmt: &mut Statement<'_>, limit: Option<i64>) -> rusqlite::Result<Columns> {
    let names: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let mut series: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

    let mut rows = match limit {
        Some(n) => stmt.query(params![n])?,
        None => stmt.query([])?,
    };
    while let Some(row) = rows.next()? {
        for (idx, values) in series.iter_mut().enumerate() {
            values.push(row.get(idx)?);
        }
    }
    Ok(Columns::from_parts(names, series))
}
