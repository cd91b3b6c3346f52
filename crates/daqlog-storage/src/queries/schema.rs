//! CREATE TABLE assembly.

use rusqlite::Connection;

use daqlog_core::Record;

use super::quote_ident;

/// Create a table shaped like `sample`: a synthetic `id` primary key plus one
/// column per record field, typed by the field's value variant.
pub fn create_table(conn: &Connection, table: &str, sample: &Record) -> rusqlite::Result<()> {
    let mut cols = vec!["\"id\" INTEGER PRIMARY KEY".to_string()];
    cols.extend(
        sample
            .iter()
            .map(|(name, value)| format!("{} {}", quote_ident(name), value.column_type())),
    );
    let sql = format!("CREATE TABLE {} ({})", quote_ident(table), cols.join(", "));
    conn.execute(&sql, [])?;
    Ok(())
}

/// Create a table whose columns are all TEXT (the CSV import shape). The
/// header row is taken verbatim; no synthetic id is added.
pub fn create_text_table(
    conn: &Connection,
    table: &str,
    headers: &[String],
) -> rusqlite::Result<()> {
    let cols: Vec<String> = headers
        .iter()
        .map(|h| format!("{} TEXT", quote_ident(h)))
        .collect();
    let sql = format!("CREATE TABLE {} ({})", quote_ident(table), cols.join(", "));
    conn.execute(&sql, [])?;
    Ok(())
}
