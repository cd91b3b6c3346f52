//! CSV interchange: export windows, import shape, round-trips.

use tempfile::TempDir;

use daqlog_core::{Record, StorageError, Value};
use daqlog_storage::TableStore;

fn temp_store() -> (TempDir, TableStore) {
    let dir = TempDir::new().unwrap();
    let store = TableStore::open(dir.path().join("test.db")).unwrap();
    (dir, store)
}

fn seed_readings(store: &TableStore, count: i64) {
    for i in 1..=count {
        store
            .append_row(
                "readings",
                &Record::new().with("temp", 20.0 + i as f64).with("unit", "C"),
            )
            .unwrap();
    }
}

#[test]
fn export_writes_header_and_rows_in_storage_order() {
    let (dir, store) = temp_store();
    seed_readings(&store, 3);

    let path = dir.path().join("out.csv");
    store.export_csv("readings", &path, None).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,temp,unit");
    assert_eq!(lines[1], "1,21,C");
    assert_eq!(lines[2], "2,22,C");
    assert_eq!(lines[3], "3,23,C");
}

#[test]
fn export_window_is_rewritten_chronologically() {
    let (dir, store) = temp_store();
    seed_readings(&store, 5);

    let path = dir.path().join("tail.csv");
    store.export_csv("readings", &path, Some(2)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "4,24,C");
    assert_eq!(lines[2], "5,25,C");
}

#[test]
fn round_trip_preserves_rows_as_text() {
    let (dir, store) = temp_store();
    seed_readings(&store, 3);

    let path = dir.path().join("round.csv");
    store.export_csv("readings", &path, None).unwrap();
    store.import_csv("imported", &path).unwrap();

    let rows = store
        .all_columns("imported", &["id", "temp", "unit"])
        .unwrap();
    assert_eq!(rows.row_count(), 3);
    assert_eq!(
        rows.get("id").unwrap().to_vec(),
        vec![
            Value::Text("1".into()),
            Value::Text("2".into()),
            Value::Text("3".into())
        ]
    );
    assert_eq!(
        rows.get("temp").unwrap().to_vec(),
        vec![
            Value::Text("21".into()),
            Value::Text("22".into()),
            Value::Text("23".into())
        ]
    );
}

#[test]
fn imported_columns_are_all_text() {
    let (dir, store) = temp_store();
    seed_readings(&store, 1);

    let path = dir.path().join("shape.csv");
    store.export_csv("readings", &path, None).unwrap();
    store.import_csv("shape", &path).unwrap();

    let types: Vec<String> = store
        .with_conn(|conn| {
            let mut stmt = conn
                .prepare("PRAGMA table_info(shape)")
                .map_err(|e| StorageError::Sqlite {
                    message: e.to_string(),
                })?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(2))
                .map_err(|e| StorageError::Sqlite {
                    message: e.to_string(),
                })?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row.map_err(|e| StorageError::Sqlite {
                    message: e.to_string(),
                })?);
            }
            Ok(out)
        })
        .unwrap();

    assert_eq!(types, ["TEXT", "TEXT", "TEXT"]);
}

#[test]
fn import_into_existing_table_errors() {
    let (dir, store) = temp_store();
    seed_readings(&store, 1);

    let path = dir.path().join("dup.csv");
    store.export_csv("readings", &path, None).unwrap();

    store.import_csv("dup", &path).unwrap();
    let err = store.import_csv("dup", &path).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn short_row_surfaces_parameter_count_error() {
    let (dir, store) = temp_store();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "a,b,c\n1,2\n").unwrap();

    let err = store.import_csv("bad", &path).unwrap_err();
    assert!(matches!(err, StorageError::Sqlite { .. }));
}

#[test]
fn quoted_text_fields_round_trip() {
    let (dir, store) = temp_store();
    store
        .append_row("notes", &Record::new().with("note", "ok, \"fine\""))
        .unwrap();

    let path = dir.path().join("notes.csv");
    store.export_csv("notes", &path, None).unwrap();
    store.import_csv("notes2", &path).unwrap();

    let rows = store.all_columns("notes2", &["note"]).unwrap();
    assert_eq!(
        rows.get("note").unwrap().to_vec(),
        vec![Value::Text("ok, \"fine\"".into())]
    );
}
