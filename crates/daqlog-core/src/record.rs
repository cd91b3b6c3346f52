//! Ordered records — the row payload and shape-inference source.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// An ordered mapping from column name to [`Value`].
///
/// Insertion order is preserved: it drives the column order when a table is
/// created from a sample record and the parameter order on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field. Names are not validated or deduplicated; a duplicate
    /// lands in the generated SQL and the engine reports it.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let record = Record::new().with("b", 1i64).with("a", 2i64).with("c", 0.5);
        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn get_returns_first_match() {
        let record = Record::new().with("temp", 21.5).with("unit", "C");
        assert_eq!(record.get("unit"), Some(&Value::Text("C".to_string())));
        assert_eq!(record.get("missing"), None);
    }
}
