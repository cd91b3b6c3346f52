//! Columnar read results.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// An ordered mapping from column name to a series of values, one entry per
/// selected column.
///
/// Every windowed/column read returns this shape. An empty result set still
/// carries the selected column names, each with an empty series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    series: Vec<(String, Vec<Value>)>,
}

impl Columns {
    /// Build from parallel name/series vectors in SELECT column order.
    pub fn from_parts(names: Vec<String>, series: Vec<Vec<Value>>) -> Self {
        debug_assert_eq!(names.len(), series.len());
        Self {
            series: names.into_iter().zip(series).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.series
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.series.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Number of selected columns.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of rows in the result (length of the first series).
    pub fn row_count(&self) -> usize {
        self.series.first().map_or(0, |(_, values)| values.len())
    }

    /// Reverse every series in place, flipping between most-recent-first and
    /// chronological order.
    pub fn reverse_rows(&mut self) {
        for (_, values) in &mut self.series {
            values.reverse();
        }
    }
}
