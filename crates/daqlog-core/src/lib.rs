//! # daqlog-core
//!
//! Foundation crate for the daqlog append-only logging store.
//! Defines the scalar value model, ordered records, columnar read results,
//! and storage errors. The storage crate depends on this.

pub mod columns;
pub mod errors;
pub mod record;
pub mod value;

pub use columns::Columns;
pub use errors::StorageError;
pub use record::Record;
pub use value::Value;
