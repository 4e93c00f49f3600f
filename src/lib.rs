//! Fixed tuple layouts for a tabular engine: a schema pairs a value type
//! with an optional field name per position and derives the tuple's total
//! byte size. Schemas are immutable value objects; the value-type system
//! itself is supplied by the caller through [`FieldType`].

pub mod error;
pub mod tuple_schema;
pub mod types;

pub use error::SchemaError;
pub use tuple_schema::TupleSchema;
pub use types::{FieldSlot, FieldType, SlotIter};
