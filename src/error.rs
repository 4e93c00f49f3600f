// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema must describe at least one field")]
    InvalidSchema,
    #[error("field index {index} out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Length mismatch: {types} types, {names} names")]
    LengthMismatch { types: usize, names: usize },
    #[error("Field not found")]
    FieldNotFound,
    #[error("value hashing is not supported")]
    UnsupportedOperation,
}
