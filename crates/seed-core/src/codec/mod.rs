//! Codificación de enteros usada por el codificador canónico.

pub mod varint;

pub use varint::{encode_varint, varint_len, zigzag};
