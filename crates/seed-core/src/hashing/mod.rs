//! Módulo de codificación canónica y hashing FNV-1a.

pub mod canonical;
pub mod fnv;

pub use canonical::{canonical_bytes, CanonicalEncoder};
pub use fnv::{fnv1a_64, Fnv1a64};
