//! seedcanon
//!
//! Este crate actúa como la librería central del workspace:
//! - Expone `seed_core` (modelo de valores, codificación canónica, FNV-1a, semilla).
//! - Expone `seed_adapters` (conversión desde JSON / tipos del host y `to_seed_int`).
//!
//! Puede usarse directamente o por otros crates/clientes; `seed-cli` es el
//! binario de línea de comandos.

pub use seed_adapters;
pub use seed_core;

pub use seed_adapters::{to_seed_int, to_seed_int_with, IntoSeedValue, Tagged};
pub use seed_core::{seed_for, Opaque, SeedCalculator, SeedConfig, SeedError, SeedResult, Value};
