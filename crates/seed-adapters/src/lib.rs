//! seed-adapters: frontera host <-> núcleo de semillas.
//!
//! Este crate provee:
//! - `IntoSeedValue`: conversión de datos del host (JSON, JSON etiquetado,
//!   `chrono`, `uuid`, cualquier `Display`) a `seed_core::Value`.
//! - `to_seed_int`: punto de entrada único; convierte, calcula y traduce
//!   cualquier fallo del host a `SeedError::SeedComputation`.
//!
//! Nota: el núcleo no registra nada; los logs de conversión viven aquí.

pub mod error;
pub mod host;
pub mod json;
pub mod tagged;

use log::{debug, warn};
use seed_core::{SeedCalculator, SeedConfig, SeedError, SeedResult};

pub use error::AdapterError;
pub use host::{capture_display, Displayed, IntoSeedValue, Tagged};
pub use json::from_json;
pub use tagged::from_tagged_json;

/// Semilla en `[0, 2^31 - 1]` con la configuración por defecto.
pub fn to_seed_int<T>(value: &T) -> SeedResult<u32>
    where T: IntoSeedValue + ?Sized
{
    to_seed_int_with(value, &SeedConfig::default())
}

pub fn to_seed_int_with<T>(value: &T, config: &SeedConfig) -> SeedResult<u32>
    where T: IntoSeedValue + ?Sized
{
    let converted = value.to_seed_value(config)?;
    debug!("computing seed for {} value (max_depth={})", converted.kind(), config.max_depth);
    let result = SeedCalculator::new(config.clone()).seed_for(&converted);
    match &result {
        Ok(seed) => debug!("seed = {seed}"),
        Err(SeedError::KeyCollision(rendering)) => warn!("rejected map with colliding key rendering {rendering:?}"),
        Err(e) => debug!("seed computation failed: {e}"),
    }
    result
}
