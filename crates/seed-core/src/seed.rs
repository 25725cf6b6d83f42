//! Extracción de la semilla: codificación canónica -> FNV-1a -> plegado a
//! 32 bits -> máscara de 31 bits.

use crate::config::SeedConfig;
use crate::constants::SEED_MASK;
use crate::errors::SeedResult;
use crate::hashing::{canonical_bytes, fnv1a_64};
use crate::value::Value;

/// Pliega el digest de 64 bits a 32 (`h ^ (h >> 32)`) y limpia el bit de
/// signo. El resultado está siempre en `[0, 2^31 - 1]`.
#[inline]
pub const fn fold_digest(h: u64) -> u32 {
    ((h ^ (h >> 32)) as u32) & SEED_MASK
}

/// Calculadora de semillas ligada a una configuración. No guarda estado entre
/// llamadas; es `Send + Sync` y puede compartirse entre hilos.
#[derive(Debug, Clone, Default)]
pub struct SeedCalculator {
    config: SeedConfig,
}

impl SeedCalculator {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    pub fn canonical_bytes(&self, value: &Value) -> SeedResult<Vec<u8>> {
        canonical_bytes(value, &self.config)
    }

    /// Digest FNV-1a de 64 bits, antes del plegado.
    pub fn digest(&self, value: &Value) -> SeedResult<u64> {
        let bytes = self.canonical_bytes(value)?;
        Ok(fnv1a_64(&bytes))
    }

    pub fn seed_for(&self, value: &Value) -> SeedResult<u32> {
        self.digest(value).map(fold_digest)
    }
}

/// Semilla de `value` con la configuración por defecto.
pub fn seed_for(value: &Value) -> SeedResult<u32> {
    SeedCalculator::default().seed_for(value)
}
