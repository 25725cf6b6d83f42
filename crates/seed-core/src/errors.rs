//! Errores del núcleo de cálculo de semillas.

use thiserror::Error;

/// Error opaco aportado por el host (conversión o renderizado fallido).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SeedError {
    /// Fallo del host al introspeccionar un valor o al capturar el nombre de
    /// tipo / representación textual de un valor opaco.
    #[error("Error in seed calculation: {0}")]
    SeedComputation(#[source] BoxError),
    /// El anidamiento superó `SeedConfig::max_depth`.
    #[error("structural limit exceeded: depth {depth} > max_depth {max_depth}")]
    StructuralLimit { depth: usize, max_depth: usize },
    /// Dos claves de un mapa se renderizan igual (sólo con `KeyCollisionPolicy::Reject`).
    #[error("map key collision on rendering {0:?}")]
    KeyCollision(String),
}

impl SeedError {
    /// Envuelve cualquier error del host como `SeedComputation`.
    pub fn computation<E>(err: E) -> Self
        where E: Into<BoxError>
    {
        SeedError::SeedComputation(err.into())
    }
}

pub type SeedResult<T> = Result<T, SeedError>;
