//! Errores de la capa de adaptación host -> `Value`.
//! Se traducen a `SeedError` en la frontera (`to_seed_int`).

use seed_core::SeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unknown tag: {0}")]
    UnknownTag(String),
    #[error("invalid {tag} payload: {reason}")]
    InvalidPayload { tag: &'static str, reason: String },
    #[error("invalid time: {0}")]
    InvalidTime(#[from] chrono::ParseError),
    #[error("render failed for {type_name}: {reason}")]
    Render { type_name: String, reason: String },
    #[error("nesting too deep: depth {depth} > max_depth {max_depth}")]
    TooDeep { depth: usize, max_depth: usize },
}

impl AdapterError {
    pub(crate) fn payload(tag: &'static str, reason: impl Into<String>) -> Self {
        AdapterError::InvalidPayload { tag, reason: reason.into() }
    }
}

impl From<AdapterError> for SeedError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::TooDeep { depth, max_depth } => SeedError::StructuralLimit { depth, max_depth },
            other => SeedError::computation(other),
        }
    }
}
