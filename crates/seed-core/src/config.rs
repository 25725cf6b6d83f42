//! Configuración del cálculo de semillas.
//! Valores por defecto en código; sobreescribibles desde variables de entorno
//! (`SEED_MAX_DEPTH`, `SEED_KEY_COLLISIONS`) o un archivo `.env`.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_DEPTH;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Qué hacer cuando dos claves distintas de un mapa se renderizan igual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCollisionPolicy {
    /// Se codifican ambas con la misma clave textual (formato compatible).
    #[default]
    Merge,
    /// Se rechaza el valor con `SeedError::KeyCollision`.
    Reject,
}

impl KeyCollisionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "merge" => Some(Self::Merge),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Máximo número de contenedores que pueden envolver a un valor.
    pub max_depth: usize,
    pub key_collisions: KeyCollisionPolicy,
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig { max_depth: DEFAULT_MAX_DEPTH,
                     key_collisions: KeyCollisionPolicy::Merge }
    }
}

impl SeedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_key_collisions(mut self, policy: KeyCollisionPolicy) -> Self {
        self.key_collisions = policy;
        self
    }

    /// Lee la configuración del entorno; valores ausentes o inválidos caen a
    /// los defaults.
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let max_depth = env::var("SEED_MAX_DEPTH").ok().and_then(|v| v.trim().parse().ok()).unwrap_or(defaults.max_depth);
        let key_collisions = env::var("SEED_KEY_COLLISIONS").ok()
                                                            .and_then(|v| KeyCollisionPolicy::parse(&v))
                                                            .unwrap_or(defaults.key_collisions);
        Self { max_depth, key_collisions }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
