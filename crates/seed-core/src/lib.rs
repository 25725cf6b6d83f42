//! seed-core: semillas deterministas de 31 bits a partir de árboles de valores
//! dinámicos.
//!
//! Pipeline: `Value` -> codificación canónica (independiente del orden de
//! inserción de los mapas) -> FNV-1a 64 -> plegado a 32 bits -> máscara de
//! 31 bits. Todo es síncrono y sin estado compartido; cada llamada usa su
//! propio buffer.
pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod seed;
pub mod value;

pub use config::{init_dotenv, KeyCollisionPolicy, SeedConfig};
pub use errors::{BoxError, SeedError, SeedResult};
pub use hashing::{canonical_bytes, fnv1a_64, CanonicalEncoder, Fnv1a64};
pub use seed::{fold_digest, seed_for, SeedCalculator};
pub use value::{Opaque, Value};
