//! Constantes del formato canónico y del plegado de semillas.
//!
//! Todas participan en el resultado final: cambiar cualquiera de ellas rompe
//! la reproducibilidad de las semillas ya emitidas (vectores dorados en
//! `tests/golden_vectors.rs`).

/// Etiqueta lógica del formato de bytes canónico. Informativa; no entra al hash.
pub const ENCODING_VERSION: &str = "v1";

// Etiquetas de tipo (un byte por variante).
pub const TAG_NULL: u8 = b'n';
pub const TAG_TRUE: u8 = b't';
pub const TAG_FALSE: u8 = b'f';
pub const TAG_INTEGER: u8 = b'i';
pub const TAG_FLOAT: u8 = b'd';
pub const TAG_STRING: u8 = b's';
pub const TAG_SYMBOL: u8 = b'y';
pub const TAG_ARRAY: u8 = b'a';
pub const TAG_MAP: u8 = b'h';
pub const TAG_TIMESTAMP: u8 = b'T';
pub const TAG_OPAQUE: u8 = b'o';

/// Base de desplazamiento FNV-1a de 64 bits.
pub const FNV_OFFSET_BASIS_64: u64 = 0xcbf2_9ce4_8422_2325;
/// Primo FNV de 64 bits.
pub const FNV_PRIME_64: u64 = 0x0000_0100_0000_01b3;

/// Máscara de 31 bits aplicada tras el plegado: la semilla cabe siempre en
/// el rango no negativo de un entero con signo de 32 bits.
pub const SEED_MASK: u32 = 0x7fff_ffff;

/// Profundidad máxima de anidamiento por defecto (contenedores que envuelven
/// a un valor; la raíz está a profundidad 0).
pub const DEFAULT_MAX_DEPTH: usize = 256;
