//! FNV-1a de 64 bits.
//!
//! Hash no criptográfico byte a byte: rápido y con buena dispersión, sin
//! ninguna garantía de resistencia a colisiones.

use std::hash::Hasher;

use crate::constants::{FNV_OFFSET_BASIS_64, FNV_PRIME_64};

/// FNV-1a de 64 bits sobre un slice completo; evaluable en contexto `const`.
#[inline]
pub const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS_64;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME_64);
        i += 1;
    }
    hash
}

/// Estado incremental de FNV-1a; procesa los bytes estrictamente en orden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1a64 {
    state: u64,
}

impl Default for Fnv1a64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Fnv1a64 {
    pub const fn new() -> Self {
        Self { state: FNV_OFFSET_BASIS_64 }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME_64);
        }
    }

    pub const fn digest(&self) -> u64 {
        self.state
    }
}

impl Hasher for Fnv1a64 {
    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }

    fn finish(&self) -> u64 {
        self.state
    }
}
