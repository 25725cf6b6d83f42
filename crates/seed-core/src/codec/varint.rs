//! Varint (grupos de 7 bits, little-endian, bit alto = continuación) y mapeo
//! ZigZag de enteros con signo a sin signo.

/// Mapea un entero con signo a uno sin signo manteniendo pequeños los valores
/// de magnitud pequeña: `n >= 0 -> 2n`, `n < 0 -> 2|n| - 1`.
#[inline]
pub const fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Añade `n` a `out` como varint.
pub fn encode_varint(mut n: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (n & 0x7f) as u8;
        n >>= 7;
        if n == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Número de bytes que ocupará `n` codificado como varint.
#[inline]
pub const fn varint_len(n: u64) -> usize {
    let bits = 64 - (n | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}
