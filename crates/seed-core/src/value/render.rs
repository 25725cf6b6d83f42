//! Representación textual de un `Value`.
//!
//! Es la forma "legible" de un valor y la clave de ordenación de los mapas
//! en la codificación canónica. Valores de nivel superior usan la forma
//! plana (una cadena es sus propios bytes, `Null` es vacío); dentro de
//! arrays y mapas se usa la forma inspeccionada (cadenas entre comillas,
//! `nil`, `:symbol`). Los mapas se muestran con sus entradas ordenadas, de
//! modo que la representación no depende del orden de inserción.
//!
//! Los bytes que no son UTF-8 válido se escriben como `\xHH`, así dos
//! cadenas distintas nunca comparten representación. Los floats en notación
//! científica se escriben como `1.0e+20` / `1.5e-05`, no como `1e20` /
//! `1.5e-5`.
//!
//! `Display` no falla: pasado el límite de profundidad escribe `…` en lugar
//! del subárbol.

use std::fmt;

use chrono::{DateTime, Utc};

use super::Value;
use crate::constants::DEFAULT_MAX_DEPTH;
use crate::errors::{SeedError, SeedResult};

impl Value {
    /// Bytes de la representación textual, acotada por la profundidad por
    /// defecto.
    pub fn rendering(&self) -> SeedResult<Vec<u8>> {
        let mut out = Vec::new();
        self.render_into(&mut out, 0, DEFAULT_MAX_DEPTH)?;
        Ok(out)
    }

    /// Escribe la forma plana en `out`. `depth` es la profundidad del propio
    /// valor dentro del árbol que se está codificando.
    pub(crate) fn render_into(&self, out: &mut Vec<u8>, depth: usize, max_depth: usize) -> SeedResult<()> {
        self.render_with(out, depth, Limit::Fail(max_depth))
    }

    fn render_with(&self, out: &mut Vec<u8>, depth: usize, limit: Limit) -> SeedResult<()> {
        if limit.reached(out, depth)? {
            return Ok(());
        }
        match self {
            Value::Null => {}
            Value::Bytes(b) => out.extend_from_slice(b),
            Value::Symbol(name) => out.extend_from_slice(name.as_bytes()),
            Value::Opaque(o) => out.extend_from_slice(o.rendering.as_bytes()),
            other => other.inspect_into(out, depth, limit)?,
        }
        Ok(())
    }

    fn inspect_into(&self, out: &mut Vec<u8>, depth: usize, limit: Limit) -> SeedResult<()> {
        if limit.reached(out, depth)? {
            return Ok(());
        }
        match self {
            Value::Null => out.extend_from_slice(b"nil"),
            Value::Bool(b) => {
                let word: &[u8] = if *b { b"true" } else { b"false" };
                out.extend_from_slice(word);
            }
            Value::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Value::Float(f) => out.extend_from_slice(format_float(*f).as_bytes()),
            Value::Bytes(b) => inspect_bytes(b, out),
            Value::Symbol(name) => {
                out.push(b':');
                out.extend_from_slice(name.as_bytes());
            }
            Value::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.extend_from_slice(b", ");
                    }
                    item.inspect_into(out, depth + 1, limit)?;
                }
                out.push(b']');
            }
            Value::Map(pairs) => {
                let mut entries = Vec::with_capacity(pairs.len());
                for (k, v) in pairs {
                    let mut entry = Vec::new();
                    k.inspect_into(&mut entry, depth + 1, limit)?;
                    entry.extend_from_slice(b" => ");
                    v.inspect_into(&mut entry, depth + 1, limit)?;
                    entries.push(entry);
                }
                entries.sort();
                out.push(b'{');
                out.extend_from_slice(&entries.join(&b", "[..]));
                out.push(b'}');
            }
            Value::Timestamp { seconds, nanos } => {
                out.extend_from_slice(format_timestamp(*seconds, *nanos).as_bytes());
            }
            Value::Opaque(o) => out.extend_from_slice(o.rendering.as_bytes()),
        }
        Ok(())
    }
}

/// Qué hacer al pasar `max_depth`: fallar (codificación) o cortar con `…`
/// (`Display`).
#[derive(Clone, Copy)]
enum Limit {
    Fail(usize),
    Elide(usize),
}

impl Limit {
    /// `true` si el valor a esta profundidad no debe escribirse.
    fn reached(self, out: &mut Vec<u8>, depth: usize) -> SeedResult<bool> {
        match self {
            Limit::Fail(max_depth) if depth > max_depth => Err(SeedError::StructuralLimit { depth, max_depth }),
            Limit::Elide(max_depth) if depth > max_depth => {
                out.extend_from_slice("…".as_bytes());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// Tramos UTF-8 válidos con el escapado de `{:?}`; bytes inválidos como `\xHH`.
fn inspect_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    out.push(b'"');
    for chunk in bytes.utf8_chunks() {
        let valid = format!("{:?}", chunk.valid());
        out.extend_from_slice(valid[1..valid.len() - 1].as_bytes());
        for byte in chunk.invalid() {
            out.extend_from_slice(format!("\\x{byte:02X}").as_bytes());
        }
    }
    out.push(b'"');
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        exponent_form(format!("{:?}", f))
    }
}

// `{:?}` pasa a notación científica con |f| < 1e-4 o >= 1e16; aquí solo
// cambia la forma: mantisa con `.0` y exponente con signo y al menos dos
// dígitos.
fn exponent_form(debug: String) -> String {
    let Some((mantissa, exponent)) = debug.split_once('e') else {
        return debug;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return debug;
    };
    let fraction = if mantissa.contains('.') { "" } else { ".0" };
    format!("{mantissa}{fraction}e{exponent:+03}")
}

// Segundos UTC sin fracción; fuera del calendario de chrono: `segundos.nanos`.
fn format_timestamp(seconds: u64, nanos: u64) -> String {
    let instant = i64::try_from(seconds).ok()
                                        .zip(u32::try_from(nanos).ok())
                                        .and_then(|(s, n)| DateTime::<Utc>::from_timestamp(s, n));
    match instant {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{seconds}.{nanos:09}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::new();
        // Con `Limit::Elide` la profundidad no produce error.
        let _ = self.render_with(&mut bytes, 0, Limit::Elide(DEFAULT_MAX_DEPTH));
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}
