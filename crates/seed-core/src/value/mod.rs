//! Modelo de valores dinámicos que entra al núcleo.
//!
//! `Value` es un conjunto cerrado de variantes: todo lo que el host no sepa
//! mapear a una de ellas llega como `Opaque`, con su nombre de tipo y su
//! representación textual ya capturados (ver `Opaque::try_capture`). El árbol
//! debe ser finito y acíclico; la profundidad la acota `SeedConfig::max_depth`.

pub mod render;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::errors::{BoxError, SeedError, SeedResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Entero de 64 bits con signo. Enteros más anchos se truncan antes de
    /// llegar aquí (`Value::from_wide_int`).
    Integer(i64),
    /// Se codifica por patrón de bits: `0.0` y `-0.0` son valores distintos.
    Float(f64),
    /// Cadena o bytes crudos, sin normalización de encoding.
    Bytes(Vec<u8>),
    Symbol(String),
    Array(Vec<Value>),
    /// Pares clave/valor con claves únicas; el orden de inserción no entra a
    /// la codificación canónica.
    Map(Vec<(Value, Value)>),
    Timestamp { seconds: u64, nanos: u64 },
    Opaque(Opaque),
}

/// Valor no representable por las demás variantes: nombre de tipo y
/// representación textual capturados por el host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opaque {
    pub type_name: String,
    pub rendering: String,
}

impl Opaque {
    pub fn new(type_name: impl Into<String>, rendering: impl Into<String>) -> Self {
        Self { type_name: type_name.into(),
               rendering: rendering.into() }
    }

    /// Captura la representación de cualquier tipo `Display`.
    pub fn capture<T>(type_name: impl Into<String>, value: &T) -> Self
        where T: fmt::Display + ?Sized
    {
        Self::new(type_name, value.to_string())
    }

    /// Captura con un renderizador falible del host. Un fallo se traduce en
    /// `SeedError::SeedComputation` y no se produce semilla.
    pub fn try_capture<F, E>(type_name: impl Into<String>, render: F) -> SeedResult<Self>
        where F: FnOnce() -> Result<String, E>,
              E: Into<BoxError>
    {
        let rendering = render().map_err(SeedError::computation)?;
        Ok(Self::new(type_name, rendering))
    }

    /// Payload codificado: `"<type-name>:<rendering>"`.
    pub fn payload(&self) -> String {
        format!("{}:{}", self.type_name, self.rendering)
    }
}

impl Value {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn array<I, V>(items: I) -> Self
        where I: IntoIterator<Item = V>,
              V: Into<Value>
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(pairs: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<Value>,
              V: Into<Value>
    {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Segundos con signo reinterpretados como sin signo (truncado de 64 bits).
    pub fn timestamp(seconds: i64, nanos: u32) -> Self {
        Value::Timestamp { seconds: seconds as u64,
                           nanos: u64::from(nanos) }
    }

    /// Reduce un entero ancho a 64 bits por reinterpretación en complemento a
    /// dos (se pierden los bits altos).
    pub fn from_wide_int(n: i128) -> Self {
        Value::Integer(n as i64)
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Map(_))
    }

    /// Nombre corto de la variante (útil en logs y mensajes de error).
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Symbol(_) => "symbol",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Timestamp { .. } => "timestamp",
            Value::Opaque(_) => "opaque",
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_lossless_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Integer(i64::from(n))
            }
        })*
    };
}

from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    /// Valores por encima de `i64::MAX` se reinterpretan (quedan negativos).
    fn from(n: u64) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::from_wide_int(n)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::timestamp(t.timestamp(), t.timestamp_subsec_nanos())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::map(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wide_ints_truncate_by_reinterpretation() {
        assert_eq!(Value::from_wide_int(1 << 64), Value::Integer(0));
        assert_eq!(Value::from_wide_int((1 << 64) + 5), Value::Integer(5));
        assert_eq!(Value::from(u64::MAX), Value::Integer(-1));
    }

    #[test]
    fn strings_become_bytes() {
        assert_eq!(Value::from("héllo"), Value::Bytes("héllo".as_bytes().to_vec()));
        assert_eq!(Value::from(String::from("x")), Value::bytes(*b"x"));
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Integer(3));
    }

    #[test]
    fn datetime_becomes_timestamp() {
        let t = Utc.timestamp_opt(1_700_000_000, 123_456_789).single().expect("valid instant");
        assert_eq!(Value::from(t), Value::Timestamp { seconds: 1_700_000_000, nanos: 123_456_789 });
    }

    #[test]
    fn negative_seconds_reinterpret_as_unsigned() {
        assert_eq!(Value::timestamp(-1, 0), Value::Timestamp { seconds: u64::MAX, nanos: 0 });
    }

    #[test]
    fn try_capture_wraps_host_failure() {
        let res = Opaque::try_capture("Widget", || Err::<String, _>("to_s raised"));
        match res {
            Err(SeedError::SeedComputation(cause)) => assert_eq!(cause.to_string(), "to_s raised"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn opaque_payload_joins_type_and_rendering() {
        let o = Opaque::capture("Point", &"(1, 2)");
        assert_eq!(o.payload(), "Point:(1, 2)");
    }

    #[test]
    fn collect_pairs_into_map() {
        let v: Value = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(v, Value::Map(vec![(Value::from("a"), Value::Integer(1)), (Value::from("b"), Value::Integer(2))]));
        assert_eq!(v.kind(), "map");
        assert!(v.is_container());
    }
}
