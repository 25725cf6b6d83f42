//! JSON etiquetado: extiende JSON para expresar variantes que JSON no tiene.
//!
//! Un objeto con una única clave que empieza por `$` es una etiqueta:
//!
//! | Forma | Resultado |
//! |---|---|
//! | `{"$symbol": "name"}` | `Symbol` |
//! | `{"$bytes": [104, 105]}` | `Bytes` crudos (0..=255) |
//! | `{"$int": "123456789012345678901234"}` | entero ancho truncado a 64 bits |
//! | `{"$float": "NaN" \| "Infinity" \| "-Infinity" \| "-0.0"}` | `Float` |
//! | `{"$time": "2024-01-01T00:00:00Z"}` o `{"$time": [secs, nanos]}` | `Timestamp` |
//! | `{"$opaque": {"type": "T", "repr": "..."}}` | `Opaque` |
//! | `{"$map": [[k, v], ...]}` | mapa con claves de cualquier variante |
//!
//! Cualquier otra clave `$...` en solitario es un error. El resto de JSON se
//! interpreta como en `json::from_json`.

use chrono::{DateTime, Utc};
use serde_json::Value as Json;
use seed_core::{Opaque, Value};

use crate::error::AdapterError;
use crate::json::number;

pub fn from_tagged_json(json: &Json, max_depth: usize) -> Result<Value, AdapterError> {
    TaggedReader { max_depth }.read(json, 0)
}

struct TaggedReader {
    max_depth: usize,
}

impl TaggedReader {
    fn read(&self, json: &Json, depth: usize) -> Result<Value, AdapterError> {
        if depth > self.max_depth {
            return Err(AdapterError::TooDeep { depth,
                                               max_depth: self.max_depth });
        }
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => Ok(number(n)),
            Json::String(s) => Ok(Value::from(s.as_str())),
            Json::Array(items) => {
                let items = items.iter().map(|item| self.read(item, depth + 1)).collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(items))
            }
            Json::Object(map) => {
                if map.len() == 1 {
                    if let Some((tag, payload)) = map.iter().next().filter(|(k, _)| k.starts_with('$')) {
                        return self.read_tag(tag, payload, depth);
                    }
                }
                let mut pairs = Vec::with_capacity(map.len());
                for (k, v) in map {
                    pairs.push((Value::from(k.as_str()), self.read(v, depth + 1)?));
                }
                Ok(Value::Map(pairs))
            }
        }
    }

    fn read_tag(&self, tag: &str, payload: &Json, depth: usize) -> Result<Value, AdapterError> {
        match tag {
            "$symbol" => {
                let name = payload.as_str().ok_or_else(|| AdapterError::payload("$symbol", "expected string"))?;
                Ok(Value::symbol(name))
            }
            "$bytes" => read_bytes(payload),
            "$int" => read_wide_int(payload),
            "$float" => read_float(payload),
            "$time" => read_time(payload),
            "$opaque" => read_opaque(payload),
            "$map" => self.read_map(payload, depth),
            other => Err(AdapterError::UnknownTag(other.to_string())),
        }
    }

    fn read_map(&self, payload: &Json, depth: usize) -> Result<Value, AdapterError> {
        let entries = payload.as_array().ok_or_else(|| AdapterError::payload("$map", "expected array of pairs"))?;
        let mut pairs = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.as_array().map(Vec::as_slice) {
                Some([k, v]) => pairs.push((self.read(k, depth + 1)?, self.read(v, depth + 1)?)),
                _ => return Err(AdapterError::payload("$map", "each entry must be a [key, value] pair")),
            }
        }
        Ok(Value::Map(pairs))
    }
}

fn read_bytes(payload: &Json) -> Result<Value, AdapterError> {
    let items = payload.as_array().ok_or_else(|| AdapterError::payload("$bytes", "expected array of integers"))?;
    let bytes = items.iter()
                     .map(|b| {
                         b.as_u64()
                          .and_then(|n| u8::try_from(n).ok())
                          .ok_or_else(|| AdapterError::payload("$bytes", format!("{b} is not a byte")))
                     })
                     .collect::<Result<Vec<u8>, _>>()?;
    Ok(Value::Bytes(bytes))
}

fn read_wide_int(payload: &Json) -> Result<Value, AdapterError> {
    match payload {
        Json::Number(n) => Ok(number(n)),
        Json::String(s) => {
            let wide: i128 = s.trim()
                              .parse()
                              .map_err(|e| AdapterError::payload("$int", format!("{s:?}: {e}")))?;
            Ok(Value::from_wide_int(wide))
        }
        _ => Err(AdapterError::payload("$int", "expected decimal string")),
    }
}

fn read_float(payload: &Json) -> Result<Value, AdapterError> {
    match payload {
        Json::Number(n) => n.as_f64()
                            .map(Value::Float)
                            .ok_or_else(|| AdapterError::payload("$float", "not representable as f64")),
        Json::String(s) => {
            let f = match s.as_str() {
                "NaN" => f64::NAN,
                "Infinity" => f64::INFINITY,
                "-Infinity" => f64::NEG_INFINITY,
                other => other.parse().map_err(|e| AdapterError::payload("$float", format!("{other:?}: {e}")))?,
            };
            Ok(Value::Float(f))
        }
        _ => Err(AdapterError::payload("$float", "expected number or string")),
    }
}

fn read_time(payload: &Json) -> Result<Value, AdapterError> {
    match payload {
        Json::String(s) => {
            let t = DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc);
            Ok(Value::from(t))
        }
        Json::Array(parts) => match parts.as_slice() {
            [secs, nanos] => {
                let seconds = secs.as_i64()
                                  .map(|s| s as u64)
                                  .or_else(|| secs.as_u64())
                                  .ok_or_else(|| AdapterError::payload("$time", "seconds must be an integer"))?;
                let nanos = nanos.as_u64().ok_or_else(|| AdapterError::payload("$time", "nanos must be a non-negative integer"))?;
                Ok(Value::Timestamp { seconds, nanos })
            }
            _ => Err(AdapterError::payload("$time", "expected [seconds, nanos]")),
        },
        _ => Err(AdapterError::payload("$time", "expected RFC 3339 string or [seconds, nanos]")),
    }
}

fn read_opaque(payload: &Json) -> Result<Value, AdapterError> {
    let type_name = payload.get("type")
                           .and_then(Json::as_str)
                           .ok_or_else(|| AdapterError::payload("$opaque", "missing \"type\" string"))?;
    let rendering = payload.get("repr")
                           .and_then(Json::as_str)
                           .ok_or_else(|| AdapterError::payload("$opaque", "missing \"repr\" string"))?;
    Ok(Value::Opaque(Opaque::new(type_name, rendering)))
}
