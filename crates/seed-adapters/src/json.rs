//! JSON plano (`serde_json::Value`) -> `Value`.
//!
//! Objetos pasan a mapas con claves cadena, números enteros a `Integer`
//! (los `u64` por encima de `i64::MAX` se reinterpretan) y el resto de
//! números a `Float`.

use log::debug;
use serde_json::{Map, Number, Value as Json};
use seed_core::Value;

use crate::error::AdapterError;

pub fn from_json(json: &Json, max_depth: usize) -> Result<Value, AdapterError> {
    convert(json, 0, max_depth)
}

fn convert(json: &Json, depth: usize, max_depth: usize) -> Result<Value, AdapterError> {
    if depth > max_depth {
        return Err(AdapterError::TooDeep { depth, max_depth });
    }
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => number(n),
        Json::String(s) => Value::from(s.as_str()),
        Json::Array(items) => {
            let items = items.iter().map(|item| convert(item, depth + 1, max_depth)).collect::<Result<Vec<_>, _>>()?;
            Value::Array(items)
        }
        Json::Object(map) => object(map, depth, max_depth)?,
    })
}

fn object(map: &Map<String, Json>, depth: usize, max_depth: usize) -> Result<Value, AdapterError> {
    let mut pairs = Vec::with_capacity(map.len());
    for (k, v) in map {
        pairs.push((Value::from(k.as_str()), convert(v, depth + 1, max_depth)?));
    }
    Ok(Value::Map(pairs))
}

pub(crate) fn number(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Integer(i)
    } else if let Some(u) = n.as_u64() {
        debug!("integer {u} exceeds i64; truncated by reinterpretation");
        Value::from(u)
    } else {
        Value::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}
