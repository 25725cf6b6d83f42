//! Codificación canónica de un `Value` a bytes.
//!
//! Cada valor se escribe como una etiqueta de un byte seguida de su payload;
//! el resultado es autodelimitado. Los mapas se emiten ordenados por la
//! representación textual de sus claves (comparación byte a byte) y cada
//! clave se escribe como cadena (`s`) con esa representación, sea cual sea su
//! variante original: `{1 => x}` y `{"1" => x}` producen los mismos bytes.
//!
//! Si dos claves se renderizan igual, el empate se resuelve por la
//! codificación canónica de la clave original y luego del valor, de modo que
//! el resultado sigue sin depender del orden de inserción.

use crate::codec::{encode_varint, varint_len, zigzag};
use crate::config::{KeyCollisionPolicy, SeedConfig};
use crate::constants::*;
use crate::errors::{SeedError, SeedResult};
use crate::value::Value;

/// Codificador recursivo con guarda de profundidad. Cada cálculo crea el suyo:
/// el buffer nunca se comparte entre llamadas.
#[derive(Debug)]
pub struct CanonicalEncoder<'c> {
    config: &'c SeedConfig,
    buf: Vec<u8>,
}

struct MapEntry<'v> {
    rendering: Vec<u8>,
    key: &'v Value,
    value: &'v Value,
    tie: Option<(Vec<u8>, Vec<u8>)>,
}

impl<'c> CanonicalEncoder<'c> {
    pub fn new(config: &'c SeedConfig) -> Self {
        Self { config, buf: Vec::new() }
    }

    /// Añade la codificación de `value` (raíz a profundidad 0).
    pub fn encode(&mut self, value: &Value) -> SeedResult<()> {
        self.encode_at(value, 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn encode_at(&mut self, value: &Value, depth: usize) -> SeedResult<()> {
        if depth > self.config.max_depth {
            return Err(SeedError::StructuralLimit { depth,
                                                    max_depth: self.config.max_depth });
        }
        match value {
            Value::Null => self.buf.push(TAG_NULL),
            Value::Bool(true) => self.buf.push(TAG_TRUE),
            Value::Bool(false) => self.buf.push(TAG_FALSE),
            Value::Integer(n) => {
                self.buf.push(TAG_INTEGER);
                encode_varint(zigzag(*n), &mut self.buf);
            }
            Value::Float(f) => {
                self.buf.push(TAG_FLOAT);
                self.buf.extend_from_slice(&f.to_bits().to_be_bytes());
            }
            Value::Bytes(b) => self.write_string(TAG_STRING, b),
            Value::Symbol(name) => self.write_string(TAG_SYMBOL, name.as_bytes()),
            Value::Array(items) => {
                self.buf.push(TAG_ARRAY);
                encode_varint(items.len() as u64, &mut self.buf);
                for item in items {
                    self.encode_at(item, depth + 1)?;
                }
            }
            Value::Map(pairs) => self.encode_map(pairs, depth)?,
            Value::Timestamp { seconds, nanos } => {
                self.buf.push(TAG_TIMESTAMP);
                encode_varint(*seconds, &mut self.buf);
                encode_varint(*nanos, &mut self.buf);
            }
            Value::Opaque(o) => self.write_string(TAG_OPAQUE, o.payload().as_bytes()),
        }
        Ok(())
    }

    fn write_string(&mut self, tag: u8, bytes: &[u8]) {
        let len = bytes.len() as u64;
        self.buf.reserve(1 + varint_len(len) + bytes.len());
        self.buf.push(tag);
        encode_varint(len, &mut self.buf);
        self.buf.extend_from_slice(bytes);
    }

    fn encode_map(&mut self, pairs: &[(Value, Value)], depth: usize) -> SeedResult<()> {
        let child_depth = depth + 1;
        let mut entries = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let mut rendering = Vec::new();
            key.render_into(&mut rendering, child_depth, self.config.max_depth)?;
            entries.push(MapEntry { rendering, key, value, tie: None });
        }
        entries.sort_by(|a, b| a.rendering.cmp(&b.rendering));

        let mut start = 0;
        while start < entries.len() {
            let run = entries[start..].iter().take_while(|e| e.rendering == entries[start].rendering).count();
            if run > 1 {
                if self.config.key_collisions == KeyCollisionPolicy::Reject {
                    let rendering = String::from_utf8_lossy(&entries[start].rendering).into_owned();
                    return Err(SeedError::KeyCollision(rendering));
                }
                self.order_ties(&mut entries[start..start + run], child_depth)?;
            }
            start += run;
        }

        self.buf.push(TAG_MAP);
        encode_varint(entries.len() as u64, &mut self.buf);
        for entry in &entries {
            self.write_string(TAG_STRING, &entry.rendering);
            self.encode_at(entry.value, child_depth)?;
        }
        Ok(())
    }

    fn order_ties(&self, group: &mut [MapEntry<'_>], depth: usize) -> SeedResult<()> {
        for entry in group.iter_mut() {
            let key = self.sub_encode(entry.key, depth)?;
            let value = self.sub_encode(entry.value, depth)?;
            entry.tie = Some((key, value));
        }
        group.sort_by(|a, b| a.tie.cmp(&b.tie));
        Ok(())
    }

    fn sub_encode(&self, value: &Value, depth: usize) -> SeedResult<Vec<u8>> {
        let mut sub = CanonicalEncoder::new(self.config);
        sub.encode_at(value, depth)?;
        Ok(sub.buf)
    }
}

/// Codificación canónica completa de `value` en un buffer nuevo.
pub fn canonical_bytes(value: &Value, config: &SeedConfig) -> SeedResult<Vec<u8>> {
    let mut encoder = CanonicalEncoder::new(config);
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Opaque;

    fn bytes(v: &Value) -> Vec<u8> {
        canonical_bytes(v, &SeedConfig::default()).expect("encoding should succeed")
    }

    #[test]
    fn scalar_fixtures() {
        assert_eq!(bytes(&Value::Null), vec![0x6e]);
        assert_eq!(bytes(&Value::Bool(true)), vec![0x74]);
        assert_eq!(bytes(&Value::Bool(false)), vec![0x66]);
        assert_eq!(bytes(&Value::Integer(5)), vec![0x69, 0x0a]);
        assert_eq!(bytes(&Value::Integer(-1)), vec![0x69, 0x01]);
        assert_eq!(bytes(&Value::Integer(300)), vec![0x69, 0xd8, 0x04]);
    }

    #[test]
    fn empty_containers() {
        assert_eq!(bytes(&Value::Array(vec![])), vec![0x61, 0x00]);
        assert_eq!(bytes(&Value::Map(vec![])), vec![0x68, 0x00]);
        assert_eq!(bytes(&Value::from("")), vec![0x73, 0x00]);
    }

    #[test]
    fn floats_are_big_endian_bit_patterns() {
        assert_eq!(bytes(&Value::Float(0.0)), vec![0x64, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes(&Value::Float(-0.0)), vec![0x64, 0x80, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes(&Value::Float(1.5)), vec![0x64, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn strings_and_symbols_differ_only_in_tag() {
        assert_eq!(bytes(&Value::from("hello")), b"s\x05hello".to_vec());
        assert_eq!(bytes(&Value::symbol("hello")), b"y\x05hello".to_vec());
    }

    #[test]
    fn raw_bytes_are_taken_as_given() {
        assert_eq!(bytes(&Value::bytes(vec![0xff, 0x00])), vec![0x73, 0x02, 0xff, 0x00]);
    }

    #[test]
    fn timestamp_and_opaque_payloads() {
        let ts = Value::Timestamp { seconds: 1_700_000_000, nanos: 123_456_789 };
        assert_eq!(bytes(&ts), vec![0x54, 0x80, 0xe2, 0xcf, 0xaa, 0x06, 0x95, 0x9a, 0xef, 0x3a]);
        let o = Value::Opaque(Opaque::new("Point", "(1, 2)"));
        assert_eq!(bytes(&o), b"o\x0cPoint:(1, 2)".to_vec());
    }

    #[test]
    fn arrays_keep_order() {
        let v = Value::array(vec![Value::Integer(1), Value::from("a"), Value::Null]);
        assert_eq!(bytes(&v), vec![0x61, 0x03, 0x69, 0x02, 0x73, 0x01, 0x61, 0x6e]);
    }

    #[test]
    fn map_keys_sorted_and_written_as_strings() {
        let v = Value::map(vec![("b", 2), ("a", 1)]);
        assert_eq!(bytes(&v), b"h\x02s\x01ai\x02s\x01bi\x04".to_vec());
    }

    #[test]
    fn integer_and_string_keys_share_encoding() {
        let int_key = Value::map(vec![(Value::Integer(1), Value::from("v"))]);
        let str_key = Value::map(vec![(Value::from("1"), Value::from("v"))]);
        assert_eq!(bytes(&int_key), bytes(&str_key));
    }

    #[test]
    fn symbol_key_encoded_as_string() {
        let v = Value::map(vec![(Value::symbol("k"), Value::Null)]);
        assert_eq!(bytes(&v), b"h\x01s\x01kn".to_vec());
    }

    #[test]
    fn colliding_keys_ordered_independently_of_insertion() {
        let a = Value::map(vec![(Value::Integer(1), Value::from("int")), (Value::from("1"), Value::from("str"))]);
        let b = Value::map(vec![(Value::from("1"), Value::from("str")), (Value::Integer(1), Value::from("int"))]);
        assert_eq!(bytes(&a), bytes(&b));
        // la clave entera ('i') precede a la cadena ('s') en el desempate
        assert_eq!(bytes(&a), b"h\x02s\x011s\x03ints\x011s\x03str".to_vec());
    }

    #[test]
    fn reject_policy_reports_collision() {
        let cfg = SeedConfig::new().with_key_collisions(KeyCollisionPolicy::Reject);
        let v = Value::map(vec![(Value::Integer(1), Value::Null), (Value::from("1"), Value::Null)]);
        match canonical_bytes(&v, &cfg) {
            Err(SeedError::KeyCollision(r)) => assert_eq!(r, "1"),
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn depth_guard_counts_enclosing_containers() {
        let cfg = SeedConfig::new().with_max_depth(2);
        let ok = Value::array(vec![Value::array(vec![Value::Integer(1)])]);
        assert!(canonical_bytes(&ok, &cfg).is_ok());
        let too_deep = Value::array(vec![ok]);
        match canonical_bytes(&too_deep, &cfg) {
            Err(SeedError::StructuralLimit { depth, max_depth }) => {
                assert_eq!(depth, 3);
                assert_eq!(max_depth, 2);
            }
            other => panic!("expected structural limit, got {:?}", other),
        }
    }

    #[test]
    fn depth_guard_applies_to_map_keys() {
        let cfg = SeedConfig::new().with_max_depth(1);
        let nested_key = Value::array(vec![Value::array(vec![Value::Null])]);
        let v = Value::map(vec![(nested_key, Value::Null)]);
        assert!(matches!(canonical_bytes(&v, &cfg), Err(SeedError::StructuralLimit { .. })));
    }

    #[test]
    fn encoder_appends_to_existing_state() {
        let cfg = SeedConfig::default();
        let mut enc = CanonicalEncoder::new(&cfg);
        enc.encode(&Value::Null).expect("null");
        enc.encode(&Value::Bool(true)).expect("true");
        assert_eq!(enc.as_bytes(), &[0x6e, 0x74]);
    }
}
