use seed_core::{canonical_bytes, seed_for, Opaque, SeedCalculator, SeedConfig, Value};

// Semillas de referencia: cualquier implementación correcta del formato v1
// debe reproducirlas exactamente.
fn golden_fixtures() -> Vec<(&'static str, Value, u32)> {
    vec![("null", Value::Null, 694_295_357),
         ("true", Value::Bool(true), 694_283_247),
         ("false", Value::Bool(false), 694_301_077),
         ("int 5", Value::Integer(5), 1_038_811_181),
         ("int -1", Value::Integer(-1), 1_038_819_288),
         ("int 300", Value::Integer(300), 2_770_057),
         ("int min", Value::Integer(i64::MIN), 513_404_166),
         ("empty array", Value::Array(vec![]), 1_038_029_795),
         ("empty map", Value::Map(vec![]), 1_038_390_866),
         ("empty string", Value::from(""), 1_034_020_033),
         ("0.0", Value::Float(0.0), 1_613_155_237),
         ("-0.0", Value::Float(-0.0), 1_579_251_880),
         ("string", Value::from("hello"), 869_365_218),
         ("symbol", Value::symbol("hello"), 1_315_960_460),
         ("mixed array", Value::array(vec![Value::Integer(1), Value::from("a"), Value::Null]), 1_175_353_620),
         ("map", Value::map(vec![("b", 2), ("a", 1)]), 632_171_394),
         ("timestamp", Value::Timestamp { seconds: 1_700_000_000, nanos: 123_456_789 }, 1_395_959_127),
         ("opaque", Value::Opaque(Opaque::new("Point", "(1, 2)")), 1_416_481_010),
         ("nested",
          Value::map(vec![(Value::from("name"), Value::from("x")),
                          (Value::from("tags"), Value::array(vec![Value::symbol("a"), Value::symbol("b")])),
                          (Value::from("n"),
                           Value::map(vec![(Value::from("deep"), Value::array(vec![Value::Float(1.5), Value::Bool(false)]))]))]),
          373_818_388),]
}

#[test]
fn golden_seeds_are_reproduced() {
    for (name, value, expected) in golden_fixtures() {
        assert_eq!(seed_for(&value).expect("seed"), expected, "fixture {name}");
    }
}

#[test]
fn golden_digests_for_scalars() {
    let calc = SeedCalculator::default();
    assert_eq!(calc.digest(&Value::Integer(5)).expect("digest"), 0x08b7_1c07_b55c_1c2a);
    assert_eq!(calc.digest(&Value::Float(-0.0)).expect("digest"), 0x8309_5cfb_dd28_2453);
    assert_eq!(calc.digest(&Value::from("hello")).expect("digest"), 0x9e97_f049_2d46_85ab);
}

#[test]
fn nested_fixture_bytes() {
    let value = Value::map(vec![(Value::from("tags"), Value::array(vec![Value::symbol("a"), Value::symbol("b")])),
                                (Value::from("n"),
                                 Value::map(vec![(Value::from("deep"), Value::array(vec![Value::Float(1.5), Value::Bool(false)]))])),
                                (Value::from("name"), Value::from("x"))]);
    let mut expected = Vec::new();
    expected.extend_from_slice(b"h\x03");
    expected.extend_from_slice(b"s\x01nh\x01s\x04deepa\x02d\x3f\xf8\x00\x00\x00\x00\x00\x00f");
    expected.extend_from_slice(b"s\x04names\x01x");
    expected.extend_from_slice(b"s\x04tagsa\x02y\x01ay\x01b");
    assert_eq!(canonical_bytes(&value, &SeedConfig::default()).expect("bytes"), expected);
}
