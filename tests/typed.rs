use std::collections::HashMap;

use rstest::rstest;
use serde::Deserialize;
use serde_json5::{from_slice, from_str, from_str_with_options, DecodeOptions, ErrorKind};

#[derive(Debug, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    #[serde(default)]
    tags: Vec<String>,
    timeout: Option<f64>,
}

#[rstest]
fn decodes_into_struct() {
    let server: Server = from_str(
        r#"{
            // connection target
            host: 'example.com',
            port: 8080,
            tags: ['primary', 'eu-west',],
            timeout: 2.5,
        }"#,
    )
    .unwrap();
    assert_eq!(
        server,
        Server {
            host: "example.com".to_string(),
            port: 8080,
            tags: vec!["primary".to_string(), "eu-west".to_string()],
            timeout: Some(2.5),
        }
    );
}

#[rstest]
fn missing_option_and_default_fields() {
    let server: Server = from_str("{host: 'h', port: 1}").unwrap();
    assert_eq!(server.tags, Vec::<String>::new());
    assert_eq!(server.timeout, None);

    let server: Server = from_str("{host: 'h', port: 1, timeout: null}").unwrap();
    assert_eq!(server.timeout, None);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Quoted {
    e: String,
}

#[rstest]
fn struct_fields_match_case_insensitively() {
    let q: Quoted = from_str("{e:\"'\"}").unwrap();
    assert_eq!(q.e, "'");
    let q: Quoted = from_str("{E:\"'\"}").unwrap();
    assert_eq!(q.e, "'");
}

#[rstest]
fn exact_field_match_wins_over_case_folding() {
    #[derive(Debug, Deserialize)]
    struct Pair {
        a: i32,
        #[serde(rename = "A")]
        upper: i32,
    }
    let pair: Pair = from_str("{A: 1, a: 2}").unwrap();
    assert_eq!(pair.upper, 1);
    assert_eq!(pair.a, 2);
}

#[rstest]
fn unknown_fields_are_skipped() {
    let server: Server = from_str(
        "{host: 'h', extra: {deep: [1, {x: 2}]}, port: 3, junk: null}",
    )
    .unwrap();
    assert_eq!(server.port, 3);
}

#[rstest]
fn deny_unknown_fields_is_honored() {
    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Closed {
        #[allow(dead_code)]
        a: i32,
    }
    assert!(from_str::<Closed>("{a: 1, b: 2}").is_err());
}

#[rstest]
fn duplicate_struct_fields_error() {
    let err = from_str::<Quoted>("{e: 'x', E: 'y'}").unwrap_err();
    assert!(err.to_string().contains("duplicate field"));
}

#[rstest]
#[case("127", 127i8)]
#[case("-0x80", -128i8)]
#[case("+5", 5i8)]
fn narrow_integers(#[case] input: &str, #[case] expected: i8) {
    assert_eq!(from_str::<i8>(input).unwrap(), expected);
}

#[rstest]
#[case::overflow("128")]
#[case::fractional("1.5")]
#[case::exponent("1e2")]
#[case::nan("NaN")]
fn narrow_integer_failures(#[case] input: &str) {
    let err = from_str::<i8>(input).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conversion);
    assert!(err.location.is_some());
}

#[rstest]
fn wide_integers_beyond_64_bits() {
    assert_eq!(from_str::<u128>("0x10000000000000000").unwrap(), 1u128 << 64);
    assert_eq!(
        from_str::<i128>("-170141183460469231731687303715884105728").unwrap(),
        i128::MIN
    );
    let err = from_str::<u128>("0x100000000000000000000000000000000").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conversion);
}

#[rstest]
fn unsigned_rejects_negatives() {
    assert_eq!(from_str::<u64>("0xffffffffffffffff").unwrap(), u64::MAX);
    assert!(from_str::<u32>("-1").is_err());
    assert!(from_str::<u32>("-0").is_err());
}

#[rstest]
#[case("-0x0", -0.0)]
#[case("+1.e1", 10.0)]
#[case("-Infinity", f64::NEG_INFINITY)]
#[case(".25", 0.25)]
fn float_specials(#[case] input: &str, #[case] expected: f64) {
    let got: f64 = from_str(input).unwrap();
    assert_eq!(got, expected);
    assert_eq!(got.is_sign_negative(), expected.is_sign_negative());
}

#[rstest]
fn nan_decodes_to_nan() {
    assert!(from_str::<f64>("NaN").unwrap().is_nan());
    assert!(from_str::<f32>("NaN").unwrap().is_nan());
}

#[rstest]
fn type_mismatch_carries_location() {
    let err = from_str::<Server>("{host: 'h',\n port: 'not a number'}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    assert_eq!(err.to_string(), "cannot decode string into u16");
    let loc = err.location.unwrap();
    assert_eq!((loc.line, loc.column), (2, 8));
}

#[rstest]
fn sequences_tuples_and_maps() {
    let v: Vec<i32> = from_str("[1, 2, 3,]").unwrap();
    assert_eq!(v, [1, 2, 3]);

    let t: (bool, String, f64) = from_str("[true, 'x', .5]").unwrap();
    assert_eq!(t, (true, "x".to_string(), 0.5));

    let m: HashMap<String, i32> = from_str("{a: 1, 'b': 2}").unwrap();
    assert_eq!(m["a"], 1);
    assert_eq!(m["b"], 2);
}

#[rstest]
fn tuple_arity_mismatch_errors() {
    assert!(from_str::<(i32, i32)>("[1, 2, 3]").is_err());
    assert!(from_str::<(i32, i32)>("[1]").is_err());
}

#[derive(Debug, Deserialize, PartialEq)]
enum Shape {
    Point,
    Circle(f64),
    Rect { w: f64, h: f64 },
}

#[rstest]
fn externally_tagged_enums() {
    assert_eq!(from_str::<Shape>("'Point'").unwrap(), Shape::Point);
    assert_eq!(from_str::<Shape>("{Circle: 2.5}").unwrap(), Shape::Circle(2.5));
    assert_eq!(
        from_str::<Shape>("{Rect: {w: 1, h: 2,}}").unwrap(),
        Shape::Rect { w: 1.0, h: 2.0 }
    );
}

#[rstest]
fn newtype_and_nested_structs() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Meters(f64);

    #[derive(Debug, Deserialize, PartialEq)]
    struct Road {
        length: Meters,
        lanes: Vec<u8>,
    }

    let road: Road = from_str("{length: 1.5, lanes: [1, 2]}").unwrap();
    assert_eq!(road, Road { length: Meters(1.5), lanes: vec![1, 2] });
}

#[rstest]
fn char_wants_exactly_one_character() {
    assert_eq!(from_str::<char>("'é'").unwrap(), 'é');
    assert!(from_str::<char>("'ab'").is_err());
    assert!(from_str::<char>("''").is_err());
}

#[rstest]
fn trailing_input_after_value_errors() {
    let err = from_str::<bool>("true false").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid character 'f' after top-level value"
    );
}

#[rstest]
fn from_slice_checks_utf8() {
    let v: Vec<u8> = from_slice(b"[1, 2]").unwrap();
    assert_eq!(v, [1, 2]);

    let err = from_slice::<serde_json5::Value>(b"[1, \xFF]").unwrap_err();
    assert_eq!(err.to_string(), "invalid UTF-8 in input");
    assert_eq!(err.location.unwrap().offset, 4);
}

#[rstest]
fn from_reader_decodes_streams() {
    let input = "{host: 'h', port: 9}".as_bytes();
    let server: Server = serde_json5::from_reader(input).unwrap();
    assert_eq!(server.port, 9);
}

#[rstest]
fn strict_options_flow_through_typed_decoding() {
    let err =
        from_str_with_options::<Vec<i32>>("[1, 2,]", DecodeOptions::new().strict(true))
            .unwrap_err();
    assert_eq!(err.to_string(), "trailing comma not allowed here");
    assert_eq!(err.location.unwrap().offset, 5);
}
