#![allow(clippy::float_cmp)]

use insta::assert_snapshot;
use rstest::rstest;

use super::*;
use crate::Number;

fn err(input: &str) -> ParseError {
    parse(input).unwrap_err()
}

#[test]
fn parser_basic_example() {
    let v = parse("[\"hello\", {\"\": \"world\"}, 0, 1, 1.2,\ntrue, false, null]").unwrap();
    let Value::Array(items) = &v else {
        panic!("expected array");
    };
    assert_eq!(items.len(), 8);
    assert_eq!(items[0], Value::from("hello"));
    assert_eq!(items[1][""], Value::from("world"));
    assert_eq!(items[4].as_f64(), Some(1.2));
    assert_eq!(&items[5..], [Value::Boolean(true), Value::Boolean(false), Value::Null]);
}

#[test]
fn number_variants_follow_the_literal() {
    assert!(matches!(parse("42").unwrap(), Value::Number(Number::I32(42))));
    assert!(matches!(parse("-0").unwrap(), Value::Number(Number::I32(0))));
    assert!(matches!(parse("42.0").unwrap(), Value::Number(Number::F64(v)) if v == 42.0));
    assert!(matches!(parse("4e1").unwrap(), Value::Number(Number::F64(v)) if v == 40.0));
    assert!(matches!(
        parse("9999999999").unwrap(),
        Value::Number(Number::I64(9_999_999_999))
    ));
    assert!(matches!(
        parse("-2147483649").unwrap(),
        Value::Number(Number::I64(-2_147_483_649))
    ));
    assert!(matches!(
        parse("2147483647").unwrap(),
        Value::Number(Number::I32(i32::MAX))
    ));
    assert!(matches!(
        parse("-9223372036854775808").unwrap(),
        Value::Number(Number::I64(i64::MIN))
    ));
}

#[rstest]
#[case(r#""a\nb""#, "a\nb")]
#[case(r#""\ud83d\ude00""#, "\u{1F600}")]
#[case(r#""\u00e9t\u00C9""#, "\u{e9}t\u{c9}")]
#[case(r#""\b\t\f\r\"\/\\""#, "\u{8}\t\u{c}\r\"/\\")]
#[case("\"caf\u{e9} \u{2028} \u{1F600}\"", "caf\u{e9} \u{2028} \u{1F600}")]
#[case(r#""""#, "")]
#[case("\"raw\ttab\"", "raw\ttab")]
fn strings_decode(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse(input).unwrap(), Value::from(expected));
}

#[rstest]
#[case(r#""\ud83d""#)]
#[case(r#""\ud83dx""#)]
#[case(r#""\ude00""#)]
#[case(r#""\ud83d\u0041""#)]
#[case(r#""\u12G4""#)]
fn bad_escapes_are_encoding_errors(#[case] input: &str) {
    let e = err(input);
    assert!(e.is_encoding(), "{e}");
}

#[rstest]
#[case(&[b'"', 0xC3, b'"'])] // continuation replaced by quote
#[case(&[b'"', 0xC0, 0x80, b'"'])] // overlong NUL
#[case(&[b'"', 0xE0, 0x80, 0x80, b'"'])] // overlong
#[case(&[b'"', 0xED, 0xA0, 0x80, b'"'])] // encoded surrogate
#[case(&[b'"', 0xF4, 0x90, 0x80, 0x80, b'"'])] // past U+10FFFF
#[case(&[b'"', 0x80, b'"'])] // stray continuation
fn bad_utf8_is_an_encoding_error(#[case] input: &[u8]) {
    let e = parse(input).unwrap_err();
    assert!(e.is_encoding(), "{e}");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\"abc")]
#[case("\"ab\\")]
#[case("\"\\u12")]
#[case("\"\\ud83d\\")]
#[case("[1,")]
#[case("[1")]
#[case("[")]
#[case("{\"a\"")]
#[case("{\"a\":")]
#[case("{\"a\":1")]
#[case("{")]
#[case("tr")]
#[case("nul")]
#[case("-")]
#[case("1.")]
#[case("1e")]
#[case("1e+")]
#[case("[1, -")]
#[case("{\"a\":2.")]
fn truncated_input_is_reported(#[case] input: &str) {
    let e = err(input);
    assert!(e.is_truncation(), "{input:?}: {e}");
    assert!(e.offset <= input.len());
}

#[test]
fn truncated_multibyte_sequence() {
    let e = parse([b'"', 0xE2, 0x82]).unwrap_err();
    assert!(e.is_truncation());
    assert_eq!(e.offset, 3);
}

#[rstest]
#[case("{\"a\" 1}")]
#[case("{\"a\":1 \"b\":2}")]
#[case("[1 2]")]
#[case("{1:2}")]
#[case("[1,]")]
#[case("{\"a\":1,}")]
#[case("True")]
#[case("nulx")]
#[case("+1")]
#[case("01")]
#[case("1.]")]
#[case("-]")]
#[case("1e,")]
#[case("1.e5")]
#[case("\"\\x\"")]
#[case("[] []")]
#[case("@")]
fn malformed_input_is_a_syntax_error(#[case] input: &str) {
    let e = err(input);
    assert!(e.is_syntax(), "{input:?}: {e}");
}

#[test]
fn cut_off_number_points_past_the_literal() {
    let e = err("[1, -");
    assert_eq!(e.kind, ParseErrorKind::Truncated(Incomplete::Number));
    assert_eq!(e.offset, 5);
    assert_snapshot!(err("2."), @"truncated input: incomplete number at offset 2 (line 1, column 3), near `2.`");
}

#[test]
fn numbers_out_of_range() {
    assert_eq!(
        err("9223372036854775808").kind,
        ParseErrorKind::Syntax(SyntaxError::NumberOutOfRange)
    );
    assert_eq!(
        err("1e400").kind,
        ParseErrorKind::Syntax(SyntaxError::NumberOutOfRange)
    );
}

#[test]
fn error_messages() {
    assert_snapshot!(err("{\"a\" 1}"), @"syntax error: expected ':' at offset 5 (line 1, column 6), near `{\"a\" 1}`");
    assert_snapshot!(err("[1,"), @"truncated input: incomplete array at offset 3 (line 1, column 4), near `[1,`");
    assert_snapshot!(err(r#""\ud83d""#), @r#"encoding error: invalid surrogate at offset 1 (line 1, column 2), near `"\ud83d"`"#);

    let multiline = err("[1,\n 2,\n x]");
    assert_eq!((multiline.offset, multiline.line, multiline.column), (9, 3, 2));
    assert_eq!(
        multiline.kind,
        ParseErrorKind::Syntax(SyntaxError::UnexpectedCharacter('x'))
    );
}

#[test]
fn duplicate_keys_keep_first_position_and_last_value() {
    let v = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    let map = v.as_object().unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(v["a"], Value::from(3));
}

#[test]
fn keys_keep_source_order() {
    let v = parse(r#"{"z":0,"a":1,"m":{"y":2,"b":3}}"#).unwrap();
    assert_eq!(v.as_object().unwrap().keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    assert_eq!(v["m"].as_object().unwrap().keys().collect::<Vec<_>>(), ["y", "b"]);
}

#[test]
fn depth_limit() {
    let options = ParserOptions {
        max_depth: 3,
        ..Default::default()
    };
    assert!(parse_with_options("[[[1]]]", options).is_ok());
    let e = parse_with_options("[[[[1]]]]", options).unwrap_err();
    assert_eq!(e.kind, ParseErrorKind::Syntax(SyntaxError::RecursionLimitExceeded));
    assert_eq!(e.offset, 4);

    let deep = "[".repeat(100_000);
    assert!(parse(&deep).unwrap_err().is_syntax());
}

#[test]
fn trailing_content() {
    assert!(parse(" {} \r\n\t").is_ok());
    assert_eq!(
        err("{} x").kind,
        ParseErrorKind::Syntax(SyntaxError::TrailingContent)
    );
    let lenient = ParserOptions {
        allow_trailing_content: true,
        ..Default::default()
    };
    assert_eq!(parse_with_options("1 2", lenient).unwrap(), Value::from(1));
}

#[test]
fn typed_entry_points_accept_null() {
    assert!(parse_object("null").unwrap().is_empty());
    assert!(parse_array(" null ").unwrap().is_empty());
    assert_eq!(parse_object(r#"{"k":[]}"#).unwrap().len(), 1);
    assert_eq!(parse_array("[1,2]").unwrap().len(), 2);
    assert_eq!(
        parse_object("[]").unwrap_err().kind,
        ParseErrorKind::Syntax(SyntaxError::ExpectedObject)
    );
    assert_eq!(
        parse_array("{}").unwrap_err().kind,
        ParseErrorKind::Syntax(SyntaxError::ExpectedArray)
    );
    assert!(parse_array("nul").unwrap_err().is_truncation());
}

#[test]
fn classification_table() {
    assert_eq!(CLASSES[usize::from(b'{')], Class::Object);
    assert_eq!(CLASSES[usize::from(b'7')], Class::Number);
    assert_eq!(CLASSES[usize::from(b'f')], Class::Boolean);
    assert_eq!(CLASSES[usize::from(b' ')], Class::Invalid);
    assert_eq!(CLASSES.iter().filter(|c| **c != Class::Invalid).count(), 17);
}

#[test_log::test]
fn parse_accepts_bytes_and_text() {
    let from_bytes = Value::try_from(&b"[true]"[..]).unwrap();
    let from_text: Value = "[true]".parse().unwrap();
    assert_eq!(from_bytes, from_text);
}
