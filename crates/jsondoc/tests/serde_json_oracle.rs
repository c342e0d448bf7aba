#![allow(missing_docs)]

//! Cross-checks reader and writer against `serde_json`.

mod common;

use jsondoc::{Value, parse};
use rstest::rstest;

fn to_serde(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Unknown => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        // Our number text must be something serde_json accepts.
        Value::Number(n) => serde_json::from_str(&n.to_string()).unwrap(),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => items.iter().map(to_serde).collect(),
        Value::Object(map) => serde_json::Value::Object(
            map.iter().map(|(k, v)| (k.clone(), to_serde(v))).collect(),
        ),
    }
}

#[rstest]
#[case(common::DOCUMENT)]
#[case("[]")]
#[case("{}")]
#[case(r#"{"k":"\u0000\u001f\ud834\udd1e"}"#)]
#[case("[1e308,-1e-308,123456789.125,9007199254740993]")]
#[case(r#"[[[[{"deep":[{"er":null}]}]]]]"#)]
fn writer_output_is_valid_json(#[case] input: &str) {
    let doc = parse(input).unwrap();
    let written = doc.write();
    let oracle: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(oracle, to_serde(&doc), "{written}");
}

#[rstest]
#[case(common::DOCUMENT)]
#[case(r#"{"b":1,"a":2,"c":{"z":1,"y":2}}"#)]
fn key_order_matches_serde_json_preserve_order(#[case] input: &str) {
    let ours = parse(input).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
    assert_eq!(
        ours.as_object().unwrap().keys().collect::<Vec<_>>(),
        theirs.as_object().unwrap().keys().collect::<Vec<_>>()
    );
}

#[rstest]
#[case("[1,]")]
#[case("{\"a\":1,}")]
#[case("01")]
#[case("1.")]
#[case("\"\\ud800\"")]
#[case("[1] 2")]
#[case("tru")]
#[case("\"\\q\"")]
fn both_reject_malformed_input(#[case] input: &str) {
    assert!(parse(input).is_err(), "{input}");
    assert!(serde_json::from_str::<serde_json::Value>(input).is_err(), "{input}");
}
