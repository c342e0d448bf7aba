//! Compact JSON rendering for [`Value`] trees.
//!
//! Everything renders through [`core::fmt::Write`], so `Display` on values and
//! builders shares one code path.
use core::fmt::{self, Write};

use crate::{number::Number, value::Value};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Renders a document root. The [`Value::Unknown`] sentinel renders as nothing.
pub(crate) fn write_root<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    if value.is_unknown() {
        return Ok(());
    }
    write_value(out, value)
}

pub(crate) fn write_value<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        // Only reachable for trees assembled by hand; keep the output valid.
        Value::Null | Value::Unknown => out.write_str("null"),
        Value::Boolean(b) => out.write_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, *n),
        Value::String(s) => write_string(out, s),
        Value::Array(arr) => {
            out.write_char('[')?;
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_value(out, v)?;
            }
            out.write_char(']')
        }
        Value::Object(map) => {
            out.write_char('{')?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(out, k)?;
                out.write_char(':')?;
                write_value(out, v)?;
            }
            out.write_char('}')
        }
    }
}

/// Integers go through `itoa`. Floats use the shortest round-trip form and,
/// when it has no exponent, lose trailing fractional zeros and a bare
/// trailing point: `1.50` becomes `1.5` and `2.0` becomes `2`.
pub(crate) fn write_number<W: Write>(out: &mut W, n: Number) -> fmt::Result {
    match n {
        Number::I32(v) => out.write_str(itoa::Buffer::new().format(v)),
        Number::I64(v) => out.write_str(itoa::Buffer::new().format(v)),
        // JSON has no spelling for NaN or the infinities.
        Number::F64(v) if !v.is_finite() => out.write_str("null"),
        Number::F64(v) => {
            let text = format!("{v:?}");
            out.write_str(trim_fraction(&text))
        }
    }
}

fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') || text.contains(['e', 'E']) {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}

/// Writes `src` as a quoted JSON string literal.
pub(crate) fn write_string<W: Write>(out: &mut W, src: &str) -> fmt::Result {
    out.write_char('"')?;
    write_escaped_string(out, src)?;
    out.write_char('"')
}

/// Escapes quotes, backslashes and control characters (<= U+001F). U+2028 and
/// U+2029 are escaped too: JavaScript treats them as line terminators, so
/// leaving them raw breaks embedding the output in a script.
pub(crate) fn write_escaped_string<W: Write>(out: &mut W, src: &str) -> fmt::Result {
    let mut start = 0;
    for (i, c) in src.char_indices() {
        let escape: &str = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\u{8}' => "\\b",
            '\t' => "\\t",
            '\n' => "\\n",
            '\u{c}' => "\\f",
            '\r' => "\\r",
            '\u{2028}' => "\\u2028",
            '\u{2029}' => "\\u2029",
            c if (c as u32) < 0x20 => {
                out.write_str(&src[start..i])?;
                write_control_escape(out, c as u8)?;
                start = i + c.len_utf8();
                continue;
            }
            _ => continue,
        };
        out.write_str(&src[start..i])?;
        out.write_str(escape)?;
        start = i + c.len_utf8();
    }
    out.write_str(&src[start..])
}

fn write_control_escape<W: Write>(out: &mut W, byte: u8) -> fmt::Result {
    out.write_str("\\u00")?;
    out.write_char(char::from(HEX_DIGITS[usize::from(byte >> 4)]))?;
    out.write_char(char::from(HEX_DIGITS[usize::from(byte & 0xf)]))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{trim_fraction, write_escaped_string};
    use crate::{Number, Value};

    fn escaped(src: &str) -> String {
        let mut out = String::new();
        write_escaped_string(&mut out, src).unwrap();
        out
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("say \"hi\"", "say \\\"hi\\\"")]
    #[case("back\\slash", "back\\\\slash")]
    #[case("a\nb\tc\rd", "a\\nb\\tc\\rd")]
    #[case("\u{8}\u{c}", "\\b\\f")]
    #[case("\u{0}\u{1f}", "\\u0000\\u001f")]
    #[case("line\u{2028}para\u{2029}", "line\\u2028para\\u2029")]
    #[case("\u{7f}é😀", "\u{7f}é😀")]
    fn escapes(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(escaped(src), expected);
    }

    #[rstest]
    #[case("1.5", "1.5")]
    #[case("1.50000", "1.5")]
    #[case("2.0", "2")]
    #[case("100.0", "100")]
    #[case("1e-7", "1e-7")]
    #[case("1.0E10", "1.0E10")]
    #[case("10", "10")]
    fn fraction_trimming(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(trim_fraction(src), expected);
    }

    #[test]
    fn numbers_render_natively() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(-9_999_999_999_i64).to_string(), "-9999999999");
        assert_eq!(Value::from(0.1).to_string(), "0.1");
        assert_eq!(Value::from(42.0).to_string(), "42");
        assert_eq!(Value::from(-0.0).to_string(), "-0");
        assert_eq!(Value::from(1e300).to_string(), "1e300");
        assert_eq!(Value::Number(Number::F64(f64::NAN)).to_string(), "null");
    }

    #[test]
    fn unknown_renders_empty_at_root_and_null_inside() {
        assert_eq!(Value::Unknown.to_string(), "");
        assert_eq!(Value::Array(vec![Value::Unknown]).to_string(), "[null]");
    }
}
