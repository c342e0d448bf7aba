#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsondoc::{Builder, JsonPointer, ParserOptions, parse, parse_with_options};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // flag byte

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

// JSON whitespace, plus Unicode spaces the reader must reject.
static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        let mut prefix = HEADER;
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        let limit = max_size - prefix;
        prefix += append_value(&mut data[prefix..], size.max(8), limit);
        let limit = max_size - prefix;
        prefix += append_whitespace(&mut data[prefix..], limit);
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append up to eight whitespace code points to `buf` without exceeding
/// `limit`. Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n_codepoints = rng.random_range(0..=limit.min(8));
        let mut written = 0;
        for _ in 0..n_codepoints {
            // Mostly JSON whitespace.
            let w = if rng.random_range(0..16) == 0 {
                WS_TABLE[rng.random_range(4..WS_TABLE.len())]
            } else {
                WS_TABLE[rng.random_range(0..4)]
            };
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("serializing a serde_json value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(serde_json::Number::from(u.arbitrary::<i64>()?)),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn parser(data: &[u8]) {
    let Some((&flags, input)) = data.split_first() else {
        return;
    };
    let options = ParserOptions {
        allow_trailing_content: flags & 1 != 0,
        max_depth: usize::from(flags >> 1).max(1),
    };

    let Ok(doc) = parse_with_options(input, options) else {
        return;
    };

    // Whatever parses must write back to text that parses to the same tree.
    let text = doc.write();
    let reparsed = parse(&text).expect("writer output must parse");
    assert_eq!(reparsed, doc, "{text}");

    // Any pointer text resolves or fails cleanly.
    if let Ok(pointer) = JsonPointer::parse(&String::from_utf8_lossy(input)) {
        let _ = doc.at_pointer(&pointer);
    }

    if let Ok(builder) = Builder::from_value(doc.clone()) {
        assert_eq!(builder.to_json(), &doc);
    }
}

fuzz_target!(|data: &[u8]| parser(data));
