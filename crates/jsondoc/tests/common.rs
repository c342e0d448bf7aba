#![allow(missing_docs)]
#![allow(dead_code)]

pub const DOCUMENT: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "a/b": 1,
    "m~n": 2,
    "": "empty key",
    "numbers": [0, -1, 2147483648, 1.5, 2.0, 1e-7, -0.0],
    "escapes": "tab\tnewline\nquote\"slash/back\\ line\u2028para\u2029 bell\u0007"
}
"#;

/// [`DOCUMENT`] rendered as compact JSON.
pub fn compact() -> String {
    jsondoc::parse(DOCUMENT).unwrap().write()
}
