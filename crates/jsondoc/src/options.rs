/// Configuration options for the JSON reader.
///
/// # Examples
///
/// ```rust
/// use jsondoc::{ParserOptions, parse_with_options};
///
/// let options = ParserOptions {
///     allow_trailing_content: true,
///     ..Default::default()
/// };
/// let value = parse_with_options(b"[1] trailing", options).unwrap();
/// assert_eq!(value.to_string(), "[1]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting depth of arrays and objects.
    ///
    /// Input nested deeper than this fails with a "recursion limit exceeded"
    /// syntax error instead of exhausting the stack.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    /// Whether bytes may follow the first complete value.
    ///
    /// When `false`, only whitespace (space, tab, CR, LF) may follow the root
    /// value. When `true`, parsing stops after the root value and anything
    /// after it is ignored.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_content: bool,
}

impl ParserOptions {
    /// Nesting limit used by [`ParserOptions::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            allow_trailing_content: false,
        }
    }
}
