//! RFC 6901 JSON pointers.
//!
//! A pointer is a sequence of [`Segment`]s. Parsed pointer text always
//! produces [`Segment::Key`]s; whether a key addresses an object member or an
//! array element is decided during navigation. [`Segment::Index`] comes from
//! the [`pointer!`](crate::pointer!) macro and from code that builds pointers
//! by hand.
use core::{fmt, str::FromStr};

use percent_encoding::percent_decode_str;

use crate::error::PointerError;

/// One step of a [`JsonPointer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object member name, or a decimal array index written as text.
    Key(String),
    /// An array position.
    Index(usize),
}

impl Segment {
    /// Returns the index if this segment is an index, otherwise `None`.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if let Self::Index(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the key if this segment is a key, otherwise `None`.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        if let Self::Key(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

/// Renders the segment with `~` and `/` escaped, without the leading `/`.
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => f.write_str(itoa::Buffer::new().format(*i)),
            Self::Key(k) => {
                for c in k.chars() {
                    match c {
                        '~' => f.write_str("~0")?,
                        '/' => f.write_str("~1")?,
                        c => fmt::Write::write_char(f, c)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Self::Key(s.to_owned())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

#[doc(hidden)]
pub trait SegmentFrom<T> {
    fn from_segment(value: T) -> Segment;
}

// Negative integers cannot be positions; they become their decimal text.
macro_rules! impl_integer_as_segment {
    ($($t:ty),+) => {
        $(
            impl SegmentFrom<$t> for Segment {
                fn from_segment(value: $t) -> Self {
                    usize::try_from(value)
                        .map_or_else(|_| Segment::Key(value.to_string()), Segment::Index)
                }
            }
        )+
    };
}
impl_integer_as_segment!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl SegmentFrom<&str> for Segment {
    fn from_segment(value: &str) -> Self {
        Segment::Key(value.to_owned())
    }
}

impl SegmentFrom<String> for Segment {
    fn from_segment(value: String) -> Self {
        Segment::Key(value)
    }
}

impl SegmentFrom<&String> for Segment {
    fn from_segment(value: &String) -> Self {
        Segment::Key(value.clone())
    }
}

/// A parsed JSON pointer.
///
/// # Examples
///
/// ```
/// use jsondoc::{JsonPointer, Segment};
///
/// let p = JsonPointer::parse("/a~1b/0").unwrap();
/// assert_eq!(p.segments(), [Segment::from("a/b"), Segment::from("0")]);
/// assert_eq!(p.to_string(), "/a~1b/0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    segments: Vec<Segment>,
}

impl JsonPointer {
    /// The pointer to the whole document.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parses pointer text.
    ///
    /// The empty string and `/` both address the root. A leading `#` marks a
    /// URI fragment, which is percent-decoded before the usual rules apply.
    /// Each segment is unescaped `~1` to `/` first, then `~0` to `~`.
    ///
    /// # Errors
    ///
    /// [`PointerError::MissingLeadingSlash`] if non-empty text does not
    /// start with `/`, and [`PointerError::InvalidEncoding`] if a fragment
    /// decodes to invalid UTF-8.
    pub fn parse(text: &str) -> Result<Self, PointerError> {
        let decoded;
        let body = match text.strip_prefix('#') {
            Some(fragment) => {
                decoded = percent_decode_str(fragment)
                    .decode_utf8()
                    .map_err(|_| PointerError::InvalidEncoding(text.to_owned()))?;
                &*decoded
            }
            None => text,
        };
        if body.is_empty() || body == "/" {
            return Ok(Self::root());
        }
        let Some(rest) = body.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash(text.to_owned()));
        };
        let segments = rest.split('/').map(|s| Segment::Key(unescape(s))).collect();
        Ok(Self { segments })
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if the pointer has no segments.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

fn unescape(segment: &str) -> String {
    if segment.contains('~') {
        segment.replace("~1", "/").replace("~0", "~")
    } else {
        segment.to_owned()
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a JsonPointer {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for JsonPointer {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl FromIterator<Segment> for JsonPointer {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}
