//! String decoding.
//!
//! Runs of plain ASCII are copied in bulk. The first backslash or high-bit
//! byte drops into per-sequence decoding: escapes (including `\uXXXX` with
//! surrogate pairing) and hand-assembled multi-byte UTF-8.

use super::{
    Parser,
    error::{EncodingError, Incomplete, ParseError, SyntaxError},
};

/// Bytes that can be copied verbatim: ASCII other than `"` and `\`.
#[inline]
fn is_plain(b: u8) -> bool {
    b < 0x80 && b != b'"' && b != b'\\'
}

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(b: u8) -> Option<u16> {
    match b {
        b'0'..=b'9' => Some(u16::from(b - b'0')),
        b'a'..=b'f' => Some(u16::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u16::from(b - b'A') + 10),
        _ => None,
    }
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

impl Parser<'_> {
    /// Reads a string whose opening quote has already been consumed.
    pub(super) fn read_string_body(&mut self) -> Result<String, ParseError> {
        let run = self.cursor.take_while(is_plain);
        let mut out = ascii_to_string(run);
        loop {
            let offset = self.cursor.position();
            let Some(b) = self.cursor.next_byte() else {
                return Err(self.error_at(offset, Incomplete::String));
            };
            match b {
                b'"' => return Ok(out),
                b'\\' => out.push(self.read_escape(offset)?),
                _ => out.push(self.read_utf8_sequence(offset, b)?),
            }
            out.push_str(&ascii_to_string(self.cursor.take_while(is_plain)));
        }
    }

    /// Decodes the escape whose backslash sits at `start`.
    fn read_escape(&mut self, start: usize) -> Result<char, ParseError> {
        let Some(e) = self.cursor.next_byte() else {
            return Err(self.error_here(Incomplete::String));
        };
        let c = match e {
            b'b' => '\u{8}',
            b't' => '\t',
            b'n' => '\n',
            b'f' => '\u{c}',
            b'r' => '\r',
            b'"' => '"',
            b'/' => '/',
            b'\\' => '\\',
            b'u' => return self.read_unicode_escape(start),
            other => {
                return Err(self.error_at(start + 1, SyntaxError::InvalidEscape(char::from(other))));
            }
        };
        Ok(c)
    }

    /// Decodes `\uXXXX`, pairing a high surrogate with the low surrogate
    /// escape that must immediately follow it.
    fn read_unicode_escape(&mut self, start: usize) -> Result<char, ParseError> {
        let unit = self.read_hex4()?;
        if is_low_surrogate(unit) {
            return Err(self.error_at(start, EncodingError::InvalidSurrogate));
        }
        if !is_high_surrogate(unit) {
            return char::from_u32(u32::from(unit))
                .ok_or_else(|| self.error_at(start, EncodingError::InvalidUnicodeCharacter));
        }

        match (self.cursor.peek(), self.cursor.peek_at(1)) {
            (Some(b'\\'), Some(b'u')) => {
                self.cursor.advance();
                self.cursor.advance();
            }
            (None, _) | (Some(b'\\'), None) => return Err(self.error_here(Incomplete::String)),
            _ => return Err(self.error_at(start, EncodingError::InvalidSurrogate)),
        }
        let low = self.read_hex4()?;
        if !is_low_surrogate(low) {
            return Err(self.error_at(start, EncodingError::InvalidSurrogate));
        }
        let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.error_at(start, EncodingError::InvalidUnicodeCharacter))
    }

    fn read_hex4(&mut self) -> Result<u16, ParseError> {
        let start = self.cursor.position();
        let Some(digits) = self.cursor.take(4) else {
            let end = start + self.cursor.remaining();
            return Err(self.error_at(end, Incomplete::String));
        };
        let mut unit = 0u16;
        for (i, &d) in digits.iter().enumerate() {
            let Some(v) = hex_val(d) else {
                return Err(self.error_at(start + i, EncodingError::InvalidHexDigit(char::from(d))));
            };
            unit = (unit << 4) | v;
        }
        Ok(unit)
    }

    /// Assembles the 2, 3 or 4 byte UTF-8 sequence led by `lead` at `start`.
    /// Overlong forms, encoded surrogates and code points past U+10FFFF are
    /// rejected.
    fn read_utf8_sequence(&mut self, start: usize, lead: u8) -> Result<char, ParseError> {
        let (len, init, min) = match lead {
            0xC2..=0xDF => (2, lead & 0x1F, 0x80),
            0xE0..=0xEF => (3, lead & 0x0F, 0x800),
            0xF0..=0xF4 => (4, lead & 0x07, 0x1_0000),
            _ => return Err(self.error_at(start, EncodingError::InvalidUnicodeCharacter)),
        };
        let mut code = u32::from(init);
        for _ in 1..len {
            let Some(b) = self.cursor.next_byte() else {
                return Err(self.error_here(Incomplete::String));
            };
            if b & 0xC0 != 0x80 {
                return Err(self.error_at(start, EncodingError::InvalidUnicodeCharacter));
            }
            code = (code << 6) | u32::from(b & 0x3F);
        }
        if code < min {
            return Err(self.error_at(start, EncodingError::InvalidUnicodeCharacter));
        }
        // Rejects encoded surrogates and anything past U+10FFFF.
        char::from_u32(code).ok_or_else(|| self.error_at(start, EncodingError::InvalidUnicodeCharacter))
    }
}

fn ascii_to_string(run: &[u8]) -> String {
    run.iter().copied().map(char::from).collect()
}
