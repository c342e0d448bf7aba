use super::{
    Parser,
    error::{Incomplete, ParseError, SyntaxError},
};
use crate::number::Number;

#[inline]
fn is_number_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E')
}

/// Checks `lit` against the RFC 8259 number grammar:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_valid_literal(lit: &[u8]) -> bool {
    fn digits(lit: &[u8], mut i: usize) -> usize {
        while lit.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    }

    let mut i = usize::from(lit.first() == Some(&b'-'));
    match lit.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits(lit, i + 1),
        _ => return false,
    }
    if lit.get(i) == Some(&b'.') {
        let end = digits(lit, i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }
    if matches!(lit.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(lit.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let end = digits(lit, i);
        if end == i {
            return false;
        }
        i = end;
    }
    i == lit.len()
}

impl Parser<'_> {
    /// Reads a number literal. A `.`, `e` or `E` anywhere in the literal makes
    /// it a float; otherwise it is an integer, 32-bit when it fits.
    pub(super) fn read_number(&mut self) -> Result<Number, ParseError> {
        let start = self.cursor.position();
        let lit = self.cursor.take_while(is_number_byte);
        if !is_valid_literal(lit) {
            // A literal that stops at the end of input wanting more digits.
            if self.cursor.is_at_end()
                && matches!(lit.last(), Some(b'-' | b'+' | b'.' | b'e' | b'E'))
            {
                return Err(self.error_here(Incomplete::Number));
            }
            return Err(self.error_at(start, SyntaxError::InvalidNumber));
        }
        // The grammar check above guarantees ASCII.
        let text: String = lit.iter().copied().map(char::from).collect();
        let is_float = lit.iter().any(|b| matches!(b, b'.' | b'e' | b'E'));

        if is_float {
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Number::F64(v)),
                _ => Err(self.error_at(start, SyntaxError::NumberOutOfRange)),
            }
        } else {
            text.parse::<i64>()
                .map(Number::from_i64)
                .map_err(|_| self.error_at(start, SyntaxError::NumberOutOfRange))
        }
    }
}
