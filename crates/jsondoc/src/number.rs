//! JSON numbers.
//!
//! A [`Number`] keeps the representation chosen when it was read: literals
//! without a fraction or exponent become integers (32-bit when they fit,
//! 64-bit otherwise), everything else becomes an `f64`. Integers are never
//! widened to floating point behind the caller's back.

use core::fmt;

use crate::error::NumberOutOfRange;

/// A JSON number, stored as the narrowest faithful representation.
///
/// Equality is numeric: `Number::F64(2.0) == Number::I32(2)`. The writer trims
/// the fractional part of integral floats, so this keeps `parse(write(v)) == v`
/// true for every value. Use [`Number::is_f64`] and friends to observe the
/// variant itself.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    /// A signed integer that fits in 32 bits.
    I32(i32),
    /// A signed integer that needs 64 bits.
    I64(i64),
    /// A floating point number.
    F64(f64),
}

impl Number {
    /// Picks `I32` when `value` fits, `I64` otherwise.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(v) => Self::I32(v),
            Err(_) => Self::I64(value),
        }
    }

    /// Returns `true` for the `I32` variant.
    #[must_use]
    pub fn is_i32(&self) -> bool {
        matches!(self, Self::I32(..))
    }

    /// Returns `true` for the `I64` variant.
    #[must_use]
    pub fn is_i64(&self) -> bool {
        matches!(self, Self::I64(..))
    }

    /// Returns `true` for the `F64` variant.
    #[must_use]
    pub fn is_f64(&self) -> bool {
        matches!(self, Self::F64(..))
    }

    /// Returns `true` for either integer variant.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.is_f64()
    }

    /// The integer payload; `None` for floats, which are never truncated.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I32(v) => Some(i64::from(v)),
            Self::I64(v) => Some(v),
            Self::F64(_) => None,
        }
    }

    /// The integer payload when it fits in 32 bits.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    /// The value as `f64`. Integers are converted, which may round `I64`
    /// payloads above 2^53.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::I32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::F64(v) => v,
        }
    }
}

/// `true` when `f` has no fractional part and equals `i` exactly.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn float_eq_int(f: f64, i: i64) -> bool {
    // 2^63 as f64; the upper bound is exclusive.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    f.is_finite() && f.trunc() == f && (-BOUND..BOUND).contains(&f) && f as i64 == i
}

impl PartialEq for Number {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::F64(f), int) | (int, Self::F64(f)) => {
                int.as_i64().is_some_and(|i| float_eq_int(f, i))
            }
            (a, b) => a.as_i64() == b.as_i64(),
        }
    }
}

macro_rules! impl_from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::I32(i32::from(v))
                }
            }
        )*
    };
}

impl_from_small_int!(i8, i16, i32, u8, u16);

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Self::from_i64(i64::from(v))
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::from_i64(v)
    }
}

impl From<isize> for Number {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn from(v: isize) -> Self {
        // isize is at most 64 bits wide on every supported target.
        Self::from_i64(v as i64)
    }
}

impl TryFrom<u64> for Number {
    type Error = NumberOutOfRange;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        i64::try_from(v)
            .map(Self::from_i64)
            .map_err(|_| NumberOutOfRange(v))
    }
}

impl TryFrom<usize> for Number {
    type Error = NumberOutOfRange;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        // usize is at most 64 bits wide on every supported target.
        Self::try_from(v as u64)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::F64(f64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::writer::write_number(f, *self)
    }
}
