//! Numeric decoding for tokens.
//!
//! Integer conversion runs a fast path over plain `-?[0-9]+` spans with
//! checked arithmetic, accumulating negative values by subtraction so the
//! minimum representable value is reachable without negation. Spans
//! containing `.`, `e`, or `E` fall back to a 64-bit float parse and map
//! into one of three buckets: exactly representable integers (no
//! diagnostic), integral values beyond the exact-integer envelope of a
//! double (clamped, out of range), and true non-integers (rounded,
//! not-an-integer). Every failure is recorded as a diagnostic on the
//! owning parser rather than an error token.

use core::fmt;

use crate::token::{Kind, Token};

/// A diagnostic recorded by the numeric conversions on [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A non-integer numeric value was decoded as an integer.
    NotAnInteger,
    /// The numeric value does not fit in the requested type.
    OutOfRange,
}

impl DecodeError {
    /// True iff the diagnostic results from an attempt to parse a
    /// non-integer numeric value as an integer.
    #[must_use]
    pub fn is_not_an_integer(self) -> bool {
        self == DecodeError::NotAnInteger
    }

    /// True iff the diagnostic results from an attempt to parse a
    /// numeric value that is out of range.
    #[must_use]
    pub fn is_out_of_range(self) -> bool {
        self == DecodeError::OutOfRange
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecodeError::NotAnInteger => "not an integer",
            DecodeError::OutOfRange => "out of range",
        })
    }
}

impl core::error::Error for DecodeError {}

/// Largest integer x such that every integer y with |y| <= x is exactly
/// representable as an f64 (2^53; symmetric, floats have no two's
/// complement asymmetry).
const F64_EXACT_INT_MAX: f64 = 9_007_199_254_740_992.0;

/// Smallest f64 at or above 2^63 / largest at or below -2^63. Values past
/// these bounds clamp to the i64 extremes.
const I64_BOUND: f64 = 9.223372036854776e18;

/// Every f64 at or beyond 2^52 in magnitude is an integer.
const F64_INTEGRAL_MIN: f64 = 4_503_599_627_370_496.0;

fn is_integral(f: f64) -> bool {
    if !f.is_finite() {
        return false;
    }
    if f >= F64_INTEGRAL_MIN || f <= -F64_INTEGRAL_MIN {
        return true;
    }
    // Exact for |f| < 2^52: truncation round-trips iff f is integral.
    // (f64::floor is not available without std.)
    (f as i64) as f64 == f
}

/// Rounds half away from zero. Only meaningful for finite values below
/// the 2^52 integral threshold, which covers every non-integral f64.
fn round_half_away(f: f64) -> f64 {
    let t = (f as i64) as f64;
    let diff = f - t;
    if diff >= 0.5 {
        t + 1.0
    } else if diff <= -0.5 {
        t - 1.0
    } else {
        t
    }
}

enum Fast {
    Value(i64),
    Overflow(i64),
    /// The span is not `-?[0-9]+`; use the float slow path.
    Float,
}

fn fast_decimal(bytes: &[u8]) -> Fast {
    let (negative, digits) = match bytes.split_first() {
        Some((&b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };
    let mut total: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Fast::Float;
        }
        let d = i64::from(b - b'0');
        let next = total.checked_mul(10).and_then(|t| {
            if negative {
                t.checked_sub(d)
            } else {
                t.checked_add(d)
            }
        });
        total = match next {
            Some(t) => t,
            None => return Fast::Overflow(if negative { i64::MIN } else { i64::MAX }),
        };
    }
    Fast::Value(total)
}

fn parse_f64(token: &Token<'_>) -> Option<f64> {
    core::str::from_utf8(&token.value)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
}

fn assert_numeric(token: &Token<'_>, what: &str) {
    assert!(
        matches!(token.kind, Kind::Number | Kind::LeadingZerosNotPermitted),
        "jsonlex: {what} called on non-numeric token"
    );
}

pub(crate) fn token_as_i64(token: &Token<'_>) -> i64 {
    assert_numeric(token, "as_i64");
    match fast_decimal(&token.value) {
        Fast::Value(v) => v,
        Fast::Overflow(clamped) => {
            token.note_decode_error(DecodeError::OutOfRange);
            clamped
        }
        Fast::Float => slow_path_i64(token),
    }
}

fn slow_path_i64(token: &Token<'_>) -> i64 {
    let Some(f) = parse_f64(token) else {
        token.note_decode_error(DecodeError::OutOfRange);
        return 0;
    };
    if f.is_infinite() {
        // The span overflowed the double's range; the syntax itself is
        // known to be valid.
        token.note_decode_error(DecodeError::OutOfRange);
        return if f > 0.0 { i64::MAX } else { i64::MIN };
    }
    if is_integral(f) {
        if (-F64_EXACT_INT_MAX..=F64_EXACT_INT_MAX).contains(&f) {
            return f as i64;
        }
        // Beyond the exact-integer envelope the parsed value may not
        // equal the written value, so clamp conservatively.
        token.note_decode_error(DecodeError::OutOfRange);
        if f >= I64_BOUND {
            return i64::MAX;
        }
        if f < -I64_BOUND {
            return i64::MIN;
        }
        return f as i64;
    }
    let rounded = round_half_away(f);
    if rounded >= I64_BOUND {
        token.note_decode_error(DecodeError::OutOfRange);
        return i64::MAX;
    }
    if rounded < -I64_BOUND {
        token.note_decode_error(DecodeError::OutOfRange);
        return i64::MIN;
    }
    token.note_decode_error(DecodeError::NotAnInteger);
    rounded as i64
}

pub(crate) fn token_as_i32(token: &Token<'_>) -> i32 {
    assert_numeric(token, "as_i32");
    match fast_decimal(&token.value) {
        Fast::Value(v) => {
            if v > i64::from(i32::MAX) {
                token.note_decode_error(DecodeError::OutOfRange);
                i32::MAX
            } else if v < i64::from(i32::MIN) {
                token.note_decode_error(DecodeError::OutOfRange);
                i32::MIN
            } else {
                v as i32
            }
        }
        Fast::Overflow(clamped) => {
            token.note_decode_error(DecodeError::OutOfRange);
            if clamped < 0 {
                i32::MIN
            } else {
                i32::MAX
            }
        }
        Fast::Float => slow_path_i32(token),
    }
}

fn slow_path_i32(token: &Token<'_>) -> i32 {
    let Some(f) = parse_f64(token) else {
        token.note_decode_error(DecodeError::OutOfRange);
        return 0;
    };
    if f.is_infinite() {
        token.note_decode_error(DecodeError::OutOfRange);
        return if f > 0.0 { i32::MAX } else { i32::MIN };
    }
    if is_integral(f) {
        if (-F64_EXACT_INT_MAX..=F64_EXACT_INT_MAX).contains(&f) {
            if f > f64::from(i32::MAX) {
                token.note_decode_error(DecodeError::OutOfRange);
                return i32::MAX;
            }
            if f < f64::from(i32::MIN) {
                token.note_decode_error(DecodeError::OutOfRange);
                return i32::MIN;
            }
            return f as i32;
        }
        // Integral but past 2^53: far outside the i32 range either way.
        token.note_decode_error(DecodeError::OutOfRange);
        return if f > 0.0 { i32::MAX } else { i32::MIN };
    }
    let rounded = round_half_away(f);
    if rounded > f64::from(i32::MAX) {
        token.note_decode_error(DecodeError::OutOfRange);
        return i32::MAX;
    }
    if rounded < f64::from(i32::MIN) {
        token.note_decode_error(DecodeError::OutOfRange);
        return i32::MIN;
    }
    token.note_decode_error(DecodeError::NotAnInteger);
    rounded as i32
}

pub(crate) fn token_as_f64(token: &Token<'_>) -> f64 {
    let parsed = core::str::from_utf8(&token.value)
        .ok()
        .and_then(|s| s.parse::<f64>().ok());
    match parsed {
        Some(f) => {
            if f.is_infinite() {
                token.note_decode_error(DecodeError::OutOfRange);
            }
            f
        }
        None => {
            token.note_decode_error(DecodeError::OutOfRange);
            0.0
        }
    }
}

pub(crate) fn token_as_f32(token: &Token<'_>) -> f32 {
    let parsed = core::str::from_utf8(&token.value)
        .ok()
        .and_then(|s| s.parse::<f32>().ok());
    match parsed {
        Some(f) => {
            if f.is_infinite() {
                token.note_decode_error(DecodeError::OutOfRange);
            }
            f
        }
        None => {
            token.note_decode_error(DecodeError::OutOfRange);
            0.0
        }
    }
}
