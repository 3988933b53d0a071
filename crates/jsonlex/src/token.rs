//! Token kinds and the token record produced by the tokenizer.
//!
//! `Kind` enumerates everything the iterator can yield, with parse errors
//! occupying a tagged region of the same enumeration so that error checks
//! stay in-band and cheap. `Token` carries the byte span, 1-based line and
//! column of its first byte, an optional object key, and a kind-specific
//! payload that aliases the input wherever possible.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use crate::number;
use crate::parser::SharedLog;

/// Bit reserved on `Kind` discriminants to mark the error region.
const ERROR_BIT: u32 = 1 << 29;

/// The kind of a JSON token.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A `{` token.
    ObjectStart = 0,
    /// A `}` token.
    ObjectEnd,
    /// A `[` token.
    ArrayStart,
    /// A `]` token.
    ArrayEnd,
    /// A string.
    String,
    /// A number.
    Number,
    /// A `true` boolean value.
    True,
    /// A `false` boolean value.
    False,
    /// A `null` value.
    Null,
    /// A `//` or `/* */` comment. To distinguish the two, look at the
    /// second byte of the token's value.
    Comment,
    /// Additional input followed the first top-level value.
    TrailingInput = ERROR_BIT,
    /// An unexpected end of input was encountered.
    UnexpectedEof,
    /// An unexpected token was encountered.
    UnexpectedToken,
    /// A trailing comma in an object or array (not permitted by the JSON
    /// standard).
    TrailingComma,
    /// A comma in an unexpected position (immediately following `[`, `{`,
    /// or another comma).
    UnexpectedComma,
    /// An unexpected character was encountered while tokenizing the input.
    UnexpectedCharacter,
    /// A numeric literal has leading zeros (not permitted by the JSON
    /// standard). Tokens of this kind still carry the full numeric span
    /// and may be treated as `Number` tokens by callers that wish to be
    /// liberal in what they accept.
    LeadingZerosNotPermitted,
    /// A decimal point was not followed by a digit.
    ExpectedDigitAfterDecimalPoint,
    /// The `e` (or `E`) in a number was not followed by a digit.
    ExpectedDigitFollowingEInNumber,
    /// A bad `\uXXXX` escape sequence was encountered in a string.
    BadUnicodeEscape,
    /// A control character not permitted by the JSON standard was found
    /// inside a string.
    IllegalControlCharInsideString,
    /// UTF-8 decoding failed inside a string.
    Utf8DecodingErrorInsideString,
}

impl Kind {
    /// Returns true for the error kinds and false for all others.
    #[must_use]
    pub const fn is_error(self) -> bool {
        self as u32 & ERROR_BIT != 0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::ObjectStart => "ObjectStart",
            Kind::ObjectEnd => "ObjectEnd",
            Kind::ArrayStart => "ArrayStart",
            Kind::ArrayEnd => "ArrayEnd",
            Kind::String => "String",
            Kind::Number => "Number",
            Kind::True => "True",
            Kind::False => "False",
            Kind::Null => "Null",
            Kind::Comment => "Comment",
            _ => "Error",
        })
    }
}

/// A JSON token.
///
/// Value-bearing tokens reference the input buffer wherever possible: the
/// payload of numbers, comments, and escape-free strings is a borrowed
/// sub-slice, and only strings containing escapes allocate. The input must
/// therefore outlive every token produced from it.
///
/// # Examples
///
/// ```
/// use jsonlex::{Kind, Parser};
///
/// let parser = Parser::default();
/// let token = parser.tokenize(b"42").next().unwrap();
/// assert_eq!(token.kind, Kind::Number);
/// assert_eq!((token.line, token.col), (1, 1));
/// assert_eq!(&*token.value, b"42");
/// ```
#[derive(Clone)]
pub struct Token<'a> {
    /// Line number of the first byte of the token (1-based).
    pub line: usize,
    /// Column of the first byte of the token (1-based, counted in bytes).
    pub col: usize,
    /// Byte offset of the first byte of the token in the input.
    pub start: usize,
    /// Byte offset of the last byte of the token in the input (inclusive;
    /// equal to `start` for single-byte tokens).
    pub end: usize,
    /// The kind of the token.
    pub kind: Kind,
    /// The object key associated with the token. `None` for top-level
    /// values and array elements; object members always carry a key,
    /// which may be empty.
    pub key: Option<Cow<'a, [u8]>>,
    /// The kind-specific payload: decoded contents for strings, the raw
    /// textual span for numbers and comments, empty otherwise.
    pub value: Cow<'a, [u8]>,
    /// Error message, non-empty only when `kind.is_error()`.
    pub message: Cow<'static, str>,
    pub(crate) log: SharedLog,
}

/// An error token as recorded on the parser's error accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToken {
    /// The error kind.
    pub kind: Kind,
    /// Line of the error (1-based).
    pub line: usize,
    /// Column of the error (1-based).
    pub col: usize,
    /// Human-readable error message.
    pub message: Cow<'static, str>,
}

impl<'a> Token<'a> {
    /// Builds an error token, recording it on the owning parser's error
    /// accumulator as a side effect.
    pub(crate) fn error(
        kind: Kind,
        line: usize,
        col: usize,
        message: Cow<'static, str>,
        log: &SharedLog,
    ) -> Self {
        log.borrow_mut().errors.push(ErrorToken {
            kind,
            line,
            col,
            message: message.clone(),
        });
        Token {
            line,
            col,
            start: 0,
            end: 0,
            kind,
            key: None,
            value: Cow::Borrowed(&[]),
            message,
            log: log.clone(),
        }
    }

    pub(crate) fn note_decode_error(&self, err: number::DecodeError) {
        self.log.borrow_mut().decode_errors.push(err);
    }

    /// Returns the token's value as a bool.
    ///
    /// # Panics
    ///
    /// Panics unless `kind` is [`Kind::True`] or [`Kind::False`].
    #[must_use]
    pub fn as_bool(&self) -> bool {
        match self.kind {
            Kind::True => true,
            Kind::False => false,
            _ => panic!("jsonlex: as_bool called on non-boolean token"),
        }
    }

    /// Returns the token's decoded string contents.
    ///
    /// # Panics
    ///
    /// Panics unless `kind` is [`Kind::String`].
    #[must_use]
    pub fn as_string(&self) -> Cow<'_, str> {
        assert!(
            self.kind == Kind::String,
            "jsonlex: as_string called on non-string token"
        );
        String::from_utf8_lossy(&self.value)
    }

    /// Returns the token's associated object key as a string.
    ///
    /// # Panics
    ///
    /// Panics if the token has no key. Object members always have one,
    /// possibly empty; top-level values and array elements have none.
    #[must_use]
    pub fn key_as_string(&self) -> Cow<'_, str> {
        match &self.key {
            Some(key) => String::from_utf8_lossy(key),
            None => panic!("jsonlex: key_as_string called on token with no key"),
        }
    }

    /// Returns the token's value as an `f64`.
    ///
    /// Defined only for numeric tokens. If the value overflows the range
    /// of an `f64`, an [out of range](crate::DecodeError::OutOfRange)
    /// decode diagnostic is recorded on the owning parser and ±infinity
    /// is returned.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        number::token_as_f64(self)
    }

    /// Returns the token's value as an `f32`; see [`Token::as_f64`].
    #[must_use]
    pub fn as_f32(&self) -> f32 {
        number::token_as_f32(self)
    }

    /// Returns the token's value as an `i64`.
    ///
    /// Defined only for tokens whose kind is [`Kind::Number`] or
    /// [`Kind::LeadingZerosNotPermitted`]. Non-integer and out-of-range
    /// values record a decode diagnostic on the owning parser and return
    /// the nearest representable value, so this may also be used to read
    /// floating point input as the closest integer. Integer values
    /// written with floating point syntax (for example `1.5e1`) decode
    /// without a diagnostic.
    ///
    /// # Panics
    ///
    /// Panics when called on a non-numeric token.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        number::token_as_i64(self)
    }

    /// Returns the token's value as an `i32`; see [`Token::as_i64`].
    ///
    /// # Panics
    ///
    /// Panics when called on a non-numeric token.
    #[must_use]
    pub fn as_i32(&self) -> i32 {
        number::token_as_i32(self)
    }

    /// Returns the token's value as an `isize`; see [`Token::as_i64`].
    ///
    /// # Panics
    ///
    /// Panics when called on a non-numeric token.
    #[must_use]
    pub fn as_int(&self) -> isize {
        #[cfg(target_pointer_width = "32")]
        {
            self.as_i32() as isize
        }
        #[cfg(not(target_pointer_width = "32"))]
        {
            self.as_i64() as isize
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("line", &self.line)
            .field("col", &self.col)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("kind", &self.kind)
            .field("key", &self.key)
            .field("value", &self.value)
            .field("message", &self.message)
            .finish()
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.col == other.col
            && self.start == other.start
            && self.end == other.end
            && self.kind == other.kind
            && self.key == other.key
            && self.value == other.value
            && self.message == other.message
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_error() {
            return write!(f, "{}:{} Error: {}", self.line, self.col, self.message);
        }
        write!(f, "{}:{} {} ", self.line, self.col, self.kind)?;
        if let Some(key) = &self.key {
            if !key.is_empty() {
                write!(f, "{}=", String::from_utf8_lossy(key))?;
            }
        }
        write!(f, "{}", String::from_utf8_lossy(&self.value))
    }
}
