//! The parser handle and the structural token iterator.
//!
//! `Parser` carries the two extension flags plus the accumulators shared
//! with every token it produces: the error-token log and the ordered
//! decode-diagnostic list. `Tokens` is the structural layer over the
//! scanner: it enforces the JSON grammar with an explicit stack of
//! container frames, attaches object keys to member tokens, reports
//! structure-level errors in-band, and keeps going after every error so a
//! single malformed document can report several problems.

use alloc::borrow::Cow;
use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::number::DecodeError;
use crate::options::ParserOptions;
use crate::scanner::{raw_pos, Raw, Scanner, Sep};
use crate::token::{ErrorToken, Kind, Token};

pub(crate) type SharedLog = Rc<RefCell<ParserLog>>;

#[derive(Debug, Default)]
pub(crate) struct ParserLog {
    pub(crate) errors: Vec<ErrorToken>,
    pub(crate) decode_errors: Vec<DecodeError>,
}

/// A streaming JSON parser. It is valid when default constructed.
///
/// The parser is reusable: accumulated error tokens and decode
/// diagnostics grow monotonically across calls to [`Parser::tokenize`].
///
/// # Examples
///
/// ```
/// use jsonlex::{Kind, Parser};
///
/// let parser = Parser::default();
/// for token in parser.tokenize(br#"{"a": [1, true]}"#) {
///     assert!(!token.kind.is_error());
/// }
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    /// Set to true to allow `/* */` and `//` comments in the input.
    pub allow_comments: bool,
    /// Set to true to allow trailing commas in arrays and objects (does
    /// not allow initial commas or multiple commas).
    pub allow_trailing_commas: bool,
    log: SharedLog,
}

impl Parser {
    /// Creates a parser from [`ParserOptions`].
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Parser {
            allow_comments: options.allow_comments,
            allow_trailing_commas: options.allow_trailing_commas,
            log: SharedLog::default(),
        }
    }

    /// Returns a lazy token iterator over `input`.
    ///
    /// Exactly one top-level value is expected; anything after it yields a
    /// single [`Kind::TrailingInput`] error and ends the stream. Errors
    /// are in-band tokens and iteration continues past them (the grammar
    /// recovers locally), so a malformed document can report more than one
    /// problem. Tokens borrow from `input` wherever possible; `input`
    /// must outlive them.
    pub fn tokenize<'a>(&self, input: &'a [u8]) -> Tokens<'a> {
        Tokens {
            scanner: Scanner::new(input, self.log.clone()),
            queue: VecDeque::new(),
            stack: Vec::new(),
            root_seen: false,
            done: false,
            allow_comments: self.allow_comments,
            allow_trailing_commas: self.allow_trailing_commas,
            log: self.log.clone(),
        }
    }

    /// Returns a copy of the error tokens accumulated so far, in the
    /// order they were produced.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorToken> {
        self.log.borrow().errors.clone()
    }

    /// Returns the first decode diagnostic, if any. A decode diagnostic
    /// is recorded by invalid input to the numeric conversions on
    /// [`Token`](crate::Token).
    #[must_use]
    pub fn decode_error(&self) -> Option<DecodeError> {
        self.log.borrow().decode_errors.first().copied()
    }

    /// Returns the most recent decode diagnostic, if any.
    #[must_use]
    pub fn last_decode_error(&self) -> Option<DecodeError> {
        self.log.borrow().decode_errors.last().copied()
    }

    /// Returns all decode diagnostics in the order they occurred.
    #[must_use]
    pub fn decode_errors(&self) -> Vec<DecodeError> {
        self.log.borrow().decode_errors.clone()
    }

    /// Removes the last decode diagnostic if it satisfies `predicate`.
    ///
    /// Calling `pop_decode_error_if(DecodeError::is_out_of_range)`
    /// immediately after [`Token::as_i64`](crate::Token::as_i64) ignores
    /// out-of-range diagnostics from that conversion.
    pub fn pop_decode_error_if(&self, predicate: impl FnOnce(DecodeError) -> bool) {
        let mut log = self.log.borrow_mut();
        if let Some(&last) = log.decode_errors.last() {
            if predicate(last) {
                log.decode_errors.pop();
            }
        }
    }
}

#[derive(Debug)]
enum Frame<'a> {
    Array {
        expect_value: bool,
        after_comma: Option<Sep>,
    },
    Object {
        expect: ObjectExpect<'a>,
        after_comma: Option<Sep>,
    },
}

#[derive(Debug)]
enum ObjectExpect<'a> {
    KeyOrClose,
    Colon { key: Cow<'a, [u8]> },
    Value { key: Cow<'a, [u8]> },
    CommaOrClose,
}

fn is_value_kind(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::String
            | Kind::Number
            | Kind::True
            | Kind::False
            | Kind::Null
            | Kind::LeadingZerosNotPermitted
    )
}

/// Lazy token stream returned by [`Parser::tokenize`].
///
/// Dropping the iterator (or simply not calling `next` again) cancels
/// the parse silently; in particular, a consumer that stops on a
/// forwarded comment token never observes any structural error that
/// consuming the comment would have triggered.
pub struct Tokens<'a> {
    scanner: Scanner<'a>,
    queue: VecDeque<Token<'a>>,
    stack: Vec<Frame<'a>>,
    root_seen: bool,
    done: bool,
    allow_comments: bool,
    allow_trailing_commas: bool,
    log: SharedLog,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.done {
                return None;
            }
            self.step();
        }
    }
}

impl<'a> Tokens<'a> {
    fn push_error(&mut self, kind: Kind, line: usize, col: usize, message: &'static str) {
        self.queue
            .push_back(Token::error(kind, line, col, Cow::Borrowed(message), &self.log));
    }

    /// Pulls one scanner unit and advances the grammar. Comments are
    /// forwarded immediately when enabled, so a consumer halt between a
    /// comment and the following token leaves no trace.
    fn step(&mut self) {
        let raw = match self.scanner.next_raw() {
            Some(raw) => raw,
            None => {
                self.flush_eof();
                return;
            }
        };
        match raw {
            Raw::Tok(t) if t.kind == Kind::Comment && self.allow_comments => {
                self.queue.push_back(t);
            }
            raw => match self.stack.pop() {
                None => self.step_root(raw),
                Some(Frame::Array {
                    expect_value,
                    after_comma,
                }) => self.step_array(raw, expect_value, after_comma),
                Some(Frame::Object {
                    expect,
                    after_comma,
                }) => self.step_object(raw, expect, after_comma),
            },
        }
    }

    fn step_root(&mut self, raw: Raw<'a>) {
        if self.root_seen {
            let (line, col) = raw_pos(&raw);
            self.push_error(Kind::TrailingInput, line, col, "Trailing input");
            self.done = true;
            return;
        }
        self.root_seen = true;
        match raw {
            Raw::Tok(t) if t.kind == Kind::ObjectStart => {
                self.queue.push_back(t);
                self.stack.push(Frame::Object {
                    expect: ObjectExpect::KeyOrClose,
                    after_comma: None,
                });
            }
            Raw::Tok(t) if t.kind == Kind::ArrayStart => {
                self.queue.push_back(t);
                self.stack.push(Frame::Array {
                    expect_value: true,
                    after_comma: None,
                });
            }
            Raw::Tok(t) if matches!(t.kind, Kind::ObjectEnd | Kind::ArrayEnd) => {
                self.push_error(Kind::UnexpectedToken, t.line, t.col, "Unexpected token");
            }
            Raw::Colon(sep) | Raw::Comma(sep) => {
                self.push_error(Kind::UnexpectedToken, sep.line, sep.col, "Unexpected token");
            }
            Raw::Tok(t) => self.queue.push_back(t),
        }
    }

    fn step_array(&mut self, raw: Raw<'a>, expect_value: bool, after_comma: Option<Sep>) {
        if expect_value {
            match raw {
                Raw::Tok(t) if t.kind == Kind::ArrayEnd => {
                    if let Some(sep) = after_comma {
                        if !self.allow_trailing_commas {
                            self.push_error(Kind::TrailingComma, sep.line, sep.col, "Trailing ','");
                        }
                    }
                    self.queue.push_back(t);
                }
                Raw::Tok(t) if t.kind == Kind::ArrayStart => {
                    self.stack.push(Frame::Array {
                        expect_value: false,
                        after_comma,
                    });
                    self.queue.push_back(t);
                    self.stack.push(Frame::Array {
                        expect_value: true,
                        after_comma: None,
                    });
                }
                Raw::Tok(t) if t.kind == Kind::ObjectStart => {
                    self.stack.push(Frame::Array {
                        expect_value: false,
                        after_comma,
                    });
                    self.queue.push_back(t);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::KeyOrClose,
                        after_comma: None,
                    });
                }
                Raw::Tok(t) if is_value_kind(t.kind) => {
                    self.stack.push(Frame::Array {
                        expect_value: false,
                        after_comma,
                    });
                    self.queue.push_back(t);
                }
                Raw::Comma(sep) => {
                    self.stack.push(Frame::Array {
                        expect_value: true,
                        after_comma: Some(sep),
                    });
                    self.push_error(
                        Kind::UnexpectedComma,
                        sep.line,
                        sep.col,
                        "Unexpected ',' inside array",
                    );
                }
                raw => {
                    let (line, col) = raw_pos(&raw);
                    self.stack.push(Frame::Array {
                        expect_value: false,
                        after_comma,
                    });
                    self.push_error(
                        Kind::UnexpectedToken,
                        line,
                        col,
                        "Unexpected token inside array",
                    );
                }
            }
        } else {
            match raw {
                Raw::Tok(t) if t.kind == Kind::ArrayEnd => {
                    self.queue.push_back(t);
                }
                Raw::Comma(sep) => {
                    self.stack.push(Frame::Array {
                        expect_value: true,
                        after_comma: Some(sep),
                    });
                }
                raw => {
                    let (line, col) = raw_pos(&raw);
                    self.stack.push(Frame::Array {
                        expect_value: true,
                        after_comma: Some(Sep { line, col }),
                    });
                    self.push_error(
                        Kind::UnexpectedToken,
                        line,
                        col,
                        "Unexpected token inside array (expecting ',')",
                    );
                }
            }
        }
    }

    fn step_object(&mut self, raw: Raw<'a>, expect: ObjectExpect<'a>, after_comma: Option<Sep>) {
        match expect {
            ObjectExpect::KeyOrClose => match raw {
                Raw::Tok(t) if t.kind == Kind::ObjectEnd => {
                    if let Some(sep) = after_comma {
                        if !self.allow_trailing_commas {
                            self.push_error(Kind::TrailingComma, sep.line, sep.col, "Trailing ','");
                        }
                    }
                    self.queue.push_back(t);
                }
                Raw::Tok(t) if t.kind == Kind::String => {
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::Colon { key: t.value },
                        after_comma,
                    });
                }
                // Error recovery: use an empty key and still attempt to
                // consume a colon and a value.
                Raw::Comma(sep) => {
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::Colon {
                            key: Cow::Borrowed(&[]),
                        },
                        after_comma,
                    });
                    self.push_error(
                        Kind::UnexpectedComma,
                        sep.line,
                        sep.col,
                        "Unexpected ',' inside object (expecting key)",
                    );
                }
                raw => {
                    let (line, col) = raw_pos(&raw);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::Colon {
                            key: Cow::Borrowed(&[]),
                        },
                        after_comma,
                    });
                    self.push_error(
                        Kind::UnexpectedToken,
                        line,
                        col,
                        "Unexpected token inside object (expecting key)",
                    );
                }
            },
            ObjectExpect::Colon { key } => match raw {
                Raw::Colon(_) => {
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::Value { key },
                        after_comma,
                    });
                }
                raw => {
                    let (line, col) = raw_pos(&raw);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::Value { key },
                        after_comma,
                    });
                    self.push_error(
                        Kind::UnexpectedToken,
                        line,
                        col,
                        "Unexpected token inside object (expecting ':')",
                    );
                }
            },
            ObjectExpect::Value { key } => match raw {
                Raw::Tok(mut t) if t.kind == Kind::ArrayStart => {
                    t.key = Some(key);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::CommaOrClose,
                        after_comma,
                    });
                    self.queue.push_back(t);
                    self.stack.push(Frame::Array {
                        expect_value: true,
                        after_comma: None,
                    });
                }
                Raw::Tok(mut t) if t.kind == Kind::ObjectStart => {
                    t.key = Some(key);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::CommaOrClose,
                        after_comma,
                    });
                    self.queue.push_back(t);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::KeyOrClose,
                        after_comma: None,
                    });
                }
                Raw::Tok(mut t) if is_value_kind(t.kind) => {
                    t.key = Some(key);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::CommaOrClose,
                        after_comma,
                    });
                    self.queue.push_back(t);
                }
                raw => {
                    let (line, col) = raw_pos(&raw);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::CommaOrClose,
                        after_comma,
                    });
                    self.push_error(
                        Kind::UnexpectedToken,
                        line,
                        col,
                        "Unexpected token inside object",
                    );
                }
            },
            ObjectExpect::CommaOrClose => match raw {
                Raw::Tok(t) if t.kind == Kind::ObjectEnd => {
                    self.queue.push_back(t);
                }
                Raw::Comma(sep) => {
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::KeyOrClose,
                        after_comma: Some(sep),
                    });
                }
                raw => {
                    let (line, col) = raw_pos(&raw);
                    self.stack.push(Frame::Object {
                        expect: ObjectExpect::KeyOrClose,
                        after_comma: Some(Sep { line, col }),
                    });
                    self.push_error(Kind::UnexpectedToken, line, col, "Unexpected token");
                }
            },
        }
    }

    /// Scanner exhaustion: clean at the top level, an in-band EOF error
    /// inside any open container. Only the innermost frame reports; the
    /// rest unwind silently.
    fn flush_eof(&mut self) {
        let (line, col) = self.scanner.eof_pos();
        match self.stack.pop() {
            None => {}
            Some(Frame::Array {
                expect_value: true, ..
            }) => {
                self.push_error(
                    Kind::UnexpectedEof,
                    line,
                    col,
                    "Unexpected EOF (expected closing ']')",
                );
            }
            Some(Frame::Array {
                expect_value: false,
                ..
            }) => {
                self.push_error(Kind::UnexpectedEof, line, col, "Unexpected EOF inside array");
            }
            Some(Frame::Object { expect, .. }) => match expect {
                ObjectExpect::KeyOrClose => {
                    self.push_error(
                        Kind::UnexpectedEof,
                        line,
                        col,
                        "Unexpected EOF (expected closing '}')",
                    );
                }
                ObjectExpect::Colon { .. } => {
                    self.push_error(
                        Kind::UnexpectedToken,
                        line,
                        col,
                        "Unexpected token inside object (expecting ':')",
                    );
                    self.push_error(Kind::UnexpectedEof, line, col, "Unexpected EOF");
                }
                ObjectExpect::Value { .. } | ObjectExpect::CommaOrClose => {
                    self.push_error(Kind::UnexpectedEof, line, col, "Unexpected EOF");
                }
            },
        }
        self.stack.clear();
        self.done = true;
    }
}
