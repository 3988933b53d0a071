//! A streaming JSON tokenizer that reports line and column information
//! for every token, with optional `/* */` and `//` comment and
//! trailing-comma extensions.
//!
//! Consumers iterate tokens lazily; no tree is built. Every token carries
//! its byte span, the 1-based line and column of its first byte, and (for
//! object members) the associated key. Errors are in-band tokens and the
//! iterator recovers after them, so one malformed document can report
//! several problems.
//!
//! # Examples
//!
//! ```
//! use jsonlex::{Kind, Parser};
//!
//! let parser = Parser::default();
//! let kinds: Vec<Kind> = parser.tokenize(b"[1, 2]").map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [Kind::ArrayStart, Kind::Number, Kind::Number, Kind::ArrayEnd]
//! );
//! ```
//!
//! Pair each token with its structural path using [`with_paths`]:
//!
//! ```
//! use jsonlex::{with_paths, Kind, Parser};
//!
//! let parser = Parser::default();
//! for twp in with_paths(parser.tokenize(br#"{"a": [10, 20]}"#)) {
//!     if twp.token.kind == Kind::Number {
//!         println!("{} = {}", twp.path, twp.token.as_i64());
//!     }
//! }
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod number;
mod options;
mod parser;
mod path;
mod scanner;
mod token;

pub use number::DecodeError;
pub use options::ParserOptions;
pub use parser::{Parser, Tokens};
pub use path::{with_paths, Path, PathComponent, TokenWithPath, WithPaths};
pub use token::{ErrorToken, Kind, Token};

#[cfg(test)]
mod tests;
