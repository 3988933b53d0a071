use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::{Kind, Parser, ParserOptions};

/// Renders the token stream the way the display tests expect: one
/// `{token}` per line, optionally followed by the `|source|` slice the
/// token spans.
pub(crate) fn tok_seq(input: &str, options: ParserOptions) -> String {
    render(input, options, false)
}

pub(crate) fn tok_seq_with_source(input: &str, options: ParserOptions) -> String {
    render(input, options, true)
}

fn render(input: &str, options: ParserOptions, with_source: bool) -> String {
    let parser = Parser::new(options);
    let mut out = String::new();
    for (i, token) in parser.tokenize(input.as_bytes()).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{{{token}}}");
        if with_source {
            let source = String::from_utf8_lossy(&input.as_bytes()[token.start..=token.end]);
            let _ = write!(out, " |{source}|");
        }
    }
    out
}

pub(crate) fn kinds(input: &[u8], options: ParserOptions) -> Vec<Kind> {
    Parser::new(options).tokenize(input).map(|t| t.kind).collect()
}

pub(crate) fn succeeds(input: &str) -> bool {
    let parser = Parser::default();
    parser.tokenize(input.as_bytes()).all(|t| !t.kind.is_error())
}

pub(crate) fn succeeds_allowing_trailing_commas(input: &str) -> bool {
    let parser = Parser::new(ParserOptions {
        allow_trailing_commas: true,
        ..Default::default()
    });
    parser.tokenize(input.as_bytes()).all(|t| !t.kind.is_error())
}
