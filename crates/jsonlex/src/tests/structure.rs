use alloc::vec::Vec;

use super::util::{kinds, succeeds, succeeds_allowing_trailing_commas};
use crate::{Kind, Parser, ParserOptions};

#[test]
fn commas_in_arrays() {
    assert!(succeeds("[]"));
    assert!(succeeds("[1,2,3]"));
    assert!(succeeds("[1]"));
    assert!(succeeds("[ 1 , 22 , 55 ]"));
    assert!(!succeeds("[,1,2,3]"));
    assert!(!succeeds("[1,2,3,]"));
    assert!(!succeeds("[1,2,]"));
    assert!(!succeeds("[1,]"));
    assert!(!succeeds("[,]"));
}

#[test]
fn trailing_commas_in_arrays_with_option_set() {
    assert!(succeeds_allowing_trailing_commas("[1,[2,3,],4,]"));
    // Trailing commas only; multiple and initial commas stay errors.
    assert!(!succeeds_allowing_trailing_commas("[1,[2,,3,],4,]"));
    assert!(!succeeds_allowing_trailing_commas("[,1,[2,3],4]"));
    assert!(!succeeds_allowing_trailing_commas("[,]"));
}

#[test]
fn commas_in_objects() {
    assert!(succeeds(r#"{"foo":1,"bar":2,"amp":3}"#));
    assert!(!succeeds(r#"{,"foo":1,"bar":2,"amp":3}"#));
    assert!(!succeeds(r#"{"foo":1,,"bar":2,"amp":3}"#));
    assert!(!succeeds(r#"{"foo":1,"bar":2,"amp":3,}"#));
    assert!(!succeeds(r#"{"foo":1,}"#));
    assert!(!succeeds(r#"{,}"#));
    assert!(!succeeds(r#"{"foo":,}"#));
    assert!(!succeeds(r#"{"bar":"amp","foo":,}"#));
}

#[test]
fn trailing_commas_in_objects_with_option_set() {
    assert!(succeeds_allowing_trailing_commas(
        r#"{"foo": 1, "bar": {"blah": 4,},}"#
    ));
    assert!(!succeeds_allowing_trailing_commas(
        r#"{"foo": 1,, "bar": {"blah": 4,},}"#
    ));
    assert!(!succeeds_allowing_trailing_commas(
        r#"{,"foo": 1, "bar": {"blah": 4}}"#
    ));
    assert!(!succeeds_allowing_trailing_commas(r#"{,}"#));
}

#[test]
fn trailing_comma_reports_the_comma_position() {
    let parser = Parser::default();
    let tokens: Vec<_> = parser.tokenize(b"[1,]").collect();
    let kinds: Vec<Kind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            Kind::ArrayStart,
            Kind::Number,
            Kind::TrailingComma,
            Kind::ArrayEnd
        ]
    );
    assert_eq!((tokens[2].line, tokens[2].col), (1, 3));

    assert_eq!(
        kinds_with_trailing_commas(b"[1,]"),
        [Kind::ArrayStart, Kind::Number, Kind::ArrayEnd]
    );
}

fn kinds_with_trailing_commas(input: &[u8]) -> Vec<Kind> {
    kinds(
        input,
        ParserOptions {
            allow_trailing_commas: true,
            ..Default::default()
        },
    )
}

#[test]
fn nested_arrays() {
    assert!(succeeds("[[[[]]]]"));
    assert!(succeeds("[[[[[[[[[[[[[[]]]]]]]]]]]]]]"));
    assert!(succeeds("[[[[], []]]]"));
    assert!(succeeds("[[[[1], 2, [], 4]],9]"));
    assert!(succeeds("[]"));
    assert!(succeeds("[[]]"));
    assert!(succeeds("[ [ ] ]"));
    assert!(succeeds("[[[]]]"));
    assert!(succeeds("[ [ [ ] ] ]"));
}

#[test]
fn nested_objects() {
    assert!(succeeds("{ }"));
    assert!(succeeds("{}"));
    assert!(succeeds("{    }"));
    assert!(succeeds(r#"{"f":{"g":{}, "x":{}}}"#));
}

#[test]
fn non_string_keys_are_rejected() {
    assert!(!succeeds("{1:2}"));
}

#[test]
fn trailing_input() {
    assert!(succeeds("{}"));
    assert!(succeeds("{} \n\t\n"));
    assert!(!succeeds("{}1"));
    assert!(!succeeds("{} \n\t1"));
}

#[test]
fn trailing_input_ends_the_stream() {
    let parser = Parser::default();
    let tokens: Vec<_> = parser.tokenize(b"{} 1 2 3").collect();
    let kinds: Vec<Kind> = tokens.iter().map(|t| t.kind).collect();
    // At most one trailing-input diagnostic, then the stream ends.
    assert_eq!(
        kinds,
        [Kind::ObjectStart, Kind::ObjectEnd, Kind::TrailingInput]
    );
    assert_eq!((tokens[2].line, tokens[2].col), (1, 4));
}

#[test]
fn empty_input_yields_nothing() {
    let parser = Parser::default();
    assert_eq!(parser.tokenize(b"").count(), 0);
    assert_eq!(parser.tokenize(b" \t\r\n ").count(), 0);
    assert!(parser.errors().is_empty());
}

#[test]
fn eof_inside_containers() {
    assert_eq!(
        kinds(b"[1", ParserOptions::default()),
        [Kind::ArrayStart, Kind::Number, Kind::UnexpectedEof]
    );
    assert_eq!(
        kinds(b"[", ParserOptions::default()),
        [Kind::ArrayStart, Kind::UnexpectedEof]
    );
    assert_eq!(
        kinds(b"{", ParserOptions::default()),
        [Kind::ObjectStart, Kind::UnexpectedEof]
    );
    assert_eq!(
        kinds(br#"{"a""#, ParserOptions::default()),
        [Kind::ObjectStart, Kind::UnexpectedToken, Kind::UnexpectedEof]
    );
    assert_eq!(
        kinds(br#"{"a":"#, ParserOptions::default()),
        [Kind::ObjectStart, Kind::UnexpectedEof]
    );
    assert_eq!(
        kinds(br#"{"a":1"#, ParserOptions::default()),
        [Kind::ObjectStart, Kind::Number, Kind::UnexpectedEof]
    );
}

#[test]
fn structural_noise_at_top_level() {
    assert_eq!(kinds(b"]", ParserOptions::default()), [Kind::UnexpectedToken]);
    assert_eq!(kinds(b"}", ParserOptions::default()), [Kind::UnexpectedToken]);
    assert_eq!(kinds(b":", ParserOptions::default()), [Kind::UnexpectedToken]);
    assert_eq!(
        kinds(b",1", ParserOptions::default()),
        [Kind::UnexpectedToken, Kind::TrailingInput]
    );
}

#[test]
fn object_recovery_attaches_empty_keys() {
    // A non-string key still consumes a colon and value, with an empty
    // key attached for recovery.
    let parser = Parser::default();
    let tokens: Vec<_> = parser.tokenize(b"{1:2}").collect();
    let kinds: Vec<Kind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            Kind::ObjectStart,
            Kind::UnexpectedToken,
            Kind::Number,
            Kind::ObjectEnd
        ]
    );
    assert_eq!(tokens[2].key.as_deref(), Some(&b""[..]));
    assert_eq!(tokens[2].key_as_string(), "");
}

#[test]
fn deep_nesting_is_bounded_only_by_memory() {
    let mut doc = alloc::string::String::new();
    for _ in 0..10_000 {
        doc.push('[');
    }
    for _ in 0..10_000 {
        doc.push(']');
    }
    assert!(succeeds(&doc));
}

#[test]
fn errors_accumulate_across_runs() {
    let parser = Parser::default();
    assert_eq!(parser.tokenize(b"[1,]").count(), 4);
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(parser.tokenize(b"[1,]").count(), 4);
    assert_eq!(parser.errors().len(), 2);
}
