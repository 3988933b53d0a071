//! Prints the token stream, the error accumulator, and the annotated
//! stream for a small document with comments enabled.

use jsonlex::{with_paths, Parser, ParserOptions};

fn main() {
    let doc = br#"
{
    "name": "example", // inline note
    "values": [1, 2.5, true, null],
    "nested": {"deep": [{"leaf": "x"}]}
}
"#;

    let parser = Parser::new(ParserOptions {
        allow_comments: true,
        ..Default::default()
    });

    println!("tokens:");
    for token in parser.tokenize(doc) {
        println!("  {token}");
    }

    println!("annotated:");
    for twp in with_paths(parser.tokenize(doc)) {
        println!("  {twp}");
    }

    for error in parser.errors() {
        println!("error at {}:{}: {}", error.line, error.col, error.message);
    }
}
