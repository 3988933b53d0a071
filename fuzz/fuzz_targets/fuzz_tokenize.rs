#![no_main]
use jsonlex::{with_paths, Parser, ParserOptions};
use libfuzzer_sys::fuzz_target;

// First byte selects the parser options and whether the stream runs
// through the path annotator; the rest is the document.
fn tokenize(data: &[u8]) {
    let Some((&flags, doc)) = data.split_first() else {
        return;
    };
    let parser = Parser::new(ParserOptions {
        allow_comments: flags & 1 != 0,
        allow_trailing_commas: flags & 2 != 0,
    });
    if flags & 4 != 0 {
        for twp in with_paths(parser.tokenize(doc)) {
            let _ = twp.path.components();
        }
    } else {
        for _ in parser.tokenize(doc) {}
    }
}

fuzz_target!(|data: &[u8]| tokenize(data));
