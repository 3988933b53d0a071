//! Parser configuration.

/// Configuration options for the JSON tokenizer.
///
/// Both extensions are off by default, which leaves the parser accepting
/// exactly the RFC 8259 grammar.
///
/// # Examples
///
/// ```
/// use jsonlex::{Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     allow_comments: true,
///     ..Default::default()
/// });
/// assert!(parser.tokenize(b"[1] /* done */").all(|t| !t.kind.is_error()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ParserOptions {
    /// Whether to allow `/* */` and `//` comments in the input.
    ///
    /// Comment tokens are forwarded to the consumer; filter on
    /// [`Kind::Comment`](crate::Kind::Comment) to skip them.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_comments: bool,

    /// Whether to allow trailing commas in arrays and objects. Initial
    /// commas and repeated commas remain errors.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_commas: bool,
}
