//! Structural paths and the path-annotating stream transform.
//!
//! A [`Path`] is a persistent cons list from leaf to root: pushing and
//! replacing the leaf are O(1) and every emitted path is a snapshot that
//! shares its tail with its neighbors, so annotation costs one small
//! allocation per step. Exported views ([`Path::components`], `Display`)
//! reverse to root-first order on demand.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write as _;

use crate::token::{Kind, Token};

/// Marks an array node whose first element has not been seen yet; the
/// first element bumps it to index 0.
const FRESH_INDEX: isize = -1;

#[derive(Debug, PartialEq)]
enum Step {
    Index(isize),
    Key(Rc<str>),
}

#[derive(Debug, PartialEq)]
struct PathNode {
    previous: Option<Rc<PathNode>>,
    step: Step,
}

/// The path to a value inside a JSON document: a sequence of object keys
/// and array indices leading from the root. For example, the component
/// sequence `[1, "foo", 0]` is the path to `document[1]["foo"][0]`.
///
/// Cloning a path is O(1); paths produced from the same stream share
/// structure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    end: Option<Rc<PathNode>>,
}

/// A single step of a [`Path`]: an object key or an array index.
///
/// With the `serde` feature enabled a component (de)serializes untagged,
/// as a plain string or a non-negative integer, so a component list reads
/// the same way the bracket rendering does: `["foo", 0, "bar"]` rather
/// than a tagged representation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
pub enum PathComponent {
    /// An object member key.
    Key(String),
    /// A zero-based array index.
    Index(usize),
}

impl PathComponent {
    /// Returns the key if this component is a key, otherwise `None`.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        if let PathComponent::Key(k) = self {
            Some(k)
        } else {
            None
        }
    }

    /// Returns the index if this component is an index, otherwise `None`.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        if let PathComponent::Index(i) = self {
            Some(*i)
        } else {
            None
        }
    }
}

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        PathComponent::Key(s.into())
    }
}

impl From<String> for PathComponent {
    fn from(s: String) -> Self {
        PathComponent::Key(s)
    }
}

impl From<usize> for PathComponent {
    fn from(i: usize) -> Self {
        PathComponent::Index(i)
    }
}

impl Path {
    /// Returns the path's components in root-first order.
    #[must_use]
    pub fn components(&self) -> Vec<PathComponent> {
        let mut out = Vec::new();
        let mut node = self.end.as_deref();
        while let Some(n) = node {
            out.push(match &n.step {
                Step::Index(i) => {
                    debug_assert!(*i >= 0, "unfilled array counter escaped into a path");
                    PathComponent::Index((*i).max(0) as usize)
                }
                Step::Key(k) => PathComponent::Key(k.as_ref().into()),
            });
            node = n.previous.as_deref();
        }
        out.reverse();
        out
    }

    /// Builds a path from root-first components.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlex::Path;
    ///
    /// let path = Path::from_components([1.into(), "foo".into(), 0.into()]);
    /// assert_eq!(path.to_string(), r#"[1]["foo"][0]"#);
    /// ```
    pub fn from_components<I>(components: I) -> Self
    where
        I: IntoIterator<Item = PathComponent>,
    {
        let mut end = None;
        for component in components {
            let step = match component {
                PathComponent::Key(k) => Step::Key(k.as_str().into()),
                PathComponent::Index(i) => Step::Index(i as isize),
            };
            end = Some(Rc::new(PathNode { previous: end, step }));
        }
        Path { end }
    }

    /// True iff the path equals the given root-first component slice.
    #[must_use]
    pub fn matches(&self, components: &[PathComponent]) -> bool {
        let mut node = self.end.as_deref();
        for component in components.iter().rev() {
            let Some(n) = node else {
                return false;
            };
            let same = match (&n.step, component) {
                (Step::Index(i), PathComponent::Index(want)) => *i >= 0 && *i as usize == *want,
                (Step::Key(k), PathComponent::Key(want)) => k.as_ref() == want,
                _ => false,
            };
            if !same {
                return false;
            }
            node = n.previous.as_deref();
        }
        node.is_none()
    }

    /// True iff the path has no components (the document root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end.is_none()
    }

    /// Number of components in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut n = 0;
        let mut node = self.end.as_deref();
        while let Some(inner) = node {
            n += 1;
            node = inner.previous.as_deref();
        }
        n
    }
}

/// Renders the path as a sequence of indexing operators, e.g.
/// `[0]["foo"][1]`. Keys are JSON-escaped.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in self.components() {
            match component {
                PathComponent::Index(i) => write!(f, "[{i}]")?,
                PathComponent::Key(k) => {
                    f.write_char('[')?;
                    write_json_string(f, &k)?;
                    f.write_char(']')?;
                }
            }
        }
        Ok(())
    }
}

fn write_json_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// A token paired with the path leading to it.
#[derive(Debug, Clone)]
pub struct TokenWithPath<'a> {
    /// The annotated token.
    pub token: Token<'a>,
    /// The path from the document root to the token.
    pub path: Path,
}

impl fmt::Display for TokenWithPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.token, self.path)
    }
}

/// Converts a token sequence into a sequence of [`TokenWithPath`] by
/// tracking depth transitions.
///
/// `ArrayEnd` and `ObjectEnd` tokens pop the current path and are *not*
/// forwarded; consumers that need to observe container closes should run
/// the plain token stream alongside. All other tokens (including error
/// tokens) pass through annotated with the path at their position.
///
/// # Examples
///
/// ```
/// use jsonlex::{with_paths, Parser};
///
/// let parser = Parser::default();
/// let annotated: Vec<_> = with_paths(parser.tokenize(br#"{"a":{"b":{"c":1}}}"#))
///     .map(|twp| twp.path.to_string())
///     .collect();
/// assert_eq!(annotated.last().unwrap(), r#"["a"]["b"]["c"]"#);
/// ```
pub fn with_paths<'a, I>(tokens: I) -> WithPaths<I>
where
    I: Iterator<Item = Token<'a>>,
{
    WithPaths {
        tokens,
        current: None,
    }
}

/// Iterator returned by [`with_paths`].
pub struct WithPaths<I> {
    tokens: I,
    current: Option<Rc<PathNode>>,
}

impl<'a, I> Iterator for WithPaths<I>
where
    I: Iterator<Item = Token<'a>>,
{
    type Item = TokenWithPath<'a>;

    fn next(&mut self) -> Option<TokenWithPath<'a>> {
        loop {
            let token = self.tokens.next()?;
            if matches!(token.kind, Kind::ArrayEnd | Kind::ObjectEnd) {
                self.current = self.current.as_ref().and_then(|n| n.previous.clone());
                continue;
            }

            // Replace the leaf: object nodes take the token's key, array
            // nodes advance their counter.
            if let Some(current) = self.current.take() {
                let step = match &current.step {
                    Step::Key(_) => Step::Key(key_text(&token)),
                    Step::Index(i) => Step::Index(i + 1),
                };
                self.current = Some(Rc::new(PathNode {
                    previous: current.previous.clone(),
                    step,
                }));
            }
            let path = Path {
                end: self.current.clone(),
            };

            match token.kind {
                Kind::ArrayStart => {
                    self.current = Some(Rc::new(PathNode {
                        previous: self.current.take(),
                        step: Step::Index(FRESH_INDEX),
                    }));
                }
                Kind::ObjectStart => {
                    self.current = Some(Rc::new(PathNode {
                        previous: self.current.take(),
                        step: Step::Key("".into()),
                    }));
                }
                _ => {}
            }
            return Some(TokenWithPath { token, path });
        }
    }
}

fn key_text(token: &Token<'_>) -> Rc<str> {
    match &token.key {
        Some(key) => Rc::from(&*String::from_utf8_lossy(key)),
        None => Rc::from(""),
    }
}
