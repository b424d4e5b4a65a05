//! The caller-facing parser.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::document::Document;
use crate::element::Element;
use crate::materialize::{self, LazyValue};
use crate::tape::Tape;
use crate::value::Value;
use crate::{Error, MAXSIZE_BYTES, PADDING, Result, implementation};

/// Parses JSON documents and hands out lazy views over them.
///
/// A parser owns one reusable input slot. Parsing another document with the
/// same parser supersedes the previous one: every [`LazyValue`],
/// [`Array`](crate::Array) and [`Object`](crate::Object) derived from it
/// keeps working memory-safely (views hold their document alive) but fails
/// every operation with [`Error::Stale`] from that instant on. Use one
/// parser per document, or freeze what you need before reparsing.
///
/// # Examples
///
/// ```
/// use tapedom::{LazyValue, Parser};
///
/// let mut parser = Parser::new();
/// let root = parser.parse(br#"{"x": [1, "two", null]}"#)?;
/// let LazyValue::Object(root) = root else { unreachable!() };
/// let LazyValue::Array(x) = root.get("x")? else { unreachable!() };
/// assert_eq!(x.get(1)?.as_str(), Some("two"));
/// # Ok::<(), tapedom::Error>(())
/// ```
#[derive(Debug)]
pub struct Parser {
    max_capacity: usize,
    epoch: Arc<AtomicU64>,
    scratch: Vec<u8>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A parser whose input slot may grow up to [`MAXSIZE_BYTES`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_capacity(MAXSIZE_BYTES)
    }

    /// A parser that refuses documents larger than `max_capacity` bytes.
    #[must_use]
    pub fn with_max_capacity(max_capacity: usize) -> Self {
        Self {
            max_capacity,
            epoch: Arc::new(AtomicU64::new(0)),
            scratch: Vec::new(),
        }
    }

    /// The configured input ceiling, in bytes.
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Parses `input`, returning the root materialized shallowly: a scalar
    /// for scalar documents, a lazy [`Array`](crate::Array) or
    /// [`Object`](crate::Object) view for composite ones.
    pub fn parse(&mut self, input: &[u8]) -> Result<LazyValue> {
        let root = self.document(input)?;
        Ok(materialize::shallow(&root))
    }

    /// Parses `input` and materializes the whole document recursively into
    /// native containers.
    pub fn parse_recursive(&mut self, input: &[u8]) -> Result<Value> {
        let root = self.document(input)?;
        materialize::deep(root.doc(), root.pos())
    }

    /// Reads and parses the file at `path`; the root comes back shallow.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LazyValue> {
        let input = std::fs::read(path.as_ref())?;
        self.parse(&input)
    }

    /// Reads and parses the file at `path`, materializing recursively.
    pub fn load_recursive(&mut self, path: impl AsRef<Path>) -> Result<Value> {
        let input = std::fs::read(path.as_ref())?;
        self.parse_recursive(&input)
    }

    /// Runs the byte-level parser and wraps the result in a fresh document.
    ///
    /// Inputs rejected before the collaborator runs (over capacity, invalid
    /// UTF-8) leave earlier views intact; once the input slot is
    /// overwritten, every earlier view is stale.
    fn document(&mut self, input: &[u8]) -> Result<Element> {
        if input.len() > self.max_capacity {
            return Err(Error::Syntax(format!(
                "input of {} bytes exceeds the parser capacity of {} bytes",
                input.len(),
                self.max_capacity
            )));
        }
        core::str::from_utf8(input)?;

        let implementation = implementation::active_implementation();
        debug!(
            len = input.len(),
            implementation = implementation.name(),
            "parsing document"
        );

        // Overwriting the input slot is the moment earlier documents become
        // stale, whether or not this parse succeeds.
        let generation = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.scratch.clear();
        self.scratch.reserve(input.len() + PADDING);
        self.scratch.extend_from_slice(input);

        let raw = simd_json::to_tape(&mut self.scratch).map_err(Error::from_parse)?;
        let tape = Tape::from_collaborator(raw)?;
        let doc = Arc::new(Document::new(tape, generation, Arc::clone(&self.epoch)));
        Ok(Element::new(doc, 0))
    }
}
