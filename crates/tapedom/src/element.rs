//! Element handles: cheap, copyable references into a document's tape.

use std::fmt;
use std::sync::Arc;

use crate::document::Document;
use crate::tape::TapeNode;
use crate::{Error, Result};

/// The eight kinds of JSON value a tape position can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
    /// A JSON string.
    String,
    /// An integer that fits `i64`.
    I64,
    /// An integer above `i64::MAX`, up to `u64::MAX`.
    U64,
    /// A double-precision float.
    F64,
    /// `true` or `false`.
    Bool,
    /// `null`.
    Null,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// A reference to one value inside a parsed document.
///
/// An `Element` is a document handle plus a tape position; cloning one never
/// copies document data. Elements keep their document alive, so they can
/// always be probed safely, but every accessor first checks that the owning
/// parser has not moved on to another document and fails with
/// [`Error::Stale`] when it has.
#[derive(Clone)]
pub struct Element {
    doc: Arc<Document>,
    pos: usize,
}

impl Element {
    pub(crate) fn new(doc: Arc<Document>, pos: usize) -> Self {
        Self { doc, pos }
    }

    #[inline]
    pub(crate) fn doc(&self) -> &Arc<Document> {
        &self.doc
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn ensure_current(&self) -> Result<()> {
        self.doc.ensure_current()
    }

    /// The tag at this position, without a staleness check.
    pub(crate) fn tag(&self) -> ElementType {
        match *self.doc.node(self.pos) {
            TapeNode::Object { .. } => ElementType::Object,
            TapeNode::Array { .. } => ElementType::Array,
            TapeNode::String { .. } => ElementType::String,
            TapeNode::I64(_) => ElementType::I64,
            TapeNode::U64(_) => ElementType::U64,
            TapeNode::F64(_) => ElementType::F64,
            TapeNode::Bool(_) => ElementType::Bool,
            TapeNode::Null => ElementType::Null,
        }
    }

    /// Which of the eight JSON kinds this element is.
    pub fn element_type(&self) -> Result<ElementType> {
        self.ensure_current()?;
        Ok(self.tag())
    }

    /// The string payload, straight out of the tape's arena.
    pub fn as_str(&self) -> Result<&str> {
        self.ensure_current()?;
        match *self.doc.node(self.pos) {
            TapeNode::String { offset, len } => Ok(self.doc.str_at(offset, len)),
            _ => Err(self.type_error("string")),
        }
    }

    /// The value as a signed 64-bit integer.
    pub fn as_i64(&self) -> Result<i64> {
        self.ensure_current()?;
        match *self.doc.node(self.pos) {
            TapeNode::I64(v) => Ok(v),
            _ => Err(self.type_error("i64")),
        }
    }

    /// The value as an unsigned 64-bit integer.
    pub fn as_u64(&self) -> Result<u64> {
        self.ensure_current()?;
        match *self.doc.node(self.pos) {
            TapeNode::U64(v) => Ok(v),
            _ => Err(self.type_error("u64")),
        }
    }

    /// The value as a double.
    pub fn as_f64(&self) -> Result<f64> {
        self.ensure_current()?;
        match *self.doc.node(self.pos) {
            TapeNode::F64(v) => Ok(v),
            _ => Err(self.type_error("f64")),
        }
    }

    /// The value as a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        self.ensure_current()?;
        match *self.doc.node(self.pos) {
            TapeNode::Bool(v) => Ok(v),
            _ => Err(self.type_error("bool")),
        }
    }

    /// Whether this element is JSON `null`.
    pub fn is_null(&self) -> Result<bool> {
        self.ensure_current()?;
        Ok(matches!(*self.doc.node(self.pos), TapeNode::Null))
    }

    fn type_error(&self, expected: &'static str) -> Error {
        Error::UnexpectedType {
            expected,
            found: self.tag(),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("pos", &self.pos)
            .field("type", &self.tag())
            .finish()
    }
}
