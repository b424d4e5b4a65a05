//! The caller-facing error taxonomy.
//!
//! Failures raised by the byte-level parser, by tape navigation, and by
//! pointer resolution are translated into exactly one [`Error`] kind at the
//! point where they become visible to callers. Nothing downstream inspects
//! the collaborator's error codes directly.

use crate::element::ElementType;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every way an operation on a parsed document can fail.
///
/// Data errors (`KeyNotFound`, `IndexOutOfBounds`, ...) are the normal
/// outcome of probing a document that does not have the requested shape.
/// [`Error::Internal`] is different in kind: it reports an
/// internal-consistency failure between this crate and the tape produced by
/// the byte-level parser, and is never raised for well-formed input.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An object lookup named a key that is not present.
    #[error("no such key: {0:?}")]
    KeyNotFound(String),

    /// An array index was out of range after negative-index normalization.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds {
        /// The index as given by the caller, before normalization.
        index: i64,
        /// The length of the array that was indexed.
        len: usize,
    },

    /// A narrowing accessor was called on an element of the wrong type.
    #[error("unexpected type: expected {expected}, found {found}")]
    UnexpectedType {
        /// What the access required, e.g. `"string"` or `"object or array"`.
        expected: &'static str,
        /// The tag actually present at the element's tape position.
        found: ElementType,
    },

    /// The collaborator could not allocate space for the document.
    #[error("out of memory while building the document")]
    OutOfMemory,

    /// The input was not well-formed JSON, carrying the byte-level parser's
    /// own description. Also covers inputs rejected before parsing begins:
    /// empty input, documents over the configured capacity, and documents
    /// nested deeper than [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH).
    #[error("invalid JSON: {0}")]
    Syntax(String),

    /// Reading the input from the file system failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid UTF-8.
    #[error("invalid utf-8 in input: {0}")]
    Decode(#[from] core::str::Utf8Error),

    /// A well-formed JSON pointer did not resolve to a value.
    #[error("json pointer does not resolve: {0:?}")]
    PointerNotFound(String),

    /// A JSON pointer violated RFC 6901 syntax.
    #[error("malformed json pointer: {0}")]
    MalformedPointer(String),

    /// A backend name that is not in the implementation registry.
    #[error("unknown implementation: {0:?}")]
    UnknownImplementation(String),

    /// The parser that produced this view has since parsed another document.
    #[error("stale view: the parser has been reused since this document was parsed")]
    Stale,

    /// The tape and this crate have drifted out of sync. Not recoverable;
    /// indicates a collaborator upgrade this crate does not understand.
    #[error("internal consistency failure: {0}")]
    Internal(&'static str),

    /// Any failure that fits no other kind.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// Translates a byte-level parse failure.
    ///
    /// Every malformed-input condition the collaborator reports (bad literal
    /// atoms, bad numbers, unterminated strings, trailing characters, numbers
    /// outside the representable range, ...) collapses into [`Error::Syntax`]
    /// carrying the underlying message. I/O and UTF-8 problems never reach
    /// this path; they are caught before the collaborator runs.
    pub(crate) fn from_parse(err: simd_json::Error) -> Self {
        Self::Syntax(err.to_string())
    }
}
