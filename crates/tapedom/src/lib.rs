//! Lazy DOM views over a SIMD-parsed JSON tape.
//!
//! The byte-level parsing is done by [`simd-json`], which turns an input
//! buffer into a flat, position-addressed tape. This crate is the layer on
//! top: it re-encodes that tape into a self-contained document and hands out
//! values *lazily*: a scalar converts immediately, a composite comes back
//! as a cheap [`Array`] or [`Object`] view that materializes children only
//! when asked. Freezing a view ([`Array::to_vec`], [`Object::to_map`],
//! [`LazyValue::to_value`]) expands it recursively into plain Rust
//! containers, with object order preserved.
//!
//! Views never outlive their data: they hold their document alive, and a
//! document remembers the parse epoch it was created under. Reusing a
//! [`Parser`] for another input makes every earlier view fail with
//! [`Error::Stale`] instead of answering from a superseded document.
//!
//! # Examples
//!
//! ```
//! use tapedom::{LazyValue, Parser, Value};
//!
//! let mut parser = Parser::new();
//! let root = parser.parse(br#"{"x": [1, "two", null, {"y": true}]}"#)?;
//! let LazyValue::Object(root) = root else { unreachable!() };
//!
//! // Navigate lazily...
//! let LazyValue::Array(x) = root.get("x")? else { unreachable!() };
//! assert_eq!(x.get(1)?.as_str(), Some("two"));
//! assert_eq!(x.at_pointer("/3/y")?.as_bool(), Some(true));
//!
//! // ...or freeze a subtree into native values.
//! let frozen = x.to_vec()?;
//! assert_eq!(frozen[0], Value::I64(1));
//! # Ok::<(), tapedom::Error>(())
//! ```
//!
//! [`simd-json`]: https://docs.rs/simd-json

mod array;
mod document;
mod element;
mod error;
mod implementation;
mod materialize;
mod object;
mod parser;
mod pointer;
mod tape;
mod value;

pub use array::{Array, ArrayIter};
pub use element::{Element, ElementType};
pub use error::{Error, Result};
pub use implementation::{
    Implementation, active_implementation, available_implementations, set_active_implementation,
};
pub use materialize::LazyValue;
pub use object::{Object, ObjectIter};
pub use parser::Parser;
pub use value::{Map, Value};

/// The largest document a default-capacity [`Parser`] accepts, in bytes.
pub const MAXSIZE_BYTES: usize = 0xFFFF_FFFF;

/// Scratch padding reserved past the end of the input slot for the
/// byte-level parser's vectorized reads.
pub const PADDING: usize = 32;

/// The deepest nesting a document may have before it is rejected.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// This crate's version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
