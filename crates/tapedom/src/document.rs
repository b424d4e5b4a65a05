//! One parsed document and the navigation primitives the views delegate to.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::tape::{Tape, TapeNode};
use crate::{Error, Result};

/// Owns the tape for one successfully parsed input.
///
/// A `Document` is created by [`Parser`](crate::Parser) and shared, reference
/// counted, by every element and proxy derived from it. It records the parse
/// epoch it was created under; once the parser moves on to another document
/// the epochs diverge and every derived view reports itself stale instead of
/// answering from superseded data.
pub(crate) struct Document {
    tape: Tape,
    generation: u64,
    epoch: Arc<AtomicU64>,
}

impl Document {
    pub(crate) fn new(tape: Tape, generation: u64, epoch: Arc<AtomicU64>) -> Self {
        Self {
            tape,
            generation,
            epoch,
        }
    }

    /// Fails with [`Error::Stale`] once the owning parser has been reused.
    pub(crate) fn ensure_current(&self) -> Result<()> {
        if self.generation == self.epoch.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(Error::Stale)
        }
    }

    #[inline]
    pub(crate) fn node(&self, pos: usize) -> &TapeNode {
        self.tape.node(pos)
    }

    #[inline]
    pub(crate) fn str_at(&self, offset: usize, len: usize) -> &str {
        self.tape.str_at(offset, len)
    }

    #[inline]
    pub(crate) fn width(&self, pos: usize) -> usize {
        self.tape.width(pos)
    }

    /// The object key stored at `pos`. Keys are always string nodes on a
    /// well-formed tape; anything else means the tape and this crate have
    /// drifted apart.
    pub(crate) fn key_at(&self, pos: usize) -> Result<&str> {
        match *self.tape.node(pos) {
            TapeNode::String { offset, len } => Ok(self.tape.str_at(offset, len)),
            _ => Err(Error::Internal("object key is not a string node")),
        }
    }

    /// Tape position of the `index`-th child of the array at `pos`, walking
    /// sibling-to-sibling via subtree widths.
    pub(crate) fn array_child(&self, pos: usize, index: usize) -> Option<usize> {
        let TapeNode::Array { len, .. } = *self.tape.node(pos) else {
            return None;
        };
        if index >= len {
            return None;
        }
        let mut child = pos + 1;
        for _ in 0..index {
            child += self.tape.width(child);
        }
        Some(child)
    }

    /// Tape position of the value stored under `key` in the object at `pos`.
    /// The scan is linear in the number of pairs, in parse order.
    pub(crate) fn object_value(&self, pos: usize, key: &str) -> Result<Option<usize>> {
        let TapeNode::Object { len, .. } = *self.tape.node(pos) else {
            return Ok(None);
        };
        let mut entry = pos + 1;
        for _ in 0..len {
            let value = entry + 1;
            if self.key_at(entry)? == key {
                return Ok(Some(value));
            }
            entry = value + self.tape.width(value);
        }
        Ok(None)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.tape.len())
            .field("generation", &self.generation)
            .finish()
    }
}
