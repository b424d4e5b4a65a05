//! The lazy array view.

use crate::element::Element;
use crate::materialize::{self, LazyValue};
use crate::tape::TapeNode;
use crate::value::Value;
use crate::{Error, Result, pointer};

/// A lazy view over an array node.
///
/// Nothing is materialized until an element is accessed; the view holds only
/// a handle to the parsed document. Indexing accepts negative positions
/// counting from the end, and [`Array::slice`] follows the usual
/// start/stop/step normalization rules, clamping to the array bounds and
/// walking backwards for negative steps.
///
/// # Examples
///
/// ```
/// use tapedom::{LazyValue, Parser};
///
/// let mut parser = Parser::new();
/// let root = parser.parse(br#"[10, 20, 30]"#)?;
/// let LazyValue::Array(array) = root else { unreachable!() };
/// assert_eq!(array.get(-1)?.as_i64(), Some(30));
/// assert_eq!(array.len()?, 3);
/// # Ok::<(), tapedom::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Array {
    elem: Element,
}

impl Array {
    pub(crate) fn new(elem: Element) -> Self {
        Self { elem }
    }

    fn raw_len(&self) -> usize {
        match *self.elem.doc().node(self.elem.pos()) {
            TapeNode::Array { len, .. } => len,
            _ => 0,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> Result<usize> {
        self.elem.ensure_current()?;
        Ok(self.raw_len())
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The element at `index`, materialized shallowly.
    ///
    /// Negative indices count from the end. Indices that remain out of range
    /// after normalization fail with [`Error::IndexOutOfBounds`].
    pub fn get(&self, index: i64) -> Result<LazyValue> {
        Ok(materialize::shallow(&self.get_element(index)?))
    }

    /// The element handle at `index`, without materializing it.
    ///
    /// Same indexing rules as [`Array::get`].
    pub fn get_element(&self, index: i64) -> Result<Element> {
        self.elem.ensure_current()?;
        let len = self.raw_len();
        let oob = || Error::IndexOutOfBounds { index, len };

        let len_i64 = i64::try_from(len).map_err(|_| oob())?;
        let normalized = if index < 0 { index + len_i64 } else { index };
        if normalized < 0 || normalized >= len_i64 {
            return Err(oob());
        }
        #[allow(clippy::cast_sign_loss)]
        let pos = self
            .elem
            .doc()
            .array_child(self.elem.pos(), normalized as usize)
            .ok_or_else(|| Error::Internal("bounds-checked array index did not resolve"))?;
        Ok(Element::new(self.elem.doc().clone(), pos))
    }

    /// The elements selected by `start..stop` with `step`, each materialized
    /// shallowly.
    ///
    /// `None` bounds default to the start (or, for negative steps, the end)
    /// of the array; out-of-range bounds clamp rather than fail, so an empty
    /// selection yields an empty vector. A `step` of zero is the one invalid
    /// input.
    pub fn slice(
        &self,
        start: Option<i64>,
        stop: Option<i64>,
        step: i64,
    ) -> Result<Vec<LazyValue>> {
        self.elem.ensure_current()?;
        let len = self.raw_len();
        let mut out = Vec::new();
        let mut cursor = SliceCursor::new(start, stop, step, len)?;
        while let Some(index) = cursor.next_index() {
            let pos = self
                .elem
                .doc()
                .array_child(self.elem.pos(), index)
                .ok_or_else(|| Error::Internal("slice index did not resolve"))?;
            out.push(materialize::shallow(&Element::new(
                self.elem.doc().clone(),
                pos,
            )));
        }
        Ok(out)
    }

    /// A lazy, forward-only iterator over shallowly materialized elements.
    ///
    /// Each step re-checks that the document is current, so an iterator
    /// caught out by a parser reuse yields [`Error::Stale`] instead of data
    /// from a superseded document.
    #[must_use]
    pub fn iter(&self) -> ArrayIter {
        ArrayIter {
            elem: self.elem.clone(),
            cursor: self.elem.pos() + 1,
            remaining: self.raw_len(),
        }
    }

    /// Resolves a JSON pointer rooted at this array.
    pub fn at_pointer(&self, pointer_str: &str) -> Result<LazyValue> {
        let target = pointer::resolve(self.elem.clone(), pointer_str)?;
        Ok(materialize::shallow(&target))
    }

    /// Freezes the whole array into a native vector, recursively.
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        self.elem.ensure_current()?;
        let len = self.raw_len();
        let mut values = Vec::with_capacity(len);
        let mut child = self.elem.pos() + 1;
        for _ in 0..len {
            values.push(materialize::deep(self.elem.doc(), child)?);
            child += self.elem.doc().width(child);
        }
        Ok(values)
    }
}

impl IntoIterator for &Array {
    type Item = Result<LazyValue>;
    type IntoIter = ArrayIter;

    fn into_iter(self) -> ArrayIter {
        self.iter()
    }
}

/// Iterator returned by [`Array::iter`].
#[derive(Debug)]
pub struct ArrayIter {
    elem: Element,
    cursor: usize,
    remaining: usize,
}

impl Iterator for ArrayIter {
    type Item = Result<LazyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if let Err(err) = self.elem.ensure_current() {
            self.remaining = 0;
            return Some(Err(err));
        }
        let item = materialize::shallow(&Element::new(self.elem.doc().clone(), self.cursor));
        self.cursor += self.elem.doc().width(self.cursor);
        self.remaining -= 1;
        Some(Ok(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

/// Walks the index sequence of a start/stop/step selection over `len`
/// elements, after clamping both bounds to the valid range.
struct SliceCursor {
    next: i64,
    stop: i64,
    step: i64,
}

impl SliceCursor {
    fn new(start: Option<i64>, stop: Option<i64>, step: i64, len: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::Syntax("slice step cannot be zero".to_owned()));
        }
        let len = i64::try_from(len)
            .map_err(|_| Error::Internal("array length does not fit a signed index"))?;
        let backwards = step < 0;

        let clamp = |bound: i64| {
            if bound < 0 {
                let shifted = bound + len;
                if shifted >= 0 {
                    shifted
                } else if backwards {
                    -1
                } else {
                    0
                }
            } else if bound >= len {
                if backwards { len - 1 } else { len }
            } else {
                bound
            }
        };

        let next = match start {
            Some(bound) => clamp(bound),
            None if backwards => len - 1,
            None => 0,
        };
        let stop = match stop {
            Some(bound) => clamp(bound),
            None if backwards => -1,
            None => len,
        };
        Ok(Self { next, stop, step })
    }

    fn next_index(&mut self) -> Option<usize> {
        let in_range = if self.step > 0 {
            self.next < self.stop
        } else {
            self.next > self.stop
        };
        if !in_range {
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        let index = self.next as usize;
        self.next += self.step;
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(start: Option<i64>, stop: Option<i64>, step: i64, len: usize) -> Vec<usize> {
        let mut cursor = SliceCursor::new(start, stop, step, len).expect("valid step");
        let mut out = Vec::new();
        while let Some(index) = cursor.next_index() {
            out.push(index);
        }
        out
    }

    #[test]
    fn forward_slices_clamp_like_the_reference_runtime() {
        assert_eq!(indices(None, None, 1, 4), [0, 1, 2, 3]);
        assert_eq!(indices(Some(1), Some(3), 1, 4), [1, 2]);
        assert_eq!(indices(Some(-2), None, 1, 4), [2, 3]);
        assert_eq!(indices(Some(-9), Some(99), 1, 4), [0, 1, 2, 3]);
        assert!(indices(Some(3), Some(1), 1, 4).is_empty());
        assert_eq!(indices(None, None, 2, 5), [0, 2, 4]);
        assert!(indices(None, None, 1, 0).is_empty());
    }

    #[test]
    fn backward_slices_walk_in_reverse() {
        assert_eq!(indices(None, None, -1, 4), [3, 2, 1, 0]);
        assert_eq!(indices(Some(2), Some(0), -1, 4), [2, 1]);
        assert_eq!(indices(Some(-1), None, -2, 5), [4, 2, 0]);
        assert_eq!(indices(Some(99), Some(-9), -1, 4), [3, 2, 1, 0]);
        assert!(indices(Some(0), Some(2), -1, 4).is_empty());
    }

    #[test]
    fn zero_step_is_refused() {
        assert!(matches!(
            SliceCursor::new(None, None, 0, 3),
            Err(Error::Syntax(_))
        ));
    }
}
