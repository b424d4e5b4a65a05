//! The lazy object view.

use crate::element::Element;
use crate::materialize::{self, LazyValue};
use crate::tape::TapeNode;
use crate::value::{Map, Value};
use crate::{Error, Result, pointer};

/// A lazy view over an object node.
///
/// Lookup by key scans the entries in parse order and materializes only the
/// value that was asked for. [`Object::values`] and pair iteration are the
/// deliberate exceptions: both hand back fully native data in one call, so a
/// composite value arrives as a real container rather than another view.
///
/// # Examples
///
/// ```
/// use tapedom::{LazyValue, Parser};
///
/// let mut parser = Parser::new();
/// let root = parser.parse(br#"{"name": "badger", "legs": 4}"#)?;
/// let LazyValue::Object(object) = root else { unreachable!() };
/// assert_eq!(object.get("name")?.as_str(), Some("badger"));
/// assert!(object.contains_key("legs")?);
/// assert!(!object.contains_key("wings")?);
/// # Ok::<(), tapedom::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Object {
    elem: Element,
}

impl Object {
    pub(crate) fn new(elem: Element) -> Self {
        Self { elem }
    }

    fn raw_len(&self) -> usize {
        match *self.elem.doc().node(self.elem.pos()) {
            TapeNode::Object { len, .. } => len,
            _ => 0,
        }
    }

    /// Number of key/value pairs.
    pub fn len(&self) -> Result<usize> {
        self.elem.ensure_current()?;
        Ok(self.raw_len())
    }

    /// Whether the object has no pairs.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The value stored under `key`, materialized shallowly.
    ///
    /// Fails with [`Error::KeyNotFound`] when the key is absent.
    pub fn get(&self, key: &str) -> Result<LazyValue> {
        Ok(materialize::shallow(&self.get_element(key)?))
    }

    /// The element handle stored under `key`, without materializing it.
    pub fn get_element(&self, key: &str) -> Result<Element> {
        self.elem.ensure_current()?;
        let pos = self
            .elem
            .doc()
            .object_value(self.elem.pos(), key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))?;
        Ok(Element::new(self.elem.doc().clone(), pos))
    }

    /// Whether `key` is present. Absence is the normal `false` case, never
    /// an error.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        self.elem.ensure_current()?;
        Ok(self.elem.doc().object_value(self.elem.pos(), key)?.is_some())
    }

    /// All keys, in parse order.
    pub fn keys(&self) -> Result<Vec<String>> {
        self.elem.ensure_current()?;
        let len = self.raw_len();
        let mut keys = Vec::with_capacity(len);
        let mut entry = self.elem.pos() + 1;
        for _ in 0..len {
            keys.push(self.elem.doc().key_at(entry)?.to_owned());
            let value_pos = entry + 1;
            entry = value_pos + self.elem.doc().width(value_pos);
        }
        Ok(keys)
    }

    /// All values, each materialized **recursively**, in parse order.
    ///
    /// This is deliberately asymmetric with [`Object::get`], which stays
    /// shallow: `values` exists to hand the caller fully realized data in one
    /// call. The asymmetry is inherited contract, kept on purpose.
    pub fn values(&self) -> Result<Vec<Value>> {
        self.elem.ensure_current()?;
        let len = self.raw_len();
        let mut values = Vec::with_capacity(len);
        let mut entry = self.elem.pos() + 1;
        for _ in 0..len {
            let value_pos = entry + 1;
            values.push(materialize::deep(self.elem.doc(), value_pos)?);
            entry = value_pos + self.elem.doc().width(value_pos);
        }
        Ok(values)
    }

    /// A lazy, forward-only iterator over `(key, value)` pairs.
    ///
    /// Both halves come back native: a composite value is fully
    /// materialized, never a view. Each step re-checks that the document is
    /// current and yields [`Error::Stale`] once the parser has been reused.
    #[must_use]
    pub fn iter(&self) -> ObjectIter {
        ObjectIter {
            elem: self.elem.clone(),
            entry: self.elem.pos() + 1,
            remaining: self.raw_len(),
        }
    }

    /// Resolves a JSON pointer rooted at this object.
    pub fn at_pointer(&self, pointer_str: &str) -> Result<LazyValue> {
        let target = pointer::resolve(self.elem.clone(), pointer_str)?;
        Ok(materialize::shallow(&target))
    }

    /// Freezes the whole object into a native map, recursively, preserving
    /// parse order.
    pub fn to_map(&self) -> Result<Map> {
        self.elem.ensure_current()?;
        let len = self.raw_len();
        let mut map = Map::with_capacity(len);
        let mut entry = self.elem.pos() + 1;
        for _ in 0..len {
            let key = self.elem.doc().key_at(entry)?.to_owned();
            let value_pos = entry + 1;
            map.insert(key, materialize::deep(self.elem.doc(), value_pos)?);
            entry = value_pos + self.elem.doc().width(value_pos);
        }
        Ok(map)
    }
}

impl IntoIterator for &Object {
    type Item = Result<(String, Value)>;
    type IntoIter = ObjectIter;

    fn into_iter(self) -> ObjectIter {
        self.iter()
    }
}

/// Iterator returned by [`Object::iter`].
#[derive(Debug)]
pub struct ObjectIter {
    elem: Element,
    entry: usize,
    remaining: usize,
}

impl Iterator for ObjectIter {
    type Item = Result<(String, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if let Err(err) = self.elem.ensure_current() {
            self.remaining = 0;
            return Some(Err(err));
        }
        let key = match self.elem.doc().key_at(self.entry) {
            Ok(key) => key.to_owned(),
            Err(err) => {
                self.remaining = 0;
                return Some(Err(err));
            }
        };
        let value_pos = self.entry + 1;
        let value = match materialize::deep(self.elem.doc(), value_pos) {
            Ok(value) => value,
            Err(err) => {
                self.remaining = 0;
                return Some(Err(err));
            }
        };
        self.entry = value_pos + self.elem.doc().width(value_pos);
        self.remaining -= 1;
        Some(Ok((key, value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
