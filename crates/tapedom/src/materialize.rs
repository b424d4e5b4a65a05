//! Element-to-native conversion, shallow and recursive.
//!
//! Shallow materialization is O(1): scalars convert, composites come back as
//! lazy proxies. Recursive materialization walks the whole subtree and
//! allocates one native container per composite visited. Scalars convert the
//! same way in both modes, so recursing later through a proxy yields exactly
//! what recursing up front would have.

use std::sync::Arc;

use crate::array::Array;
use crate::document::Document;
use crate::element::Element;
use crate::object::Object;
use crate::tape::TapeNode;
use crate::value::{Map, Value};
use crate::Result;

/// A value materialized shallowly: native scalars, lazy composites.
#[derive(Debug, Clone)]
pub enum LazyValue {
    /// `null`.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A signed 64-bit integer.
    I64(i64),
    /// An unsigned 64-bit integer above `i64::MAX`.
    U64(u64),
    /// A double-precision float.
    F64(f64),
    /// A string, copied out of the tape.
    String(String),
    /// An array, still on the tape.
    Array(Array),
    /// An object, still on the tape.
    Object(Object),
}

impl LazyValue {
    /// Returns `true` if the value is `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The boolean payload, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload, if this is a signed integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// The integer payload, if this is an unsigned integer.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// The float payload, if this is a float.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// The string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The array proxy, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The object proxy, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Freezes this value, recursively materializing any remaining proxies.
    pub fn to_value(&self) -> Result<Value> {
        match self {
            Self::Null => Ok(Value::Null),
            Self::Bool(b) => Ok(Value::Bool(*b)),
            Self::I64(v) => Ok(Value::I64(*v)),
            Self::U64(v) => Ok(Value::U64(*v)),
            Self::F64(v) => Ok(Value::F64(*v)),
            Self::String(s) => Ok(Value::String(s.clone())),
            Self::Array(array) => Ok(Value::Array(array.to_vec()?)),
            Self::Object(object) => Ok(Value::Object(object.to_map()?)),
        }
    }
}

/// Converts the element at hand without descending into composites.
///
/// Cannot fail on a well-formed tape; the staleness of the underlying
/// document is the entry operation's concern, not this function's.
pub(crate) fn shallow(element: &Element) -> LazyValue {
    match *element.doc().node(element.pos()) {
        TapeNode::Object { .. } => LazyValue::Object(Object::new(element.clone())),
        TapeNode::Array { .. } => LazyValue::Array(Array::new(element.clone())),
        TapeNode::String { offset, len } => {
            LazyValue::String(element.doc().str_at(offset, len).to_owned())
        }
        TapeNode::I64(v) => LazyValue::I64(v),
        TapeNode::U64(v) => LazyValue::U64(v),
        TapeNode::F64(v) => LazyValue::F64(v),
        TapeNode::Bool(v) => LazyValue::Bool(v),
        TapeNode::Null => LazyValue::Null,
    }
}

/// Recursively converts the subtree rooted at `pos` into a native value.
///
/// Recursion depth is bounded by the nesting ceiling enforced when the tape
/// was built.
pub(crate) fn deep(doc: &Arc<Document>, pos: usize) -> Result<Value> {
    match *doc.node(pos) {
        TapeNode::Object { len, .. } => {
            let mut map = Map::with_capacity(len);
            let mut entry = pos + 1;
            for _ in 0..len {
                let key = doc.key_at(entry)?.to_owned();
                let value_pos = entry + 1;
                map.insert(key, deep(doc, value_pos)?);
                entry = value_pos + doc.width(value_pos);
            }
            Ok(Value::Object(map))
        }
        TapeNode::Array { len, .. } => {
            let mut values = Vec::with_capacity(len);
            let mut child = pos + 1;
            for _ in 0..len {
                values.push(deep(doc, child)?);
                child += doc.width(child);
            }
            Ok(Value::Array(values))
        }
        TapeNode::String { offset, len } => Ok(Value::String(doc.str_at(offset, len).to_owned())),
        TapeNode::I64(v) => Ok(Value::I64(v)),
        TapeNode::U64(v) => Ok(Value::U64(v)),
        TapeNode::F64(v) => Ok(Value::F64(v)),
        TapeNode::Bool(v) => Ok(Value::Bool(v)),
        TapeNode::Null => Ok(Value::Null),
    }
}
