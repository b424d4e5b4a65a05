//! Helpers shared by the integration tests.

#![allow(dead_code, missing_docs)]

use tapedom::{Array, LazyValue, Object, Parser, Value};

/// Parses `json` with a fresh parser and returns the shallow root.
///
/// The parser is dropped on purpose: views keep their document alive, and
/// only *reusing* a parser invalidates them.
pub fn parse(json: &str) -> LazyValue {
    Parser::new()
        .parse(json.as_bytes())
        .expect("well-formed test document")
}

pub fn as_object(value: LazyValue) -> Object {
    match value {
        LazyValue::Object(object) => object,
        other => panic!("expected an object view, got {other:?}"),
    }
}

pub fn as_array(value: LazyValue) -> Array {
    match value {
        LazyValue::Array(array) => array,
        other => panic!("expected an array view, got {other:?}"),
    }
}

/// The same document parsed by the reference implementation, converted to
/// this crate's native value for deep-equality checks.
pub fn reference(json: &str) -> Value {
    let parsed: serde_json::Value = serde_json::from_str(json).expect("reference parse");
    Value::from(parsed)
}
