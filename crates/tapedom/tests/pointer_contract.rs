//! JSON pointer resolution against parsed documents.

mod common;

use common::{as_array, as_object, parse, reference};
use rstest::rstest;
use tapedom::{Error, LazyValue, Value};

const DOC: &str = r#"{"a": [1, 2], "a/b": 3, "t~x": 4, "": 5, "nested": {"list": [{"k": "v"}]}}"#;

#[test]
fn empty_pointer_is_the_root_itself() {
    let object = as_object(parse(DOC));
    let root_again = as_object(object.at_pointer("").unwrap());
    assert_eq!(root_again.to_map().unwrap(), object.to_map().unwrap());
}

#[rstest]
#[case("/a/0", Value::I64(1))]
#[case("/a/1", Value::I64(2))]
#[case("/a~1b", Value::I64(3))]
#[case("/t~0x", Value::I64(4))]
#[case("/", Value::I64(5))]
#[case("/nested/list/0/k", Value::String("v".to_owned()))]
fn pointers_resolve_token_by_token(#[case] pointer: &str, #[case] expected: Value) {
    let object = as_object(parse(DOC));
    assert_eq!(
        object.at_pointer(pointer).unwrap().to_value().unwrap(),
        expected
    );
}

#[test]
fn resolved_composites_come_back_as_views() {
    let object = as_object(parse(DOC));
    let list = object.at_pointer("/nested/list").unwrap();
    assert!(matches!(list, LazyValue::Array(_)));
    assert_eq!(
        list.to_value().unwrap(),
        reference(r#"[{"k": "v"}]"#)
    );
}

#[test]
fn pointers_resolve_from_array_roots_too() {
    let array = as_array(parse(r#"[{"a": [10, 20]}]"#));
    assert_eq!(
        array.at_pointer("/0/a/1").unwrap().to_value().unwrap(),
        Value::I64(20)
    );
    assert_eq!(array.at_pointer("").unwrap().to_value().unwrap(), reference(r#"[{"a": [10, 20]}]"#));
}

#[rstest]
#[case("/missing")]
#[case("/a/5")]
#[case("/nested/list/1/k")]
#[case("/a/-")]
#[case("/a/99999999999999999999999999")]
fn unresolvable_pointers_report_not_found(#[case] pointer: &str) {
    let object = as_object(parse(DOC));
    assert!(matches!(
        object.at_pointer(pointer),
        Err(Error::PointerNotFound(_))
    ));
}

#[rstest]
#[case("a/b")]
#[case("/a/01")]
#[case("/a/1x")]
#[case("/a/+1")]
#[case("/a/ 1")]
fn malformed_pointers_are_rejected(#[case] pointer: &str) {
    let object = as_object(parse(DOC));
    assert!(matches!(
        object.at_pointer(pointer),
        Err(Error::MalformedPointer(_))
    ));
}

#[test]
fn descending_through_a_scalar_is_a_type_error() {
    let object = as_object(parse(DOC));
    assert!(matches!(
        object.at_pointer("/a/0/deeper"),
        Err(Error::UnexpectedType { .. })
    ));
}

#[test]
fn first_failing_token_short_circuits() {
    let object = as_object(parse(DOC));
    // The malformed second token is never reached; the first one already
    // fails to resolve.
    assert!(matches!(
        object.at_pointer("/missing/01"),
        Err(Error::PointerNotFound(_))
    ));
}
