//! Parser-boundary behavior: error translation, capacity, file loading,
//! the implementation registry, and view invalidation on reuse.

mod common;

use std::io::Write;

use common::{as_array, as_object, reference};
use rstest::rstest;
use tapedom::{
    DEFAULT_MAX_DEPTH, Error, LazyValue, MAXSIZE_BYTES, PADDING, Parser, VERSION, Value,
    available_implementations,
};

#[rstest]
#[case(b"".as_slice())]
#[case(b"{".as_slice())]
#[case(br#"{"a":}"#.as_slice())]
#[case(b"[1,]".as_slice())]
#[case(b"nul".as_slice())]
#[case(b"{} trailing".as_slice())]
#[case(br#"{"n": 18446744073709551616}"#.as_slice())]
fn malformed_documents_translate_to_syntax_errors(#[case] input: &[u8]) {
    let mut parser = Parser::new();
    let err = parser.parse(input).unwrap_err();
    assert!(matches!(err, Error::Syntax(_)), "got {err:?}");
}

#[test]
fn syntax_errors_carry_the_underlying_message() {
    let mut parser = Parser::new();
    let err = parser.parse(b"{").unwrap_err();
    assert!(!err.to_string().trim_end().ends_with(':'));
    assert!(err.to_string().starts_with("invalid JSON: "));
}

#[test]
fn invalid_utf8_is_a_decode_error() {
    let mut parser = Parser::new();
    let err = parser.parse(&[0xff, 0xfe, b'{', b'}']).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn over_capacity_inputs_are_refused_up_front() {
    let mut parser = Parser::with_max_capacity(4);
    assert_eq!(parser.max_capacity(), 4);
    let err = parser.parse(b"[1, 2, 3]").unwrap_err();
    assert!(matches!(&err, Error::Syntax(msg) if msg.contains("capacity")));

    // Within the bound everything works.
    assert!(parser.parse(b"[1]").is_ok());
}

#[test]
fn missing_files_surface_io_errors() {
    let mut parser = Parser::new();
    let err = parser.load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn load_reads_and_parses_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"from": "disk", "n": [1, 2]}"#).unwrap();
    file.flush().unwrap();

    let mut parser = Parser::new();
    let root = as_object(parser.load(file.path()).unwrap());
    assert_eq!(root.get("from").unwrap().as_str(), Some("disk"));

    let full = parser.load_recursive(file.path()).unwrap();
    assert_eq!(full, reference(r#"{"from": "disk", "n": [1, 2]}"#));
}

#[test]
fn reuse_invalidates_every_earlier_view() {
    let mut parser = Parser::new();
    let first = as_object(parser.parse(br#"{"a": [1, 2]}"#).unwrap());
    let first_array = as_array(first.get("a").unwrap());
    let mut midway = first_array.iter();
    assert!(midway.next().unwrap().is_ok());

    let second = as_object(parser.parse(br#"{"b": true}"#).unwrap());

    // Every operation on the superseded views reports staleness...
    assert!(matches!(first.len(), Err(Error::Stale)));
    assert!(matches!(first.get("a"), Err(Error::Stale)));
    assert!(matches!(first.contains_key("a"), Err(Error::Stale)));
    assert!(matches!(first.keys(), Err(Error::Stale)));
    assert!(matches!(first.to_map(), Err(Error::Stale)));
    assert!(matches!(first.at_pointer("/a"), Err(Error::Stale)));
    assert!(matches!(first_array.get(0), Err(Error::Stale)));
    assert!(matches!(first_array.slice(None, None, 1), Err(Error::Stale)));
    assert!(matches!(first_array.to_vec(), Err(Error::Stale)));

    // ...including an iterator caught mid-flight.
    assert!(matches!(midway.next(), Some(Err(Error::Stale))));

    // The current document is unaffected.
    assert_eq!(second.get("b").unwrap().as_bool(), Some(true));
}

#[test]
fn a_failed_reparse_still_invalidates() {
    let mut parser = Parser::new();
    let first = as_array(parser.parse(b"[1]").unwrap());
    assert!(parser.parse(b"{not json").is_err());
    assert!(matches!(first.len(), Err(Error::Stale)));
}

#[test]
fn inputs_rejected_before_parsing_leave_views_intact() {
    let mut parser = Parser::with_max_capacity(64);
    let first = as_array(parser.parse(b"[1]").unwrap());

    // Rejected before the input slot is touched.
    assert!(parser.parse(&[0xff, b'x']).is_err());
    assert!(parser.parse(&[b'x'; 65]).is_err());

    assert_eq!(first.len().unwrap(), 1);
}

#[test]
fn dropping_the_parser_does_not_invalidate_views() {
    let object = {
        let mut parser = Parser::new();
        as_object(parser.parse(br#"{"kept": 1}"#).unwrap())
    };
    assert_eq!(object.get("kept").unwrap().as_i64(), Some(1));
}

#[test]
fn frozen_values_survive_reuse() {
    let mut parser = Parser::new();
    let first = as_object(parser.parse(br#"{"a": 1}"#).unwrap());
    let frozen = first.to_map().unwrap();
    parser.parse(b"[]").unwrap();

    // The view is stale, the frozen copy is plain data.
    assert!(matches!(first.len(), Err(Error::Stale)));
    assert_eq!(frozen.get("a"), Some(&Value::I64(1)));
}

#[test]
fn scalar_documents_parse_to_scalar_roots() {
    let mut parser = Parser::new();
    assert!(matches!(parser.parse(b"true").unwrap(), LazyValue::Bool(true)));
    assert!(parser.parse(b"null").unwrap().is_null());
}

#[test]
fn module_constants_match_the_collaborator_contract() {
    assert_eq!(MAXSIZE_BYTES, 0xFFFF_FFFF);
    assert_eq!(PADDING, 32);
    assert_eq!(DEFAULT_MAX_DEPTH, 1024);
    assert!(!VERSION.is_empty());
    assert_eq!(Parser::new().max_capacity(), MAXSIZE_BYTES);
}

#[test]
fn the_backend_registry_is_exposed() {
    let implementations = available_implementations();
    assert!(implementations.iter().any(|i| i.name() == "fallback"));
    for implementation in implementations {
        assert!(!implementation.name().is_empty());
        assert!(!implementation.description().is_empty());
    }
}
