#![no_main]

use libfuzzer_sys::fuzz_target;
use tapedom::{LazyValue, Parser};

// Arbitrary bytes must never panic the view layer, and a document that
// parses once must freeze to the same value it parses to recursively.
fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new();
    let Ok(root) = parser.parse(data) else {
        return;
    };

    match &root {
        LazyValue::Object(object) => {
            let _ = object.keys();
            let _ = object.values();
            let _ = object.at_pointer("/0");
            for pair in object {
                pair.expect("fresh views cannot be stale");
            }
        }
        LazyValue::Array(array) => {
            let _ = array.get(-1);
            let _ = array.slice(None, None, -1);
            for item in array {
                item.expect("fresh views cannot be stale");
            }
        }
        _ => {}
    }

    let frozen = root.to_value().expect("fresh views cannot be stale");
    let mut reparse = Parser::new();
    let direct = reparse
        .parse_recursive(data)
        .expect("input parsed once already");
    assert_eq!(frozen, direct);
});
