//! JSON pointer resolution (RFC 6901) against tape elements.

use std::borrow::Cow;

use tracing::trace;

use crate::element::{Element, ElementType};
use crate::{Error, Result};

/// Resolves `pointer` starting from `root`, descending one reference token
/// at a time. The empty pointer is the root itself; any other pointer must
/// begin with `/`. The first token that fails to resolve short-circuits the
/// rest.
pub(crate) fn resolve(root: Element, pointer: &str) -> Result<Element> {
    root.ensure_current()?;
    if pointer.is_empty() {
        return Ok(root);
    }
    if !pointer.starts_with('/') {
        return Err(Error::MalformedPointer(format!(
            "pointer must be empty or begin with '/', got {pointer:?}"
        )));
    }
    trace!(pointer, "resolving json pointer");

    let mut current = root;
    for token in pointer[1..].split('/') {
        let doc = current.doc().clone();
        current = match current.tag() {
            ElementType::Object => {
                let key = decode_token(token);
                let value_pos = doc
                    .object_value(current.pos(), &key)?
                    .ok_or_else(|| Error::PointerNotFound(pointer.to_owned()))?;
                Element::new(doc, value_pos)
            }
            ElementType::Array => {
                let index = array_index(token)?;
                let child_pos = doc
                    .array_child(current.pos(), index)
                    .ok_or_else(|| Error::PointerNotFound(pointer.to_owned()))?;
                Element::new(doc, child_pos)
            }
            found => {
                return Err(Error::UnexpectedType {
                    expected: "object or array",
                    found,
                });
            }
        };
    }
    Ok(current)
}

/// Undoes the two escape sequences: `~1` becomes `/`, then `~0` becomes `~`.
/// The order matters; running them the other way would turn `~01` into `/`.
fn decode_token(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}

/// Parses an array reference token: a non-negative base-10 integer with no
/// leading zeros. The standard's `-` token addresses one past the end, where
/// there is never anything to read, so it resolves to not-found by
/// definition.
fn array_index(token: &str) -> Result<usize> {
    if token == "-" {
        return Err(Error::PointerNotFound(token.to_owned()));
    }
    let malformed = || {
        Error::MalformedPointer(format!(
            "array reference token must be a non-negative integer, got {token:?}"
        ))
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    if token.len() > 1 && token.starts_with('0') {
        return Err(malformed());
    }
    // An index too large for usize is necessarily past the end.
    token
        .parse::<usize>()
        .map_err(|_| Error::PointerNotFound(token.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_decode_in_the_mandated_order() {
        assert_eq!(decode_token("plain"), "plain");
        assert_eq!(decode_token("a~1b"), "a/b");
        assert_eq!(decode_token("a~0b"), "a~b");
        assert_eq!(decode_token("~01"), "~1");
        assert_eq!(decode_token("~10"), "/0");
    }

    #[test]
    fn array_tokens_reject_leading_zeros_and_junk() {
        assert_eq!(array_index("0").unwrap(), 0);
        assert_eq!(array_index("10").unwrap(), 10);
        assert!(matches!(array_index("01"), Err(Error::MalformedPointer(_))));
        assert!(matches!(array_index(""), Err(Error::MalformedPointer(_))));
        assert!(matches!(array_index("1x"), Err(Error::MalformedPointer(_))));
        assert!(matches!(array_index("-1"), Err(Error::MalformedPointer(_))));
        assert!(matches!(array_index("-"), Err(Error::PointerNotFound(_))));
    }

    #[test]
    fn oversized_indices_are_simply_past_the_end() {
        let token = "99999999999999999999999999";
        assert!(matches!(
            array_index(token),
            Err(Error::PointerNotFound(_))
        ));
    }
}
