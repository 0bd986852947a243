// Write a value at a path. Object keys may be created along the way; arrays
// are never created or grown. The tree is validated before it is touched, so
// a rejected call leaves it unchanged.
use std::mem;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{ErrorKind, PathError, SetError};
use crate::get::step;
use crate::path::{self, JsonPath, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Allow absent object keys to be created. Array growth is never allowed.
    pub create_keys: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self { create_keys: true }
    }
}

impl SetOptions {
    /// Only overwrite existing slots.
    pub fn strict() -> Self {
        Self { create_keys: false }
    }
}

/// Store `value` at `path`, returning whatever it displaced.
///
/// On failure the tree is untouched and `value` comes back inside the error.
pub fn set(
    root: &mut Value,
    path: &str,
    value: Value,
    opts: SetOptions,
) -> Result<Option<Value>, SetError> {
    match path::parse(path) {
        Ok(parsed) => set_path(root, &parsed, value, opts),
        Err(e) => {
            debug!(path, error = %e, "set rejected");
            Err(SetError::new(e, value))
        }
    }
}

pub fn set_path(
    root: &mut Value,
    path: &JsonPath,
    value: Value,
    opts: SetOptions,
) -> Result<Option<Value>, SetError> {
    // the root itself cannot be replaced
    let Some((last, parents)) = path.split_last() else {
        return Err(SetError::new(PathError::unpositioned(ErrorKind::InvalidPath), value));
    };
    if let Err(e) = check(root, parents, last, opts) {
        debug!(path = %path, error = %e, "set rejected");
        return Err(SetError::new(e, value));
    }
    let parent = match descend(root, parents) {
        Ok(p) => p,
        Err(e) => return Err(SetError::new(e, value)),
    };
    let old = match (last, parent) {
        (Token::Key { name, .. }, Value::Object(map)) => map.insert(name.clone(), value),
        (Token::Index { index, offset }, Value::Array(items)) => match items.get_mut(*index) {
            Some(slot) => Some(mem::replace(slot, value)),
            None => {
                return Err(SetError::new(
                    PathError::at(ErrorKind::IndexOutOfBound, *offset),
                    value,
                ));
            }
        },
        (Token::Key { offset, .. }, _) => {
            return Err(SetError::new(PathError::at(ErrorKind::ObjectExpected, *offset), value));
        }
        (Token::Index { offset, .. }, _) => {
            return Err(SetError::new(PathError::at(ErrorKind::ArrayExpected, *offset), value));
        }
    };
    debug!(path = %path, replaced = old.is_some(), "set");
    Ok(old)
}

// Read-only dry run of the walk. `None` marks a slot that the write would
// create as a fresh object.
fn check(root: &Value, parents: &[Token], last: &Token, opts: SetOptions) -> Result<(), PathError> {
    let mut cur = Some(root);
    for tok in parents {
        cur = match (cur, tok) {
            (Some(v), _) => match step(v, tok) {
                Ok(next) => Some(next),
                Err(e) if e.kind == ErrorKind::KeyNotFound && opts.create_keys => None,
                Err(e) => return Err(e),
            },
            (None, Token::Key { .. }) => None,
            (None, Token::Index { offset, .. }) => {
                return Err(PathError::at(ErrorKind::NewArrayNotAllowed, *offset));
            }
        };
    }
    match (cur, last) {
        (Some(v), Token::Key { name, offset }) => {
            let map = v
                .as_object()
                .ok_or(PathError::at(ErrorKind::ObjectExpected, *offset))?;
            if !opts.create_keys && !map.contains_key(name) {
                return Err(PathError::at(ErrorKind::KeyNotFound, *offset));
            }
            Ok(())
        }
        (Some(v), Token::Index { index, offset }) => {
            let items = v
                .as_array()
                .ok_or(PathError::at(ErrorKind::ArrayExpected, *offset))?;
            if *index >= items.len() {
                return Err(PathError::at(ErrorKind::IndexOutOfBound, *offset));
            }
            Ok(())
        }
        (None, Token::Key { .. }) => Ok(()),
        (None, Token::Index { offset, .. }) => {
            Err(PathError::at(ErrorKind::NewArrayNotAllowed, *offset))
        }
    }
}

fn descend<'v>(root: &'v mut Value, parents: &[Token]) -> Result<&'v mut Value, PathError> {
    let mut cur = root;
    for tok in parents {
        trace!(segment = %tok, "descend");
        cur = match (tok, cur) {
            (Token::Key { name, .. }, Value::Object(map)) => map
                .entry(name.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            (Token::Index { index, offset }, Value::Array(items)) => items
                .get_mut(*index)
                .ok_or(PathError::at(ErrorKind::IndexOutOfBound, *offset))?,
            (Token::Key { offset, .. }, _) => {
                return Err(PathError::at(ErrorKind::ObjectExpected, *offset));
            }
            (Token::Index { offset, .. }, _) => {
                return Err(PathError::at(ErrorKind::ArrayExpected, *offset));
            }
        };
    }
    Ok(cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fail(root: &mut Value, path: &str) -> (ErrorKind, i64) {
        let before = root.clone();
        let e = set(root, path, json!(21), SetOptions::default()).unwrap_err();
        assert_eq!(*root, before, "tree modified by failed set of {}", path);
        (e.kind(), e.offset())
    }

    #[test]
    fn returns_displaced_value() {
        let mut v = json!({"a": 1, "arr": [1, 2]});
        let old = set(&mut v, "$.a", json!(2), SetOptions::default()).unwrap();
        assert_eq!(old, Some(json!(1)));
        let old = set(&mut v, "$.b", json!(3), SetOptions::default()).unwrap();
        assert_eq!(old, None);
        let old = set(&mut v, "$.arr[1]", json!(9), SetOptions::default()).unwrap();
        assert_eq!(old, Some(json!(2)));
        assert_eq!(v, json!({"a": 2, "arr": [1, 9], "b": 3}));
    }

    #[test]
    fn creates_intermediate_objects() {
        let mut v = json!({});
        set(&mut v, "$.a.b.c", json!(true), SetOptions::default()).unwrap();
        assert_eq!(v, json!({"a": {"b": {"c": true}}}));
    }

    #[test]
    fn overwrite_keeps_key_order() {
        let mut v = json!({"x": 1, "y": 2, "z": 3});
        set(&mut v, "$.y", json!(5), SetOptions::default()).unwrap();
        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["x", "y", "z"]);
    }

    #[test]
    fn failed_set_hands_value_back() {
        let mut v = json!({"arr": []});
        let e = set(&mut v, "$.arr[0]", json!("keep me"), SetOptions::default()).unwrap_err();
        assert_eq!(e.text(), "array index out of bound");
        assert_eq!(e.into_value(), json!("keep me"));
    }

    #[test]
    fn rejects_without_partial_creation() {
        let mut v = json!({"obj": {}});
        assert_eq!(fail(&mut v, "$.a.b[0]"), (ErrorKind::NewArrayNotAllowed, 5));
        assert_eq!(fail(&mut v, "$.a[0].b"), (ErrorKind::NewArrayNotAllowed, 3));
        assert_eq!(fail(&mut v, "$.obj.x.y[2].z"), (ErrorKind::NewArrayNotAllowed, 9));
        assert!(v.get("a").is_none());
    }

    #[test]
    fn type_mismatch_errors() {
        let mut v = json!({"s": "str", "n": null, "arr": [1, 2]});
        assert_eq!(fail(&mut v, "$.s.k"), (ErrorKind::ObjectExpected, 3));
        assert_eq!(fail(&mut v, "$.n[0]"), (ErrorKind::ArrayExpected, 3));
        assert_eq!(fail(&mut v, "$.arr[5].k"), (ErrorKind::IndexOutOfBound, 5));
        assert_eq!(fail(&mut v, "$[0]"), (ErrorKind::ArrayExpected, 1));
    }

    #[test]
    fn root_cannot_be_replaced() {
        let mut v = json!([1]);
        assert_eq!(fail(&mut v, "$"), (ErrorKind::InvalidPath, -1));
        assert_eq!(fail(&mut v, ""), (ErrorKind::InvalidArgument, -1));
    }

    #[test]
    fn strict_only_overwrites() {
        let mut v = json!({"obj": {"k": 1}});
        let e = set(&mut v, "$.obj.new", json!(2), SetOptions::strict()).unwrap_err();
        assert_eq!((e.kind(), e.offset()), (ErrorKind::KeyNotFound, 5));
        let e = set(&mut v, "$.none.k", json!(2), SetOptions::strict()).unwrap_err();
        assert_eq!((e.kind(), e.offset()), (ErrorKind::KeyNotFound, 1));
        set(&mut v, "$.obj.k", json!(2), SetOptions::strict()).unwrap();
        assert_eq!(v, json!({"obj": {"k": 2}}));
    }

    #[test]
    fn root_array_elements() {
        let mut v = json!([10, {"foo": 11}]);
        set(&mut v, "$[1].foo", json!(12), SetOptions::default()).unwrap();
        set(&mut v, "$[0]", json!(0), SetOptions::default()).unwrap();
        assert_eq!(v, json!([0, {"foo": 12}]));
    }
}
