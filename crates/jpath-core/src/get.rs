use serde_json::Value;

use crate::error::{ErrorKind, PathError};
use crate::path::{self, JsonPath, Token};

/// Resolve `path` against `root`. Any parse or lookup failure is `None`.
pub fn get<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    try_get(root, path).ok()
}

/// Like [`get`], but says why the lookup failed and where.
pub fn try_get<'v>(root: &'v Value, path: &str) -> Result<&'v Value, PathError> {
    let parsed = path::parse(path)?;
    resolve(root, &parsed)
}

pub fn get_mut<'v>(root: &'v mut Value, path: &str) -> Option<&'v mut Value> {
    let parsed = path::parse(path).ok()?;
    let mut cur = root;
    for tok in parsed.tokens() {
        cur = match (tok, cur) {
            (Token::Key { name, .. }, Value::Object(map)) => map.get_mut(name)?,
            (Token::Index { index, .. }, Value::Array(items)) => items.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(cur)
}

pub fn resolve<'v>(root: &'v Value, path: &JsonPath) -> Result<&'v Value, PathError> {
    path.tokens().iter().try_fold(root, |cur, tok| step(cur, tok))
}

pub(crate) fn step<'v>(cur: &'v Value, tok: &Token) -> Result<&'v Value, PathError> {
    match tok {
        Token::Key { name, offset } => {
            let map = cur
                .as_object()
                .ok_or(PathError::at(ErrorKind::ObjectExpected, *offset))?;
            map.get(name)
                .ok_or(PathError::at(ErrorKind::KeyNotFound, *offset))
        }
        Token::Index { index, offset } => {
            let items = cur
                .as_array()
                .ok_or(PathError::at(ErrorKind::ArrayExpected, *offset))?;
            items
                .get(*index)
                .ok_or(PathError::at(ErrorKind::IndexOutOfBound, *offset))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_path_returns_root() {
        let v = json!({"a": 1});
        assert!(std::ptr::eq(get(&v, "$").unwrap(), &v));
    }

    #[test]
    fn empty_or_malformed_path_is_not_found() {
        let v = json!({"a": 1});
        assert!(get(&v, "").is_none());
        assert!(get(&v, "a").is_none());
        assert!(get(&v, "$a").is_none());
        assert!(get(&v, "$.a[").is_none());
    }

    #[test]
    fn try_get_reports_position() {
        let v = json!({"obj": {"arr": [1]}});
        let e = try_get(&v, "$.obj.arr[4]").unwrap_err();
        assert_eq!(e.kind, ErrorKind::IndexOutOfBound);
        assert_eq!(e.position, Some(9));
        let e = try_get(&v, "$.obj.missing").unwrap_err();
        assert_eq!(e.kind, ErrorKind::KeyNotFound);
        assert_eq!(e.position, Some(5));
        let e = try_get(&v, "$.obj[0]").unwrap_err();
        assert_eq!(e.kind, ErrorKind::ArrayExpected);
        let e = try_get(&v, "$.obj.arr.x").unwrap_err();
        assert_eq!(e.kind, ErrorKind::ObjectExpected);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut v = json!({"arr": [1, {"k": 2}]});
        *get_mut(&mut v, "$.arr[1].k").unwrap() = json!("x");
        assert_eq!(v, json!({"arr": [1, {"k": "x"}]}));
        assert!(get_mut(&mut v, "$.arr[2]").is_none());
        assert!(get_mut(&mut v, "$.arr.k").is_none());
    }
}
