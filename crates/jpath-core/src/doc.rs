use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{DocError, PathError};
use crate::get::try_get;

pub fn load_json_file(path: &Path) -> Result<Value, DocError> {
    let data = fs::read(path).map_err(|source| DocError::Io { path: path.display().to_string(), source })?;
    if data.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(DocError::Empty(path.display().to_string()));
    }
    serde_json::from_slice(&data).map_err(|source| DocError::Json { path: path.display().to_string(), source })
}

pub fn write_json_to_file(path: &Path, value: &Value) -> Result<(), DocError> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|source| DocError::Json { path: path.display().to_string(), source })?;
    fs::write(path, s).map_err(|source| DocError::Io { path: path.display().to_string(), source })
}

// -------- Tree browsing --------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind { Null, Bool, Number, String, Object, Array }

#[derive(Debug, Clone)]
pub struct ChildInfo { pub key_or_index: String, pub kind: JsonKind, pub len: Option<usize> }

pub fn kind_of(v: &Value) -> JsonKind {
    match v {
        Value::Null => JsonKind::Null,
        Value::Bool(_) => JsonKind::Bool,
        Value::Number(_) => JsonKind::Number,
        Value::String(_) => JsonKind::String,
        Value::Object(_) => JsonKind::Object,
        Value::Array(_) => JsonKind::Array,
    }
}

fn container_len(v: &Value) -> Option<usize> {
    match v { Value::Array(a) => Some(a.len()), Value::Object(m) => Some(m.len()), _ => None }
}

/// Direct children of the container at `path`. Scalars have none.
pub fn list_children(value: &Value, path: &str) -> Result<Vec<ChildInfo>, PathError> {
    let node = try_get(value, path)?;
    let out = match node {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| ChildInfo { key_or_index: k.clone(), kind: kind_of(v), len: container_len(v) })
            .collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| ChildInfo { key_or_index: i.to_string(), kind: kind_of(v), len: container_len(v) })
            .collect(),
        _ => Vec::new(),
    };
    Ok(out)
}
