//! jpath-core: restricted JSONPath addressing over serde_json trees
//!
//! Paths are `$` followed by `.key` and `[index]` segments, nothing else:
//! - `get` resolves a path to a node, collapsing every failure to `None`
//! - `try_get` is the same walk with a positioned error
//! - `set` writes at a path; object keys may be created, arrays never grow,
//!   and a rejected write leaves the tree untouched
//! - `doc` has file load/save and child listing helpers for the CLI
//!
pub mod doc;
pub mod error;
pub mod get;
pub mod path;
pub mod set;

pub use doc::{ChildInfo, JsonKind, list_children, load_json_file, write_json_to_file};
pub use error::{DocError, ErrorKind, PathError, SetError};
pub use get::{get, get_mut, try_get};
pub use path::{JsonPath, Token, parse};
pub use set::{SetOptions, set, set_path};
