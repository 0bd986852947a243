use std::fmt;

/// Failure category. Each kind maps to one fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    MissingRoot,
    TrailingChars,
    EmptyToken,
    MissingBracket,
    InvalidIndex,
    InvalidPath,
    ObjectExpected,
    ArrayExpected,
    NewArrayNotAllowed,
    IndexOutOfBound,
    KeyNotFound,
}

impl ErrorKind {
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::MissingRoot => "path should start with $",
            ErrorKind::TrailingChars => "unexpected trailing chars",
            ErrorKind::EmptyToken => "empty token",
            ErrorKind::MissingBracket => "missing ']'?",
            ErrorKind::InvalidIndex => "invalid array index",
            ErrorKind::InvalidPath => "invalid path",
            ErrorKind::ObjectExpected => "object expected",
            ErrorKind::ArrayExpected => "array expected",
            ErrorKind::NewArrayNotAllowed => "new array is not allowed",
            ErrorKind::IndexOutOfBound => "array index out of bound",
            ErrorKind::KeyNotFound => "key not found",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Parse or resolution failure with the byte offset it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub kind: ErrorKind,
    pub position: Option<usize>,
}

impl PathError {
    pub fn at(kind: ErrorKind, position: usize) -> Self {
        Self { kind, position: Some(position) }
    }

    pub fn unpositioned(kind: ErrorKind) -> Self {
        Self { kind, position: None }
    }

    pub fn text(&self) -> &'static str {
        self.kind.message()
    }

    /// Position as a signed offset; -1 when not applicable.
    pub fn offset(&self) -> i64 {
        self.position.map_or(-1, |p| p as i64)
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(p) => write!(f, "{} at {}", self.kind, p),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for PathError {}

/// A rejected `set`. The value that could not be stored is handed back.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct SetError {
    pub error: PathError,
    value: serde_json::Value,
}

impl SetError {
    pub(crate) fn new(error: PathError, value: serde_json::Value) -> Self {
        Self { error, value }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind
    }

    pub fn text(&self) -> &'static str {
        self.error.text()
    }

    pub fn offset(&self) -> i64 {
        self.error.offset()
    }

    pub fn into_value(self) -> serde_json::Value {
        self.value
    }
}

/// Loading or writing a JSON document on disk.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: invalid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty file: {0}")]
    Empty(String),
}
