// Path expression scanner: `$` followed by `.key` and `[index]` segments.
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorKind, PathError};

/// One segment of a path. `offset` is the byte position of its `.` or `[`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Key { name: String, offset: usize },
    Index { index: usize, offset: usize },
}

impl Token {
    pub fn offset(&self) -> usize {
        match self {
            Token::Key { offset, .. } | Token::Index { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Key { name, .. } => write!(f, ".{}", name),
            Token::Index { index, .. } => write!(f, "[{}]", index),
        }
    }
}

/// A parsed path. No tokens means the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    tokens: Vec<Token>,
}

impl JsonPath {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn split_last(&self) -> Option<(&Token, &[Token])> {
        self.tokens.split_last()
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for t in &self.tokens {
            write!(f, "{}", t)?;
        }
        Ok(())
    }
}

pub fn parse(path: &str) -> Result<JsonPath, PathError> {
    if path.is_empty() {
        return Err(PathError::unpositioned(ErrorKind::InvalidArgument));
    }
    let mut scanner = Scanner { src: path, pos: 0 };
    scanner.root()?;
    let mut tokens = Vec::new();
    while let Some(tok) = scanner.segment()? {
        tokens.push(tok);
    }
    Ok(JsonPath { tokens })
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn root(&mut self) -> Result<(), PathError> {
        if self.peek() != Some(b'$') {
            return Err(PathError::at(ErrorKind::MissingRoot, 0));
        }
        self.pos = 1;
        Ok(())
    }

    fn segment(&mut self) -> Result<Option<Token>, PathError> {
        let start = self.pos;
        match self.peek() {
            None => Ok(None),
            Some(b'.') => {
                let rest = &self.src[start + 1..];
                let len = rest.find(['.', '[', ']']).unwrap_or(rest.len());
                if len == 0 {
                    return Err(PathError::at(ErrorKind::EmptyToken, start));
                }
                self.pos = start + 1 + len;
                Ok(Some(Token::Key { name: rest[..len].to_string(), offset: start }))
            }
            Some(b'[') => {
                let rest = &self.src[start + 1..];
                let close = rest
                    .find(']')
                    .ok_or(PathError::at(ErrorKind::MissingBracket, start))?;
                let index = parse_index(&rest[..close])
                    .ok_or(PathError::at(ErrorKind::InvalidIndex, start))?;
                self.pos = start + 1 + close + 1;
                Ok(Some(Token::Index { index, offset: start }))
            }
            Some(_) => Err(PathError::at(ErrorKind::TrailingChars, start)),
        }
    }
}

// Plain decimal only. Leading zeros and values past usize::MAX are rejected
// rather than truncated.
fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}
