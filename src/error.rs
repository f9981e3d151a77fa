use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Type,
    Conversion,
    Deserialize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>, input: &str, offset: usize) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            location: Some(locate(input, offset)),
        }
    }

    pub(crate) fn type_mismatch(
        expected: &str,
        found: &str,
        input: &str,
        offset: usize,
    ) -> Self {
        Self {
            kind: ErrorKind::Type,
            message: format!("cannot decode {found} into {expected}"),
            location: Some(locate(input, offset)),
        }
    }

    pub(crate) fn type_error(message: impl Into<String>, input: &str, offset: usize) -> Self {
        Self {
            kind: ErrorKind::Type,
            message: message.into(),
            location: Some(locate(input, offset)),
        }
    }

    pub(crate) fn conversion(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Conversion,
            message: message.into(),
            location: None,
        }
    }

    pub(crate) fn deserialize(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Deserialize,
            message: message.into(),
            location: None,
        }
    }

    pub(crate) fn with_location(mut self, input: &str, offset: usize) -> Self {
        self.location = Some(locate(input, offset));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::deserialize(msg.to_string())
    }
}

/// Derive the 1-based line and column of a byte offset by scanning the
/// consumed prefix for ES5 line terminators. `\r\n` counts as a single
/// terminator; the column resets after every terminator.
pub(crate) fn locate(input: &str, offset: usize) -> Location {
    let offset = offset.min(input.len());
    let prefix = &input[..offset];
    let mut line = 1;
    let mut line_start = 0;
    let mut iter = prefix.char_indices().peekable();
    while let Some((idx, ch)) = iter.next() {
        match ch {
            '\n' | '\u{2028}' | '\u{2029}' => {
                line += 1;
                line_start = idx + ch.len_utf8();
            }
            '\r' => {
                line += 1;
                line_start = idx + 1;
                if let Some((next_idx, '\n')) = iter.peek().copied() {
                    iter.next();
                    line_start = next_idx + 1;
                }
            }
            _ => {}
        }
    }
    let column = prefix[line_start..].chars().count() + 1;
    Location {
        offset,
        line,
        column,
    }
}
