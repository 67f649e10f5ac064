use super::self_prelude::*;

/// An offset into an ordered result set, scoped to the store that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub scope: String,
    pub index: i64,
}

#[derive(Debug, Error)]
pub enum CursorError {
    #[error("Cursor is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Cursor is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Cursor is missing its scope separator: {0:?}")]
    MissingSeparator(String),
    #[error("Cursor index is not an integer: {0:?}")]
    InvalidIndex(String),
}

impl Cursor {
    pub fn new(scope: impl Into<String>, index: i64) -> Self {
        Self {
            scope: scope.into(),
            index,
        }
    }

    pub fn encode(&self) -> String {
        encode_cursor(&self.scope, self.index)
    }
}

/// Encode an offset into an opaque cursor string.
pub fn encode_cursor(scope: &str, index: i64) -> String {
    BASE64.encode(format!("{scope}:{index}"))
}

/// Decode a cursor produced by [`encode_cursor`].
///
/// The scope is everything before the last `:`, so scopes may contain colons.
pub fn decode_cursor(cursor: &str) -> Result<Cursor, CursorError> {
    let raw = String::from_utf8(BASE64.decode(cursor)?)?;
    let (scope, index) = raw
        .rsplit_once(':')
        .ok_or_else(|| CursorError::MissingSeparator(raw.clone()))?;
    let index = index
        .parse::<i64>()
        .map_err(|_| CursorError::InvalidIndex(index.to_string()))?;
    Ok(Cursor::new(scope, index))
}
