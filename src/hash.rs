use thiserror::Error;

/// Separator between action tokens inside the location hash.
pub const SEGMENT_SEPARATOR: char = '&';

/// Leading marker of a non-empty location hash.
pub const HASH_PREFIX: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("action token is empty")]
    Empty,
    #[error("action token {token:?} contains reserved character {found:?}")]
    ReservedCharacter { token: String, found: char },
}

/// A validated action token: non-empty, free of `&` and `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionToken(String);

impl ActionToken {
    pub fn parse(raw: &str) -> Result<Self, HashError> {
        if raw.is_empty() {
            return Err(HashError::Empty);
        }
        if let Some(found) = reserved_char(raw) {
            return Err(HashError::ReservedCharacter {
                token: raw.to_owned(),
                found,
            });
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// First reserved character found in `raw`, if any.
pub(crate) fn reserved_char(raw: &str) -> Option<char> {
    raw.chars()
        .find(|&c| c == SEGMENT_SEPARATOR || c == HASH_PREFIX)
}

/// Extend `current` with one more token.
pub fn append(current: &str, token: &str) -> String {
    if current.is_empty() {
        format!("{HASH_PREFIX}{token}")
    } else {
        format!("{current}{SEGMENT_SEPARATOR}{token}")
    }
}

/// Split a location hash back into its tokens.
///
/// A leading `#` is optional and empty segments are dropped, so `""`, `"#"`
/// and `"#&"` all yield no segments.
pub fn segments(hash: &str) -> Vec<&str> {
    let body = hash.strip_prefix(HASH_PREFIX).unwrap_or(hash);
    body.split(SEGMENT_SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect()
}
