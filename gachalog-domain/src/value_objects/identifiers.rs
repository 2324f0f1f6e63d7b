// Identifier value objects

use std::fmt;

use thiserror::Error;

/// Account uid as uploaded. It ends up as a file name, so only
/// `[A-Za-z0-9_-]` is accepted. Built only through [`UserId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserIdError {
    #[error("user id is empty")]
    Empty,
    #[error("user id contains invalid characters")]
    InvalidCharacters,
}

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserIdError::Empty);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UserIdError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
