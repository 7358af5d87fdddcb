//! Validated email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string failed to parse as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("empty string")]
    Empty,
    #[error("longer than {0} bytes")]
    TooLong(usize),
    #[error("contains whitespace")]
    Whitespace,
    #[error("no '@' separator")]
    MissingAt,
    #[error("nothing before the '@'")]
    EmptyLocal,
    #[error("nothing after the '@'")]
    EmptyDomain,
}

/// A structurally plausible email address.
///
/// Validation is intentionally shallow: bounded length, no whitespace, one
/// separating `@` with something on both sides. Account emails read back
/// from the store go through [`Email::parse`], so a mangled row surfaces as
/// a corruption error instead of round-tripping silently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// RFC 5321 caps a forward path at 254 octets.
    pub const MAX_BYTES: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found, in check order: empty
    /// input, over-long input, embedded whitespace, missing `@`, empty
    /// local part, empty domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_BYTES {
            return Err(EmailError::TooLong(Self::MAX_BYTES));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }
        match s.split_once('@') {
            None => Err(EmailError::MissingAt),
            Some(("", _)) => Err(EmailError::EmptyLocal),
            Some((_, "")) => Err(EmailError::EmptyDomain),
            Some(_) => Ok(Self(s.to_owned())),
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
