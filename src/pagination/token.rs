//! Continuation tokens returned by the asset listing API.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::PaginationError;

/// Text form of the sentinel, as the service spells it.
pub const SENTINEL: &str = "null";

/// Exact length of a non-sentinel token.
pub const TOKEN_LENGTH: usize = 32;

#[allow(clippy::expect_used)]
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{32}$").expect("token regex is valid") // Static pattern, safe to panic
});

/// A cursor identifying one listing page.
///
/// The sentinel plays two roles: it is the token of the first request, and a
/// page returning it has no successor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContinuationToken {
    /// First request / no further pages.
    Sentinel,
    /// Opaque cursor handed out by the service.
    Cursor(String),
}

impl ContinuationToken {
    /// Parses and validates a token.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidTokenFormat`] unless `raw` is `"null"`
    /// or exactly 32 hexadecimal characters.
    pub fn parse(raw: &str) -> Result<Self, PaginationError> {
        let token = Self::from_raw(raw);
        token.validate()?;
        Ok(token)
    }

    /// Wraps a raw value without validating it.
    pub(crate) fn from_raw(raw: &str) -> Self {
        if raw == SENTINEL {
            Self::Sentinel
        } else {
            Self::Cursor(raw.to_string())
        }
    }

    /// Checks the token format.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidTokenFormat`] for a cursor that is not
    /// 32 hexadecimal characters.
    pub fn validate(&self) -> Result<(), PaginationError> {
        match self {
            Self::Sentinel => Ok(()),
            Self::Cursor(value) if TOKEN_PATTERN.is_match(value) => Ok(()),
            Self::Cursor(value) => Err(PaginationError::invalid_token_format(value.as_str())),
        }
    }

    /// Returns true for the sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel)
    }

    /// The `continuationToken` query value, or `None` for the sentinel.
    #[must_use]
    pub fn as_query_value(&self) -> Option<&str> {
        match self {
            Self::Sentinel => None,
            Self::Cursor(value) => Some(value),
        }
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentinel => f.write_str(SENTINEL),
            Self::Cursor(value) => f.write_str(value),
        }
    }
}
