//! Bearer token type.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// An opaque bearer token for authenticated API requests.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or cannot be sent in an HTTP
    /// header.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(InvalidInputError::Token {
                reason: "token must not be empty".to_string(),
            }
            .into());
        }
        if token.chars().any(|c| c.is_control() || !c.is_ascii()) {
            return Err(InvalidInputError::Token {
                reason: "token contains characters not allowed in a header".to_string(),
            }
            .into());
        }
        Ok(Self(token))
    }

    /// Returns the token value.
    ///
    /// # Security
    ///
    /// Use only when constructing authorization headers or persisting the
    /// session.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_value_in_debug() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn rejects_empty_token() {
        assert!(AuthToken::new("").is_err());
        assert!(AuthToken::new("   ").is_err());
    }

    #[test]
    fn rejects_header_breaking_characters() {
        assert!(AuthToken::new("tok\r\nX-Evil: 1").is_err());
    }

    #[test]
    fn bearer_header_value() {
        let token = AuthToken::new("tok-123").unwrap();
        assert_eq!(token.bearer(), "Bearer tok-123");
    }
}
