//! Login credentials type.

use std::fmt;

use serde::Serialize;

use crate::Result;
use crate::error::InvalidInputError;
use crate::resources::validate;

/// Minimum password length accepted by the login form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Admin login credentials.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use folio_core::LoginCredentials;
///
/// let creds = LoginCredentials::new("admin@example.com", "hunter22");
/// assert_eq!(creds.email(), "admin@example.com");
/// assert!(creds.validate().is_ok());
/// ```
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    email: String,
    password: String,
}

impl LoginCredentials {
    /// Create new credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    /// Returns the login email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Check the credentials the way the login form does before submitting.
    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() {
            return Err(InvalidInputError::field("email", "Email is required").into());
        }
        if !validate::is_email(&self.email) {
            return Err(InvalidInputError::field("email", "Invalid email address").into());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(InvalidInputError::field(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            )
            .into());
        }
        Ok(())
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_password_in_debug() {
        let creds = LoginCredentials::new("a@b.com", "secret123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn serializes_login_body() {
        let creds = LoginCredentials::new("a@b.com", "secret123");
        let body = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "email": "a@b.com", "password": "secret123" })
        );
    }

    #[test]
    fn validation_rules() {
        assert!(LoginCredentials::new("", "secret123").validate().is_err());
        assert!(LoginCredentials::new("not-an-email", "secret123").validate().is_err());
        assert!(LoginCredentials::new("a@b.com", "12345").validate().is_err());
        assert!(LoginCredentials::new("a@b.com", "123456").validate().is_ok());
    }
}
