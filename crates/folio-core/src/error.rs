//! Error types for folio.
//!
//! A single error type with explicit variants for transport, API, session,
//! input validation and durable storage failures. Callers match on the
//! variant; the dispatcher never rewrites one variant into another.

use std::fmt;
use thiserror::Error;

/// The unified error type for folio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a failure status or a `success: false` envelope.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session errors raised on the client side.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Client-side validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Durable session storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if this error came from an HTTP 401 response.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(err) if err.is_unauthorized())
    }

    /// Returns the message a user should see for this error.
    ///
    /// API failures show the server's envelope message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(ApiError {
                message: Some(message),
                ..
            }) if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// An API failure: a non-2xx status, or a 2xx status whose envelope says
/// `success: false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Envelope message from the server, if the body carried one.
    pub message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// HTTP 401: the only status that ends the session.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Session errors raised without a server round trip.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An admin operation was attempted with no active session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The login endpoint answered but did not grant a session.
    #[error("login rejected: {message}")]
    LoginRejected { message: String },

    /// The server reported the current token as no longer valid.
    #[error("session is no longer valid: {message}")]
    SessionInvalid { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A form field failed validation.
    #[error("{field}: {reason}")]
    Field { field: String, reason: String },

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid bearer token.
    #[error("invalid token: {reason}")]
    Token { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

impl InvalidInputError {
    /// Shorthand for a field validation failure.
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        InvalidInputError::Field {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Durable storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A persisted file exists but cannot be parsed.
    #[error("corrupt session data in {path}: {message}")]
    Corrupt { path: String, message: String },
}
