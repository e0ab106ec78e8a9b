//! Error types for the symbl library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, HTTP status, authentication, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for symbl operations.
///
/// Retry decisions are made on the variant alone: only [`Error::Status`] is
/// ever retried by the dispatcher.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, cancellation, decode).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A non-2xx HTTP response.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// The authentication endpoint accepted the request but issued no token.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Missing credentials, configuration or call parameters.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A request payload failed its field-presence rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns the HTTP status if this is a [`StatusError`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(e) => Some(e.status),
            _ => None,
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

    /// The caller cancelled the request context.
    #[error("request cancelled")]
    Cancelled,

    /// The request context deadline passed before the response arrived.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// A 2xx body could not be decoded or a request body could not be encoded.
    #[error("serialization error: {message}")]
    Decode { message: String },

    /// Local I/O failure (e.g. reading a file to upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(TransportError::Decode {
            message: err.to_string(),
        })
    }
}

/// A non-2xx HTTP outcome, carrying the originating request and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// HTTP method of the failed request.
    pub method: String,
    /// Full URL of the failed request.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if the body carried one.
    pub message: Option<String>,
}

impl StatusError {
    /// Create a new status error.
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        message: Option<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            status,
            message,
        }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: HTTP {}", self.method, self.url, self.status)?;
        if let Some(ref message) = self.message {
            write!(f, " ({})", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The endpoint answered 2xx but the access token was empty.
    #[error("authentication failed: server returned an empty access token")]
    EmptyToken,
}

/// Input errors detected before any network access.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A required credential field is empty.
    #[error("missing credential field '{field}'")]
    MissingCredential { field: &'static str },

    /// A required environment variable is absent or empty.
    #[error("environment variable {var} not set")]
    MissingEnv { var: &'static str },

    /// A required call parameter (usually a path segment) is empty.
    #[error("parameter '{name}' must not be empty")]
    EmptyParameter { name: &'static str },

    /// A media URI could not be used.
    #[error("invalid URI '{value}': {reason}")]
    InvalidUri { value: String, reason: String },

    /// A configured base URL is malformed.
    #[error("invalid URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// A structured request failed field-presence validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for fields: {}", .fields.join(", "))]
pub struct ValidationError {
    /// Wire names of every violated field.
    pub fields: Vec<String>,
}
