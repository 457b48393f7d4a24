//! Error types for the pylearn libraries.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and token storage failures.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The unified error type for pylearn operations.
///
/// This error type covers all possible failure modes in the client
/// libraries, with explicit variants to allow callers to handle
/// specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, rejected refresh).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// API errors (non-2xx responses, including field validation).
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Token storage errors (I/O, corrupt storage).
    #[error("token store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (invalid base URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
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

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the supplied username/password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No refresh token is stored, so an expired session cannot recover.
    #[error("refresh token missing")]
    RefreshTokenMissing,

    /// The refresh endpoint rejected the refresh token. Stored credentials
    /// have been cleared; the user must authenticate again.
    #[error("session refresh rejected; stored credentials cleared")]
    RefreshRejected {
        #[source]
        source: Box<Error>,
    },
}

/// An error response from the API.
///
/// Any non-2xx response is represented here with its status and the parts
/// of the body the backend conventionally uses: a `detail`/`error` message
/// and/or a per-field validation error map. The body is preserved verbatim
/// for the caller; nothing is interpreted beyond the 401 check used by the
/// refresh pipeline.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Top-level message (`detail` or `error` key, if present).
    pub detail: Option<String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self {
            status,
            detail,
            field_errors: BTreeMap::new(),
        }
    }

    /// Build an API error from a response body, if one was readable.
    ///
    /// The backend reports errors in three shapes: `{"detail": "..."}`,
    /// `{"error": "..."}`, and per-field maps like
    /// `{"password": ["Passwords do not match"]}`. Anything else is kept
    /// as a bare status.
    pub fn from_body(status: u16, body: Option<serde_json::Value>) -> Self {
        let mut error = Self::new(status, None);

        let Some(serde_json::Value::Object(map)) = body else {
            return error;
        };

        for (key, value) in map {
            if matches!(key.as_str(), "detail" | "error" | "message") {
                if let serde_json::Value::String(s) = value {
                    if error.detail.is_none() {
                        error.detail = Some(s);
                    }
                }
                continue;
            }

            if let serde_json::Value::Array(items) = value {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                if !messages.is_empty() {
                    error.field_errors.insert(key, messages);
                }
            }
        }

        error
    }

    /// Check if this is an authorization failure eligible for token refresh.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Check if this is a not-found response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Check if this is a forbidden response (e.g. a locked topic).
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        for (field, messages) in &self.field_errors {
            write!(f, "; {}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Token storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store failed.
    #[error("storage I/O failed: {message}")]
    Io { message: String },

    /// The stored data could not be decoded.
    #[error("stored tokens are corrupt: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
}
