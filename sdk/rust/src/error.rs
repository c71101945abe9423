//! Errors raised by the Appello SDK.
//!
//! Transport and authentication failures are raised as [`SdkError`].
//! GraphQL-level errors are not: they come back inside the
//! [`Response`](crate::typed::Response) envelope.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// What went wrong, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    /// Connection, DNS or TLS failure.
    NetworkError,
    Timeout,
    /// The base URL or an endpoint derived from it is not a valid URL.
    InvalidUrl,
    /// A request could not be built, e.g. a malformed default header.
    InvalidRequest,
    /// The GraphQL endpoint answered with a 5xx status.
    ServerError,
    /// Raised by [`Response::into_result`](crate::typed::Response::into_result)
    /// when the envelope carries errors.
    ExecutionError,
    /// Raised by `into_result` when the envelope has neither errors nor data.
    NoData,
    SerializeError,
    DeserializeError,
    /// An application or user token could not be obtained or renewed.
    AuthError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::ServerError => "SERVER_ERROR",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::NoData => "NO_DATA",
            Self::SerializeError => "SERIALIZE_ERROR",
            Self::DeserializeError => "DESERIALIZE_ERROR",
            Self::AuthError => "AUTH_ERROR",
        }
    }

    /// Returns true if the failure happened below the HTTP layer.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError | Self::Timeout)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An SDK failure: a code, a message, and optional structured context
/// such as the HTTP status.
#[derive(Error, Debug, Clone)]
#[error("[{code}] {message}")]
pub struct SdkError {
    pub code: ErrorCode,
    pub message: String,
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl SdkError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            extensions: None,
        }
    }

    /// Attaches a context value. Values that fail to serialize are dropped.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.extensions
                .get_or_insert_with(HashMap::new)
                .insert(key.into(), value);
        }
        self
    }

    /// Returns a context value attached with [`with_extension`](Self::with_extension).
    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.as_ref()?.get(key)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthError, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServerError, message)
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidUrl, message)
    }

    pub fn is_auth(&self) -> bool {
        self.code == ErrorCode::AuthError
    }

    pub fn is_server_error(&self) -> bool {
        self.code == ErrorCode::ServerError
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::Timeout
        } else if err.is_decode() {
            ErrorCode::DeserializeError
        } else if err.is_builder() {
            ErrorCode::InvalidRequest
        } else {
            ErrorCode::NetworkError
        };
        let mut error = Self::new(code, err.to_string());
        if let Some(status) = err.status() {
            error = error.with_extension("status", status.as_u16());
        }
        error
    }
}

impl From<url::ParseError> for SdkError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_url(err.to_string())
    }
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Converts foreign errors into [`SdkError`].
pub trait ResultExt<T> {
    /// Uses the foreign error's text as the message.
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T>;

    /// Uses `message`, keeping the foreign error's text under the `cause`
    /// extension.
    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn map_sdk_err(self, code: ErrorCode) -> SdkResult<T> {
        self.map_err(|e| SdkError::new(code, e.to_string()))
    }

    fn map_sdk_err_with(self, code: ErrorCode, message: impl Into<String>) -> SdkResult<T> {
        self.map_err(|e| SdkError::new(code, message).with_extension("cause", e.to_string()))
    }
}
