//! Trading client error types.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Result type for trading client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by a trading client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The exchange answered with a structured `{"code", "msg"}` error body
    #[error("API error [{code}] (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: i64,
        message: String,
    },

    /// Non-success status whose body was not a structured error
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection failure or request that could not be sent
    #[error("Request error: {0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Request parameters could not be form-encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client could not be constructed from the given settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Returns the exchange error code if available.
    pub fn code(&self) -> Option<i64> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the HTTP status if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } | ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for `-1021` (timestamp outside the receive window).
    pub fn is_timestamp_error(&self) -> bool {
        matches!(self, ClientError::Api { code: -1021, .. })
    }

    /// Build an error from a non-success HTTP response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(err) => ClientError::Api {
                status,
                code: err.code,
                message: err.msg,
            },
            Err(_) => ClientError::Http {
                status,
                body: body.to_string(),
            },
        }
    }
}

impl From<serde_urlencoded::ser::Error> for ClientError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        ClientError::Encode(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ClientError::Transport(format!("connection failed: {}", err))
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Error body returned by the exchange.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}
