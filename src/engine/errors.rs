//! Error types for the validate-then-submit cycle
//!
//! This module centralizes the errors that can end an invocation, so the
//! binary only needs one `match` to decide what to log and what to show.

use thiserror::Error;

use super::validation::ValidationErrors;
use crate::config::ConfigError;
use crate::exchange::ClientError;

/// Errors that can occur while validating or submitting an order
///
/// # Error Categories
///
/// - **Local**: `Validation`, `Configuration` (never reach the network)
/// - **Exchange**: `ClientProtocol` (the exchange answered with an error)
/// - **Transport**: `Transport`, `Cancelled` (the request did not complete)
/// - **Other**: `Unexpected`
#[derive(Debug, Error)]
pub enum BotError {
    /// One or more input rules were violated
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// The exchange rejected the request with a structured error
    #[error("Exchange error (HTTP {status}, code {code}): {message}")]
    ClientProtocol {
        status: u16,
        code: i64,
        message: String,
    },

    /// The request could not complete (connectivity, timeout, encoding)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The in-flight request was cancelled before a response arrived
    #[error("Order submission cancelled")]
    Cancelled,

    /// Missing credentials or invalid settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Anything else
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl BotError {
    /// Wrap a failure outside the order flow, keeping `context` in the message
    pub fn unexpected(context: &str, err: impl std::fmt::Display) -> Self {
        BotError::Unexpected(format!("{}: {}", context, err))
    }

    /// Returns true if the error was raised before any network call
    pub fn is_local(&self) -> bool {
        matches!(self, BotError::Validation(_) | BotError::Configuration(_))
    }

    /// Returns true if the exchange itself answered with an error
    pub fn is_exchange_error(&self) -> bool {
        matches!(self, BotError::ClientProtocol { .. })
    }

    /// Exchange error code, if the exchange supplied one
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            BotError::ClientProtocol { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<ClientError> for BotError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status,
                code,
                message,
            } => BotError::ClientProtocol {
                status,
                code,
                message,
            },
            ClientError::Http { status, body } => BotError::ClientProtocol {
                status,
                code: 0,
                message: body,
            },
            ClientError::Transport(message) => BotError::Transport(message),
            ClientError::Timeout(after) => {
                BotError::Transport(format!("request timed out after {:?}", after))
            }
            ClientError::Encode(message) => {
                BotError::Transport(format!("failed to encode request: {}", message))
            }
            ClientError::Decode(message) => {
                BotError::Transport(format!("failed to decode response: {}", message))
            }
            ClientError::Configuration(message) => BotError::Configuration(message),
        }
    }
}

impl From<ConfigError> for BotError {
    fn from(err: ConfigError) -> Self {
        BotError::Configuration(err.to_string())
    }
}
