//! Order Engine Module
//!
//! This module contains the validate-then-submit core:
//! - `errors` - Error types for one invocation
//! - `validation` - Raw input validation and normalization
//! - `dispatcher` - Routes validated orders to the trading client

pub mod dispatcher;
pub mod errors;
pub mod validation;

// Re-export commonly used types for convenience
pub use dispatcher::{OrderDispatcher, DEFAULT_SUBMIT_TIMEOUT};
pub use errors::BotError;
pub use validation::{
    validate, validate_order_type, validate_price, validate_quantity, validate_side,
    validate_symbol, ValidationErrors, ValidationResult, Violation,
};
