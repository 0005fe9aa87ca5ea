// Library Crate Root
// lib.rs

// Both binaries (order-bot, account-info) import through lib.rs like an external crate
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod exchange;
pub mod logging;
pub mod models;

// pub use = re-export at crate root
pub use config::{BotConfig, ConfigError};
pub use engine::{validate, BotError, OrderDispatcher, ValidationResult};
pub use exchange::{ClientError, FuturesClient, TradingClient};
pub use models::{OrderKind, OrderReceipt, OrderRequest, OrderSide, OrderType, ValidatedOrder};
