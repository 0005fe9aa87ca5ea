//! Exchange access
//!
//! This module contains everything that talks to the remote exchange:
//! - `client` - Signed REST client for USDT-M Futures
//! - `error` - Client-level error types
//! - `signer` - HMAC-SHA256 request signing
//! - `time_sync` - Server clock offset

pub mod client;
pub mod error;
pub mod signer;
pub mod time_sync;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::models::{AccountInfo, OrderReceipt, OrderSide, TimeInForce};

pub use client::FuturesClient;
pub use error::{ClientError, ClientResult};
pub use signer::HmacSigner;
pub use time_sync::ClockOffset;

/// Trading client trait - the order submission surface of an exchange
///
/// Arguments arrive already normalized. Implementations perform exactly one
/// request per call and never retry.
#[async_trait]
pub trait TradingClient: Send + Sync {
    /// Place a MARKET order
    async fn submit_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> ClientResult<OrderReceipt>;

    /// Place a LIMIT order
    async fn submit_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> ClientResult<OrderReceipt>;

    /// Place a stop-limit order (exchange type `STOP`)
    async fn submit_stop_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> ClientResult<OrderReceipt>;

    /// Fetch the account snapshot
    async fn get_account_info(&self) -> ClientResult<AccountInfo>;
}
