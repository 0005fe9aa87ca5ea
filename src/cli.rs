//! Command line arguments of `order-bot`.
//!
//! Every value is taken as a string; parsing and range checks belong to the
//! validator so that all problems are reported together.

use clap::Parser;

use crate::models::{OrderRequest, RawValue};

const EXAMPLES: &str = "\
Examples:
  order-bot --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001
  order-bot --symbol ETHUSDT --side SELL --type LIMIT --quantity 0.1 --price 2000
  order-bot --symbol BNBUSDT --side BUY --type STOP_LIMIT --quantity 1 --price 300 --stop-price 295";

/// Binance Futures Testnet Trading Bot
#[derive(Debug, Clone, Parser)]
#[command(
    name = "order-bot",
    version,
    about = "Binance Futures Testnet Trading Bot",
    after_help = EXAMPLES
)]
pub struct OrderArgs {
    /// Trading symbol (e.g., BTCUSDT)
    #[arg(long)]
    pub symbol: String,

    /// Order side: BUY or SELL
    #[arg(long)]
    pub side: String,

    /// Order type: MARKET, LIMIT, or STOP_LIMIT
    #[arg(long = "type", value_name = "TYPE")]
    pub order_type: String,

    /// Order quantity
    #[arg(long, allow_hyphen_values = true)]
    pub quantity: String,

    /// Order price (required for LIMIT and STOP_LIMIT)
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<String>,

    /// Stop price (required for STOP_LIMIT)
    #[arg(long = "stop-price", allow_hyphen_values = true)]
    pub stop_price: Option<String>,
}

impl OrderArgs {
    /// Raw, unvalidated request built from the arguments
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest {
            symbol: self.symbol.clone(),
            side: self.side.clone(),
            order_type: self.order_type.clone(),
            quantity: RawValue::from(self.quantity.as_str()),
            price: self.price.as_deref().map(RawValue::from),
            stop_price: self.stop_price.as_deref().map(RawValue::from),
        }
    }
}
