//! Order Dispatcher
//!
//! Turns a [`ValidatedOrder`] into exactly one trading-client call. The call
//! runs under a timeout and can be cancelled through a [`CancellationToken`];
//! nothing is retried and nothing is compensated on failure.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::errors::BotError;
use crate::exchange::{ClientResult, TradingClient};
use crate::models::{OrderKind, OrderReceipt, TimeInForce, ValidatedOrder};

/// Default upper bound on one submission
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes validated orders to the trading client
#[derive(Debug, Clone)]
pub struct OrderDispatcher {
    timeout: Duration,
    cancel: CancellationToken,
}

impl Default for OrderDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_TIMEOUT)
    }
}

impl OrderDispatcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally owned token, e.g. one cancelled on Ctrl-C
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Submit `order` through `client`.
    ///
    /// LIMIT and STOP_LIMIT orders are sent good-till-cancelled. Client errors
    /// keep their status, code and message when converted to [`BotError`].
    pub async fn submit<C>(&self, order: &ValidatedOrder, client: &C) -> Result<OrderReceipt, BotError>
    where
        C: TradingClient + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return Err(BotError::Cancelled);
        }

        info!("Submitting order: {}", order);

        let call = Self::route(order, client);

        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => {
                warn!("Order submission cancelled: {}", order);
                return Err(BotError::Cancelled);
            }
            result = tokio::time::timeout(self.timeout, call) => result,
        };

        match outcome {
            Ok(Ok(receipt)) => {
                info!(
                    "Order placed: id={} status={} symbol={}",
                    receipt.order_id, receipt.status, receipt.symbol
                );
                Ok(receipt)
            }
            Ok(Err(err)) => {
                debug!("Trading client returned error: {:?}", err);
                Err(BotError::from(err))
            }
            Err(_) => Err(BotError::Transport(format!(
                "order submission timed out after {:?}",
                self.timeout
            ))),
        }
    }

    async fn route<C>(order: &ValidatedOrder, client: &C) -> ClientResult<OrderReceipt>
    where
        C: TradingClient + ?Sized,
    {
        let symbol = order.symbol();
        let side = order.side();
        let quantity = order.quantity();

        match order.kind() {
            OrderKind::Market => client.submit_market_order(symbol, side, quantity).await,
            OrderKind::Limit { price } => {
                client
                    .submit_limit_order(symbol, side, quantity, price, TimeInForce::GTC)
                    .await
            }
            OrderKind::StopLimit { price, stop_price } => {
                client
                    .submit_stop_order(symbol, side, quantity, price, stop_price, TimeInForce::GTC)
                    .await
            }
        }
    }
}
