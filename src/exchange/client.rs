//! REST client for the USDT-M Futures API.
//!
//! Handles request signing, clock offset and response/error decoding. It does
//! not retry: every public method issues exactly one HTTP request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::error::{ClientError, ClientResult};
use super::signer::{HmacSigner, API_KEY_HEADER};
use super::time_sync::{local_now_ms, ClockOffset};
use super::TradingClient;
use crate::config::BotConfig;
use crate::models::{AccountInfo, OrderReceipt, OrderSide, TimeInForce};

/// REST paths used by the client
pub mod endpoints {
    pub const ORDER: &str = "/fapi/v1/order";
    pub const ACCOUNT: &str = "/fapi/v2/account";
    pub const SERVER_TIME: &str = "/fapi/v1/time";
}

/// Exchange-side order type names
mod wire_type {
    pub const MARKET: &str = "MARKET";
    pub const LIMIT: &str = "LIMIT";
    /// Stop-limit: becomes a limit order at `price` once `stopPrice` trades
    pub const STOP: &str = "STOP";
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerTime {
    server_time: i64,
}

/// Signed REST client for USDT-M Futures
pub struct FuturesClient {
    http: Client,
    base_url: String,
    signer: HmacSigner,
    recv_window_ms: u64,
    timeout: Duration,
    clock: ClockOffset,
}

impl FuturesClient {
    /// Create a client from the connection settings.
    ///
    /// Fails with [`ClientError::Configuration`] when credentials are missing.
    pub fn new(config: &BotConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("futures-order-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_http_client(config, http)
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(config: &BotConfig, http: Client) -> ClientResult<Self> {
        config
            .require_credentials()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;
        config
            .validate_settings()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            signer: HmacSigner::new(config.api_key.clone(), config.api_secret.clone()),
            recv_window_ms: config.recv_window_ms,
            timeout: config.request_timeout(),
            clock: ClockOffset::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current clock offset against the server, in milliseconds
    pub fn clock_offset_ms(&self) -> i64 {
        self.clock.offset_ms()
    }

    /// Fetch the server time and store the offset used for request timestamps.
    ///
    /// Returns the new offset in milliseconds.
    pub async fn sync_time(&self) -> ClientResult<i64> {
        let sent_at = local_now_ms();
        let server: ServerTime = self.public_get(endpoints::SERVER_TIME).await?;
        let received_at = local_now_ms();

        let offset = self.clock.record(server.server_time, sent_at, received_at);
        debug!("Server time offset: {} ms", offset);
        Ok(offset)
    }

    /// Build the parameter list of a new order, before signing
    pub fn order_params(
        symbol: &str,
        side: OrderSide,
        order_type: &str,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
        time_in_force: Option<TimeInForce>,
    ) -> Vec<(String, String)> {
        let mut params = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("side".to_string(), side.as_str().to_string()),
            ("type".to_string(), order_type.to_string()),
        ];
        if let Some(tif) = time_in_force {
            params.push(("timeInForce".to_string(), tif.as_str().to_string()));
        }
        params.push(("quantity".to_string(), format_decimal(quantity)));
        if let Some(price) = price {
            params.push(("price".to_string(), format_decimal(price)));
        }
        if let Some(stop_price) = stop_price {
            params.push(("stopPrice".to_string(), format_decimal(stop_price)));
        }
        params
    }

    async fn place_order(&self, params: Vec<(String, String)>) -> ClientResult<OrderReceipt> {
        let receipt: OrderReceipt = self
            .signed_request(Method::POST, endpoints::ORDER, params)
            .await?;
        debug!(
            "Order {} accepted: {} {} {} status={}",
            receipt.order_id, receipt.order_type, receipt.side, receipt.symbol, receipt.status
        );
        Ok(receipt)
    }

    /// Unsigned GET without parameters
    async fn public_get<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET (public) {}", endpoint);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.handle_response(response).await
    }

    /// Signed request: GET sends the query in the URL, other methods in a form body
    async fn signed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        mut params: Vec<(String, String)>,
    ) -> ClientResult<T> {
        let query = self
            .signer
            .sign(&mut params, self.recv_window_ms, self.clock.now_ms())?;
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("{} (signed) {}", method, endpoint);

        let request = if method == Method::GET {
            self.http.get(format!("{}?{}", url, query))
        } else {
            self.http
                .request(method, &url)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(query)
        };

        let response = request
            .header(API_KEY_HEADER, self.signer.api_key())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::Decode(format!("{} - body: {}", e, body)))
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::from(err)
        }
    }
}

#[async_trait]
impl TradingClient for FuturesClient {
    async fn submit_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> ClientResult<OrderReceipt> {
        let params =
            Self::order_params(symbol, side, wire_type::MARKET, quantity, None, None, None);
        self.place_order(params).await
    }

    async fn submit_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> ClientResult<OrderReceipt> {
        let params = Self::order_params(
            symbol,
            side,
            wire_type::LIMIT,
            quantity,
            Some(price),
            None,
            Some(time_in_force),
        );
        self.place_order(params).await
    }

    async fn submit_stop_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        stop_price: Decimal,
        time_in_force: TimeInForce,
    ) -> ClientResult<OrderReceipt> {
        let params = Self::order_params(
            symbol,
            side,
            wire_type::STOP,
            quantity,
            Some(price),
            Some(stop_price),
            Some(time_in_force),
        );
        self.place_order(params).await
    }

    async fn get_account_info(&self) -> ClientResult<AccountInfo> {
        self.signed_request(Method::GET, endpoints::ACCOUNT, Vec::new())
            .await
    }
}

/// Plain decimal text without trailing zeros (`1.500` -> `1.5`)
fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
