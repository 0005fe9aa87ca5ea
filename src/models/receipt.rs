use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the exchange for a newly placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: i64,
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub orig_qty: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
    pub status: String,
    /// Server timestamp in milliseconds
    #[serde(default, alias = "time")]
    pub update_time: Option<i64>,
    #[serde(default)]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub executed_qty: Option<Decimal>,
    #[serde(default)]
    pub avg_price: Option<Decimal>,
}

impl OrderReceipt {
    /// Server timestamp as a UTC datetime
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.update_time
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

/// Per-asset balance line of the futures account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub asset: String,
    pub wallet_balance: Decimal,
    #[serde(default)]
    pub available_balance: Option<Decimal>,
    #[serde(default)]
    pub unrealized_profit: Option<Decimal>,
}

/// Futures account snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub total_wallet_balance: Decimal,
    #[serde(default)]
    pub available_balance: Option<Decimal>,
    #[serde(default)]
    pub total_unrealized_profit: Option<Decimal>,
    #[serde(default)]
    pub can_trade: Option<bool>,
    #[serde(default)]
    pub assets: Vec<AssetBalance>,
}

impl AccountInfo {
    /// Assets holding a non-zero wallet balance
    pub fn funded_assets(&self) -> impl Iterator<Item = &AssetBalance> {
        self.assets
            .iter()
            .filter(|asset| !asset.wallet_balance.is_zero())
    }
}
