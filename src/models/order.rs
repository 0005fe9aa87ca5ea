use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side: Buy or Sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl FromStr for OrderSide {
    type Err = ();

    /// Case-insensitive parse of `BUY` / `SELL`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP_LIMIT",
        }
    }

    /// LIMIT and STOP_LIMIT orders rest on the book at a limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::StopLimit)
    }

    pub fn requires_stop_price(&self) -> bool {
        matches!(self, OrderType::StopLimit)
    }
}

impl FromStr for OrderType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-in-force sent with resting orders. Only good-till-cancelled is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Good-Till-Cancelled: remains active until filled or cancelled
    #[default]
    GTC,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GTC => "GTC",
        }
    }
}

/// Untrusted numeric input: either text from the command line or a JSON number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Empty text counts as "not supplied"
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::Number(_) => false,
        }
    }

    /// Parse into a decimal. Text accepts plain and scientific notation.
    ///
    /// A non-zero number too small for 28 decimal places is unparseable
    /// rather than zero, matching the same value given as text.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            RawValue::Number(n) if n.is_finite() => Decimal::try_from(*n)
                .ok()
                .filter(|d| !d.is_zero() || *n == 0.0),
            RawValue::Number(_) => None,
            RawValue::Text(s) => {
                let trimmed = s.trim();
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .ok()
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(f64::from(value))
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

/// Order parameters exactly as the user supplied them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: RawValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<RawValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<RawValue>,
}

impl OrderRequest {
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        order_type: impl Into<String>,
        quantity: impl Into<RawValue>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side: side.into(),
            order_type: order_type.into(),
            quantity: quantity.into(),
            price: None,
            stop_price: None,
        }
    }

    pub fn with_price(mut self, price: impl Into<RawValue>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_stop_price(mut self, stop_price: impl Into<RawValue>) -> Self {
        self.stop_price = Some(stop_price.into());
        self
    }
}

/// Per-type order parameters. Prices exist only on the variants that need them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Market,
    Limit {
        price: Decimal,
    },
    StopLimit {
        price: Decimal,
        #[serde(rename = "stopPrice")]
        stop_price: Decimal,
    },
}

/// A fully validated, normalized order ready for submission.
///
/// Only the validator constructs this type, so holding one means every field
/// required by its order type is present and positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedOrder {
    symbol: String,
    side: OrderSide,
    quantity: Decimal,
    #[serde(flatten)]
    kind: OrderKind,
}

impl ValidatedOrder {
    pub(crate) fn new(symbol: String, side: OrderSide, quantity: Decimal, kind: OrderKind) -> Self {
        Self {
            symbol,
            side,
            quantity,
            kind,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn order_type(&self) -> OrderType {
        match self.kind {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
        }
    }

    pub fn price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::Market => None,
            OrderKind::Limit { price } | OrderKind::StopLimit { price, .. } => Some(price),
        }
    }

    pub fn stop_price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::StopLimit { stop_price, .. } => Some(stop_price),
            _ => None,
        }
    }
}

impl fmt::Display for ValidatedOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.order_type(), self.side, self.quantity, self.symbol)?;
        if let Some(price) = self.price() {
            write!(f, " @ {}", price)?;
        }
        if let Some(stop_price) = self.stop_price() {
            write!(f, " (stop: {})", stop_price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_parse_is_case_insensitive() {
        assert_eq!("buy".parse::<OrderSide>(), Ok(OrderSide::Buy));
        assert_eq!("SeLL".parse::<OrderSide>(), Ok(OrderSide::Sell));
        assert!("hold".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_order_type_requirements() {
        assert_eq!("stop_limit".parse::<OrderType>(), Ok(OrderType::StopLimit));
        assert!(!OrderType::Market.requires_price());
        assert!(OrderType::Limit.requires_price());
        assert!(!OrderType::Limit.requires_stop_price());
        assert!(OrderType::StopLimit.requires_stop_price());
    }

    #[test]
    fn test_raw_value_parsing() {
        assert_eq!(RawValue::from(" 1.5 ").to_decimal(), Some(dec!(1.5)));
        assert_eq!(RawValue::from("1e-3").to_decimal(), Some(dec!(0.001)));
        assert_eq!(RawValue::from(100.5).to_decimal(), Some(dec!(100.5)));
        assert_eq!(RawValue::from("abc").to_decimal(), None);
        assert_eq!(RawValue::Number(f64::NAN).to_decimal(), None);
        assert!(RawValue::from("  ").is_blank());
    }

    #[test]
    fn test_number_below_decimal_precision_is_unparseable() {
        assert_eq!(RawValue::from(1e-30).to_decimal(), None);
        assert_eq!(RawValue::from("1e-30").to_decimal(), None);
        assert_eq!(RawValue::from(0.0).to_decimal(), Some(Decimal::ZERO));
        assert_eq!(RawValue::from(-0.0).to_decimal(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_time_in_force_is_good_till_cancelled() {
        assert_eq!(TimeInForce::default(), TimeInForce::GTC);
        assert_eq!(TimeInForce::default().as_str(), "GTC");
        assert_eq!(serde_json::to_string(&TimeInForce::GTC).unwrap(), r#""GTC""#);
    }

    #[test]
    fn test_raw_request_from_json() {
        let request: OrderRequest = serde_json::from_str(
            r#"{"symbol":"ethusdt","side":"sell","orderType":"limit","quantity":1,"price":"2000"}"#,
        )
        .unwrap();

        assert_eq!(request.quantity, RawValue::Number(1.0));
        assert_eq!(request.price, Some(RawValue::Text("2000".to_string())));
        assert_eq!(request.stop_price, None);
    }

    #[test]
    fn test_validated_order_serializes_normalized_shape() {
        let order = ValidatedOrder::new(
            "BNBUSDT".to_string(),
            OrderSide::Buy,
            dec!(1),
            OrderKind::StopLimit {
                price: dec!(300),
                stop_price: dec!(295),
            },
        );

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["symbol"], "BNBUSDT");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["type"], "STOP_LIMIT");
        assert_eq!(json["stopPrice"], "295");
        assert_eq!(order.to_string(), "STOP_LIMIT BUY 1 BNBUSDT @ 300 (stop: 295)");
    }
}
