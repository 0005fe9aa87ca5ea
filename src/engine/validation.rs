//! Order input validation
//!
//! This module gates order submission: raw user input goes in, and either a
//! normalized [`ValidatedOrder`] or the full list of violated rules comes out.
//! Every rule is evaluated, so a rejected request reports all of its problems
//! at once instead of the first one only.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{OrderKind, OrderRequest, OrderSide, OrderType, RawValue, ValidatedOrder};

/// Suffix accepted by the symbol rule regardless of the rest of the string
const QUOTE_SUFFIX: &str = "USDT";

const MIN_SYMBOL_LEN: usize = 6;

/// Separator used when violations are flattened into one message
pub const VIOLATION_SEPARATOR: &str = " | ";

// ============================================================================
// Violations
// ============================================================================

/// A single broken validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Invalid symbol format (e.g., BTCUSDT)")]
    InvalidSymbol,

    #[error("Side must be BUY or SELL")]
    InvalidSide,

    #[error("Order type must be MARKET, LIMIT, or STOP_LIMIT")]
    InvalidOrderType,

    #[error("Quantity must be a positive number")]
    InvalidQuantity,

    /// Missing or non-positive price on a LIMIT / STOP_LIMIT order
    #[error("Price is required and must be positive for LIMIT orders")]
    InvalidPrice,

    /// Missing or non-positive stop price on a STOP_LIMIT order
    #[error("Stop price is required and must be positive for STOP_LIMIT orders")]
    InvalidStopPrice,
}

/// Every rule a rejected request violated, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Human-readable aggregate, e.g. `Invalid symbol format (e.g., BTCUSDT) | Side must be BUY or SELL`
    pub fn message(&self) -> String {
        self.violations
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join(VIOLATION_SEPARATOR)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationErrors {}

/// Outcome of validating one raw request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(ValidatedOrder),
    Invalid(ValidationErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Aggregate message for a rejected request, empty when valid
    pub fn error_message(&self) -> String {
        match self {
            ValidationResult::Valid(_) => String::new(),
            ValidationResult::Invalid(errors) => errors.message(),
        }
    }

    pub fn into_result(self) -> Result<ValidatedOrder, ValidationErrors> {
        match self {
            ValidationResult::Valid(order) => Ok(order),
            ValidationResult::Invalid(errors) => Err(errors),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Valid(order) => write!(f, "valid: {}", order),
            ValidationResult::Invalid(errors) => write!(f, "invalid: {}", errors),
        }
    }
}

// ============================================================================
// Individual Validation Functions
// ============================================================================

/// Validate trading symbol format
///
/// # Rules
/// - At least six characters long
/// - Either made only of uppercase letters, or ending in the literal `USDT`
///
/// The second branch accepts any casing before the suffix, so `btcUSDT`
/// passes. Normalization upper-cases the symbol afterwards.
pub fn validate_symbol(symbol: &str) -> bool {
    if symbol.is_empty() || symbol.chars().count() < MIN_SYMBOL_LEN {
        return false;
    }
    is_uppercase_alphabetic(symbol) || symbol.ends_with(QUOTE_SUFFIX)
}

/// All characters alphabetic, at least one cased, and none lowercase
fn is_uppercase_alphabetic(s: &str) -> bool {
    s.chars().all(char::is_alphabetic)
        && s.chars().any(char::is_uppercase)
        && !s.chars().any(char::is_lowercase)
}

/// Validate order side (BUY or SELL), case-insensitive
pub fn validate_side(side: &str) -> bool {
    side.parse::<OrderSide>().is_ok()
}

/// Validate order type (MARKET, LIMIT, STOP_LIMIT), case-insensitive
pub fn validate_order_type(order_type: &str) -> bool {
    order_type.parse::<OrderType>().is_ok()
}

/// Validate order quantity: must parse as a decimal and be greater than zero
///
/// # Example
/// ```
/// use futures_order_bot::engine::validation::validate_quantity;
///
/// assert!(validate_quantity("1.5"));
/// assert!(!validate_quantity(0));
/// assert!(!validate_quantity("abc"));
/// ```
pub fn validate_quantity(quantity: impl Into<RawValue>) -> bool {
    parse_positive(&quantity.into()).is_some()
}

/// Validate order price: same positive-decimal rule as quantity
pub fn validate_price(price: impl Into<RawValue>) -> bool {
    parse_positive(&price.into()).is_some()
}

/// Parse a raw value into a strictly positive decimal
fn parse_positive(value: &RawValue) -> Option<Decimal> {
    value.to_decimal().filter(|d| *d > Decimal::ZERO)
}

/// Parse an optional raw value, treating blank text as absent
fn parse_required_positive(value: Option<&RawValue>) -> Option<Decimal> {
    value.filter(|v| !v.is_blank()).and_then(parse_positive)
}

// ============================================================================
// Composite Validation Function
// ============================================================================

/// Validate and normalize a raw order request
///
/// This is the **single entry point** for order validation. Unlike a
/// fail-fast check, every rule runs and all violations are collected.
///
/// # Validations Performed
/// 1. Symbol format
/// 2. Side is BUY or SELL
/// 3. Order type is MARKET, LIMIT or STOP_LIMIT
/// 4. Quantity is a positive number
/// 5. Price present and positive for LIMIT / STOP_LIMIT
/// 6. Stop price present and positive for STOP_LIMIT
///
/// On success the symbol is upper-cased and numeric fields are converted to
/// [`Decimal`] once.
pub fn validate(raw: &OrderRequest) -> ValidationResult {
    let mut violations = Vec::new();

    if !validate_symbol(&raw.symbol) {
        violations.push(Violation::InvalidSymbol);
    }

    let side = raw.side.parse::<OrderSide>().ok();
    if side.is_none() {
        violations.push(Violation::InvalidSide);
    }

    let order_type = raw.order_type.parse::<OrderType>().ok();
    if order_type.is_none() {
        violations.push(Violation::InvalidOrderType);
    }

    let quantity = parse_positive(&raw.quantity);
    if quantity.is_none() {
        violations.push(Violation::InvalidQuantity);
    }

    let requires_price = order_type.is_some_and(|t| t.requires_price());
    let requires_stop_price = order_type.is_some_and(|t| t.requires_stop_price());

    let price = parse_required_positive(raw.price.as_ref());
    if requires_price && price.is_none() {
        violations.push(Violation::InvalidPrice);
    }

    let stop_price = parse_required_positive(raw.stop_price.as_ref());
    if requires_stop_price && stop_price.is_none() {
        violations.push(Violation::InvalidStopPrice);
    }

    if !violations.is_empty() {
        return ValidationResult::Invalid(ValidationErrors { violations });
    }

    // Every Option below is Some once no violation was recorded.
    let (Some(side), Some(order_type), Some(quantity)) = (side, order_type, quantity) else {
        return ValidationResult::Invalid(ValidationErrors { violations });
    };

    let kind = match (order_type, price, stop_price) {
        (OrderType::Market, _, _) => OrderKind::Market,
        (OrderType::Limit, Some(price), _) => OrderKind::Limit { price },
        (OrderType::StopLimit, Some(price), Some(stop_price)) => {
            OrderKind::StopLimit { price, stop_price }
        }
        _ => {
            return ValidationResult::Invalid(ValidationErrors { violations });
        }
    };

    if !requires_price && raw.price.as_ref().is_some_and(|p| !p.is_blank()) {
        tracing::debug!("Ignoring price supplied for {} order", order_type);
    }
    if !requires_stop_price && raw.stop_price.as_ref().is_some_and(|p| !p.is_blank()) {
        tracing::debug!("Ignoring stop price supplied for {} order", order_type);
    }

    ValidationResult::Valid(ValidatedOrder::new(
        raw.symbol.to_uppercase(),
        side,
        quantity,
        kind,
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market(symbol: &str, side: &str, quantity: &str) -> OrderRequest {
        OrderRequest::new(symbol, side, "MARKET", quantity)
    }

    fn violations_of(request: &OrderRequest) -> Vec<Violation> {
        match validate(request) {
            ValidationResult::Invalid(errors) => errors.violations().to_vec(),
            ValidationResult::Valid(order) => panic!("expected rejection, got {}", order),
        }
    }

    #[test]
    fn test_validate_symbol() {
        assert!(validate_symbol("BTCUSDT"));
        assert!(validate_symbol("ETHUSDT"));
        assert!(validate_symbol("ABCDEF"));
        // Any casing before the literal suffix
        assert!(validate_symbol("btcUSDT"));
        assert!(validate_symbol("1000USDT"));

        assert!(!validate_symbol("BTC"));
        assert!(!validate_symbol(""));
        assert!(!validate_symbol("btcusdt"));
        assert!(!validate_symbol("BTC-USD"));
        assert!(!validate_symbol("USDT"));
    }

    #[test]
    fn test_short_symbols_always_rejected() {
        for symbol in ["", "A", "BT", "BTC", "USDT", "XUSDT", "ABCDE"] {
            let request = market(symbol, "BUY", "1");
            assert!(
                violations_of(&request).contains(&Violation::InvalidSymbol),
                "{symbol:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_side() {
        assert!(validate_side("BUY"));
        assert!(validate_side("buy"));
        assert!(validate_side("SELL"));
        assert!(validate_side("sell"));

        assert!(!validate_side("HOLD"));
        assert!(!validate_side(""));
        assert!(!validate_side(" buy"));
    }

    #[test]
    fn test_validate_order_type() {
        assert!(validate_order_type("MARKET"));
        assert!(validate_order_type("market"));
        assert!(validate_order_type("LIMIT"));
        assert!(validate_order_type("STOP_LIMIT"));

        assert!(!validate_order_type("INVALID"));
        assert!(!validate_order_type("STOP"));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0.001));
        assert!(validate_quantity("1.5"));
        assert!(validate_quantity("100"));

        assert!(!validate_quantity(0));
        assert!(!validate_quantity("0"));
        assert!(!validate_quantity(-1));
        assert!(!validate_quantity("-0.5"));
        assert!(!validate_quantity("abc"));
        assert!(!validate_quantity(""));
    }

    #[test]
    fn test_tiny_positive_number_is_not_a_valid_quantity() {
        assert!(!validate_quantity(1e-30));

        let request = OrderRequest::new("BTCUSDT", "BUY", "MARKET", 1e-30);
        assert_eq!(violations_of(&request), vec![Violation::InvalidQuantity]);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(100.5));
        assert!(validate_price("50000"));

        assert!(!validate_price(0));
        assert!(!validate_price(-100));
        assert!(!validate_price("xyz"));
    }

    #[test]
    fn test_valid_market_order_is_normalized() {
        let result = validate(&market("BTCUSDT", "BUY", "0.001"));
        assert!(result.is_valid());
        assert_eq!(result.error_message(), "");

        let order = result.into_result().unwrap();
        assert_eq!(order.symbol(), "BTCUSDT");
        assert_eq!(order.side(), OrderSide::Buy);
        assert_eq!(order.order_type(), OrderType::Market);
        assert_eq!(order.quantity(), dec!(0.001));
        assert_eq!(order.price(), None);
        assert_eq!(order.stop_price(), None);
    }

    #[test]
    fn test_lowercase_input_is_upper_cased() {
        let request = OrderRequest::new("ethUSDT", "sell", "limit", "1.0").with_price("2000");
        let order = validate(&request).into_result().unwrap();

        assert_eq!(order.symbol(), "ETHUSDT");
        assert_eq!(order.side(), OrderSide::Sell);
        assert_eq!(order.kind(), OrderKind::Limit { price: dec!(2000) });
    }

    #[test]
    fn test_invalid_symbol_message() {
        let result = validate(&market("BTC", "BUY", "0.001"));
        assert!(!result.is_valid());
        assert!(result.error_message().contains("Invalid symbol"));
    }

    #[test]
    fn test_limit_order_missing_price() {
        let request = OrderRequest::new("BTCUSDT", "BUY", "LIMIT", "0.001");
        let result = validate(&request);
        assert!(!result.is_valid());
        assert!(result.error_message().contains("Price is required"));
    }

    #[test]
    fn test_price_rule_for_priced_types() {
        for order_type in ["LIMIT", "STOP_LIMIT"] {
            for price in [None, Some(""), Some("0"), Some("-1"), Some("abc")] {
                let mut request = OrderRequest::new("BTCUSDT", "BUY", order_type, "1")
                    .with_stop_price("100");
                request.price = price.map(RawValue::from);

                let violations = violations_of(&request);
                assert_eq!(violations, vec![Violation::InvalidPrice], "{order_type} {price:?}");
            }
        }
    }

    #[test]
    fn test_stop_price_violation_is_distinct() {
        let request = OrderRequest::new("BNBUSDT", "BUY", "STOP_LIMIT", "1").with_price("300");
        assert_eq!(violations_of(&request), vec![Violation::InvalidStopPrice]);

        let request = request.with_stop_price("0");
        assert_eq!(violations_of(&request), vec![Violation::InvalidStopPrice]);
    }

    #[test]
    fn test_valid_stop_limit_order() {
        let request = OrderRequest::new("BNBUSDT", "buy", "stop_limit", "1")
            .with_price("300")
            .with_stop_price("295");

        let order = validate(&request).into_result().unwrap();
        assert_eq!(
            order.kind(),
            OrderKind::StopLimit {
                price: dec!(300),
                stop_price: dec!(295)
            }
        );
    }

    #[test]
    fn test_all_violations_are_collected_in_order() {
        let request = OrderRequest::new("btc", "hold", "stop_limit", "abc");
        let result = validate(&request);

        assert_eq!(
            violations_of(&request),
            vec![
                Violation::InvalidSymbol,
                Violation::InvalidSide,
                Violation::InvalidQuantity,
                Violation::InvalidPrice,
                Violation::InvalidStopPrice,
            ]
        );
        assert_eq!(
            result.error_message(),
            "Invalid symbol format (e.g., BTCUSDT) | Side must be BUY or SELL | \
             Quantity must be a positive number | \
             Price is required and must be positive for LIMIT orders | \
             Stop price is required and must be positive for STOP_LIMIT orders"
        );
    }

    #[test]
    fn test_unknown_order_type_skips_price_rules() {
        let request = OrderRequest::new("BTCUSDT", "BUY", "TWAP", "1");
        assert_eq!(violations_of(&request), vec![Violation::InvalidOrderType]);
    }

    #[test]
    fn test_market_order_ignores_extra_prices() {
        let request = market("BTCUSDT", "SELL", "2")
            .with_price("not-a-number")
            .with_stop_price("-5");

        let order = validate(&request).into_result().unwrap();
        assert_eq!(order.kind(), OrderKind::Market);
        assert_eq!(order.price(), None);
    }

    #[test]
    fn test_limit_order_drops_stop_price() {
        let request = OrderRequest::new("ETHUSDT", "SELL", "LIMIT", "0.1")
            .with_price(2000.0)
            .with_stop_price("1900");

        let order = validate(&request).into_result().unwrap();
        assert_eq!(order.price(), Some(dec!(2000)));
        assert_eq!(order.stop_price(), None);
    }
}
