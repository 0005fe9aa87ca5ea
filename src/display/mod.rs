//! Console output
//!
//! Tables are built by pure functions so they can be checked without a
//! terminal; the `print_*` and `display_*` helpers only write them out.

use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{row, Table};

use crate::models::{AccountInfo, OrderReceipt};

/// Placeholder for fields the exchange did not return
pub const NOT_AVAILABLE: &str = "N/A";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Field/value pairs shown for a placed order, in display order
pub fn receipt_fields(receipt: &OrderReceipt) -> Vec<(&'static str, String)> {
    vec![
        ("Order ID", receipt.order_id.to_string()),
        ("Symbol", receipt.symbol.clone()),
        ("Side", receipt.side.clone()),
        ("Type", receipt.order_type.clone()),
        ("Quantity", receipt.orig_qty.normalize().to_string()),
        ("Price", or_na(receipt.price.map(|p| p.normalize()))),
        ("Status", receipt.status.clone()),
        (
            "Time",
            or_na(receipt.timestamp().map(|t| t.format(TIME_FORMAT))),
        ),
    ]
}

pub fn receipt_table(receipt: &OrderReceipt) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.set_titles(row![bFg => "Field", "Value"]);
    for (field, value) in receipt_fields(receipt) {
        table.add_row(row![Fc -> field, Fm -> value]);
    }
    table
}

pub fn account_table(account: &AccountInfo) -> Table {
    let mut table = Table::new();
    table.set_format(*FORMAT_BOX_CHARS);
    table.set_titles(row![bFg => "Asset", "Wallet Balance", "Available", "Unrealized PnL"]);

    for asset in account.funded_assets() {
        table.add_row(row![
            Fc -> asset.asset,
            asset.wallet_balance.normalize(),
            or_na(asset.available_balance.map(|v| v.normalize())),
            or_na(asset.unrealized_profit.map(|v| v.normalize())),
        ]);
    }

    table.add_row(row![
        b -> "TOTAL",
        b -> account.total_wallet_balance.normalize(),
        b -> or_na(account.available_balance.map(|v| v.normalize())),
        b -> or_na(account.total_unrealized_profit.map(|v| v.normalize())),
    ]);
    table
}

pub fn print_receipt(receipt: &OrderReceipt) {
    println!("Order Placed Successfully");
    receipt_table(receipt).printstd();
}

pub fn print_account(account: &AccountInfo) {
    println!("Futures Account");
    account_table(account).printstd();
    if let Some(can_trade) = account.can_trade {
        println!("Trading enabled: {}", can_trade);
    }
}

pub fn error_line(message: &str) -> String {
    format!("Error: {}", message)
}

pub fn info_line(message: &str) -> String {
    format!("Info: {}", message)
}

pub fn success_line(message: &str) -> String {
    format!("Success: {}", message)
}

pub fn display_error(message: &str) {
    eprintln!("{}", error_line(message));
}

pub fn display_info(message: &str) {
    println!("{}", info_line(message));
}

pub fn display_success(message: &str) {
    println!("{}", success_line(message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetBalance;
    use rust_decimal_macros::dec;

    fn receipt() -> OrderReceipt {
        OrderReceipt {
            order_id: 4049383,
            symbol: "ETHUSDT".to_string(),
            side: "SELL".to_string(),
            order_type: "LIMIT".to_string(),
            orig_qty: dec!(0.100),
            price: Some(dec!(2000.00)),
            status: "NEW".to_string(),
            update_time: Some(1_700_000_000_000),
            client_order_id: None,
            stop_price: None,
            time_in_force: Some("GTC".to_string()),
            executed_qty: None,
            avg_price: None,
        }
    }

    #[test]
    fn test_receipt_fields() {
        let fields = receipt_fields(&receipt());
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["Order ID", "Symbol", "Side", "Type", "Quantity", "Price", "Status", "Time"]
        );
        assert_eq!(fields[0].1, "4049383");
        assert_eq!(fields[4].1, "0.1");
        assert_eq!(fields[5].1, "2000");
        assert_eq!(fields[7].1, "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_missing_fields_show_placeholder() {
        let mut receipt = receipt();
        receipt.price = None;
        receipt.update_time = None;

        let fields = receipt_fields(&receipt);
        assert_eq!(fields[5].1, NOT_AVAILABLE);
        assert_eq!(fields[7].1, NOT_AVAILABLE);
    }

    #[test]
    fn test_receipt_table_renders_all_rows() {
        let table = receipt_table(&receipt());
        assert_eq!(table.len(), 8);

        let rendered = table.to_string();
        assert!(rendered.contains("Order ID"));
        assert!(rendered.contains("ETHUSDT"));
    }

    #[test]
    fn test_account_table_skips_empty_assets() {
        let account = AccountInfo {
            total_wallet_balance: dec!(15000.5),
            available_balance: Some(dec!(14000)),
            total_unrealized_profit: None,
            can_trade: Some(true),
            assets: vec![
                AssetBalance {
                    asset: "USDT".to_string(),
                    wallet_balance: dec!(15000.5),
                    available_balance: Some(dec!(14000)),
                    unrealized_profit: Some(dec!(0)),
                },
                AssetBalance {
                    asset: "BNB".to_string(),
                    wallet_balance: dec!(0),
                    available_balance: None,
                    unrealized_profit: None,
                },
            ],
        };

        let table = account_table(&account);
        // USDT plus the total row
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("USDT"));
        assert!(!rendered.contains("BNB"));
        assert!(rendered.contains("TOTAL"));
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(error_line("Side must be BUY or SELL"), "Error: Side must be BUY or SELL");
        assert_eq!(
            info_line("Initializing Binance Futures client..."),
            "Info: Initializing Binance Futures client..."
        );
        assert_eq!(success_line("Order placed successfully!"), "Success: Order placed successfully!");
    }
}
