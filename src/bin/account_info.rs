//! Print the futures account snapshot.
//!
//! Reads the same environment as `order-bot`.

use futures_order_bot::display::{display_error, display_info, print_account};
use futures_order_bot::logging::{self, LogConfig};
use futures_order_bot::{BotConfig, BotError, FuturesClient, TradingClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = logging::init(&LogConfig::from_env()) {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            display_error(&e.to_string());
            tracing::error!("Account query failed: {:?}", e);
            std::process::ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), BotError> {
    display_info("Fetching futures account information...");

    let config = BotConfig::from_env()?;
    let client = FuturesClient::new(&config)?;
    if config.sync_time {
        client.sync_time().await?;
    }

    let account = client.get_account_info().await?;
    tracing::info!(
        "Account snapshot: wallet={} assets={}",
        account.total_wallet_balance,
        account.assets.len()
    );
    print_account(&account);
    Ok(())
}
