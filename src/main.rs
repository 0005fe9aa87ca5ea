use std::process::ExitCode;

use clap::Parser;
use futures_order_bot::cli::OrderArgs;
use futures_order_bot::display::{display_error, display_info, display_success, print_receipt};
use futures_order_bot::logging::{self, LogConfig};
use futures_order_bot::{validate, BotConfig, BotError, FuturesClient, OrderDispatcher, ValidatedOrder};
use tokio_util::sync::CancellationToken;

fn main() -> ExitCode {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    let args = OrderArgs::parse();

    // Initialize tracing
    let log_config = LogConfig::from_env();
    if let Err(e) = logging::init(&log_config) {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    // Validate before anything touches the network
    let order = match validate(&args.to_request()).into_result() {
        Ok(order) => order,
        Err(errors) => {
            let message = errors.message();
            display_error(&message);
            tracing::error!("Input validation failed: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let outcome = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BotError::unexpected("failed to start async runtime", e))
        .and_then(|runtime| runtime.block_on(run(order)));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display_error(&e.to_string());
            tracing::error!("Order execution failed: {:?}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(order: ValidatedOrder) -> Result<(), BotError> {
    display_info("Initializing Binance Futures client...");

    let config = BotConfig::from_env()?;
    tracing::debug!("Loaded config: {:?}", config);

    let client = FuturesClient::new(&config)?;
    tracing::info!("Futures client ready for {}", client.base_url());

    if config.sync_time {
        let offset = client.sync_time().await?;
        tracing::info!("Synchronized with server clock (offset {} ms)", offset);
    }

    // Ctrl-C abandons the in-flight request
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling order submission");
            ctrl_c_token.cancel();
        }
    });

    let dispatcher = OrderDispatcher::new(config.request_timeout()).with_cancellation(cancel);
    let receipt = dispatcher.submit(&order, &client).await?;

    print_receipt(&receipt);
    display_success("Order placed successfully!");
    tracing::info!("Order execution completed: {:?}", receipt);

    Ok(())
}
