use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, Polling};

use expense_bot::cli::{Cli, Commands};
use expense_bot::core::{config, init_logger, install_panic_hook, log_configuration, AppResult, Config};
use expense_bot::sheets::{ExpenseSheet, GoogleSheetsConnector, SheetHandle};
use expense_bot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, webhook registration).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    install_panic_hook();

    // Load environment variables from .env if present, before LOG_FILE_PATH is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Some(Commands::Run { polling }) => run_bot(config, polling).await,
        Some(Commands::CheckSheet) => Ok(run_check_sheet(config).await?),
        None => run_bot(config, false).await,
    }
}

/// Connects to the spreadsheet once and reports the target worksheet
async fn run_check_sheet(config: Config) -> AppResult<()> {
    log_configuration(&config);

    let connector = GoogleSheetsConnector::from_config(&config)?;
    let worksheet = connector.open().await?;

    println!("✅ Rows will be appended to {}", worksheet.describe());
    Ok(())
}

/// Run the Telegram bot
async fn run_bot(config: Config, use_polling: bool) -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");
    log_configuration(&config);

    let bot = create_bot(&config)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    // Connection to the sheet is established lazily by the first /add
    let connector = GoogleSheetsConnector::from_config(&config)?;
    let handler_deps = HandlerDeps::new(Arc::new(SheetHandle::new(Arc::new(connector))));

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema(handler_deps))
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build();

    if use_polling {
        // Polling does not work while a webhook is registered
        bot.delete_webhook().await?;

        log::info!("Starting bot in long polling mode");
        let listener = Polling::builder(bot.clone()).drop_pending_updates().build();
        log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());

        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    } else {
        let address = config.listen_addr();
        let url = config.webhook_url()?;
        log::info!(
            "Starting bot in webhook mode on {} (webhook {}/<bot token>)",
            address,
            config.app_url.as_str().trim_end_matches('/')
        );

        let listener = webhooks::axum(bot.clone(), webhooks::Options::new(address, url)).await?;
        log::info!("Webhook set successfully");
        log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());

        dispatcher
            .dispatch_with_listener(
                listener,
                LoggingErrorHandler::with_custom_text("An error from the update listener"),
            )
            .await;
    }

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
