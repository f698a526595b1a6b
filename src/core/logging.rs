//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Configuration summary at startup (secrets redacted)

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config::Config as BotConfig;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Installs a panic hook that routes panics inside handlers to the log
/// instead of only stderr.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));
}

/// Logs the effective configuration at application startup.
///
/// The bot token and service-account credential are never printed; the
/// webhook URL is shown with the token path segment masked.
pub fn log_configuration(config: &BotConfig) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("⚙️  Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("APP_URL: {}", config.app_url);
    log::info!("Webhook path: {}/<bot token>", config.app_url.as_str().trim_end_matches('/'));
    log::info!("Listen address: {}", config.listen_addr());
    log::info!("Spreadsheet: {}", config.spreadsheet);
    log::info!("HTTP timeout: {}s", config.http_timeout.as_secs());
    log::info!("GOOGLE_SERVICE_ACCOUNT: set ({} chars)", secret_len(config));
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn secret_len(config: &BotConfig) -> usize {
    use secrecy::ExposeSecret;
    config.service_account.expose_secret().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_init_logger_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("expense-bot.log");
        assert!(!log_path.exists());

        // A logger may already be installed by another test in this binary,
        // so only the file side effect is checked.
        let _ = init_logger(log_path.to_str().unwrap());

        assert!(log_path.exists());
    }

    #[test]
    #[serial_test::serial]
    fn test_init_logger_fails_for_missing_directory() {
        let result = init_logger("/nonexistent-dir/expense-bot.log");
        assert!(result.is_err());
    }
}
