use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: expense-bot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "expense-bot.log".to_string()));

/// Spreadsheet opened when SPREADSHEET_NAME is not set
pub const DEFAULT_SPREADSHEET_NAME: &str = "ExpensesTracker";

/// Port the webhook listener binds to when PORT is not set
pub const DEFAULT_PORT: u16 = 8443;

/// Network configuration
pub mod network {
    use super::Duration;

    /// Default timeout for outgoing HTTP requests (in seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }
}

/// Errors raised while reading the process configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Which spreadsheet rows are appended to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetRef {
    /// Looked up by exact name through the Drive API
    Name(String),
    /// Opened directly, skipping the name lookup
    Id(String),
}

impl fmt::Display for SpreadsheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadsheetRef::Name(name) => write!(f, "name '{}'", name),
            SpreadsheetRef::Id(id) => write!(f, "id {}", id),
        }
    }
}

/// Process configuration, read once at startup.
///
/// The bot token and the service-account credential are kept as secrets so
/// they never end up in `Debug` output or the log file.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: SecretString,
    pub app_url: Url,
    pub service_account: SecretString,
    pub spreadsheet: SpreadsheetRef,
    pub port: u16,
    pub http_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, treating empty values as unset.
    ///
    /// All missing required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .or_else(|| get("TELOXIDE_TOKEN"));
        let app_url = get("APP_URL");
        let service_account = get("GOOGLE_SERVICE_ACCOUNT");

        let mut missing = Vec::new();
        if bot_token.is_none() {
            missing.push("TELEGRAM_BOT_TOKEN");
        }
        if app_url.is_none() {
            missing.push("APP_URL");
        }
        if service_account.is_none() {
            missing.push("GOOGLE_SERVICE_ACCOUNT");
        }

        let (Some(bot_token), Some(app_url), Some(service_account)) = (bot_token, app_url, service_account) else {
            return Err(ConfigError::Missing(missing));
        };

        let app_url = Url::parse(&app_url).map_err(|e| ConfigError::Invalid {
            name: "APP_URL",
            reason: e.to_string(),
        })?;

        let spreadsheet = match get("SPREADSHEET_ID") {
            Some(id) => SpreadsheetRef::Id(id),
            None => SpreadsheetRef::Name(get("SPREADSHEET_NAME").unwrap_or_else(|| DEFAULT_SPREADSHEET_NAME.to_string())),
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?),
            None => network::timeout(),
        };

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            app_url,
            service_account: SecretString::from(service_account),
            spreadsheet,
            port,
            http_timeout,
        })
    }

    /// Public URL Telegram pushes updates to: `<APP_URL>/<bot token>`.
    pub fn webhook_url(&self) -> Result<Url, ConfigError> {
        let base = self.app_url.as_str().trim_end_matches('/');
        let raw = format!("{}/{}", base, self.bot_token.expose_secret());
        Url::parse(&raw).map_err(|e| ConfigError::Invalid {
            name: "APP_URL",
            reason: e.to_string(),
        })
    }

    /// Address the webhook listener binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
