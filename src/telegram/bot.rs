//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config::Config;
use crate::i18n;
use crate::telegram::Bot;

/// Bot commands enum with descriptions
///
/// Both variants take the raw argument text; `/start` ignores it and `/add`
/// parses it itself so malformed input still reaches the handler.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show usage instructions")]
    Start(String),
    #[command(description = "record an expense: /add category amount")]
    Add(String),
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, HTTP client setup)
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config.http_timeout).build()?;
    let bot = Bot::with_client(config.bot_token.expose_secret(), client);

    // Check if local Bot API server is configured
    let bot = if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Command menu entries for one language
fn command_menu(lang: &str) -> Vec<BotCommand> {
    let lang = i18n::lang_from_code(Some(lang));
    vec![
        BotCommand::new("start", i18n::t(&lang, "command-start")),
        BotCommand::new("add", i18n::t(&lang, "command-add")),
    ]
}

/// Sets up bot commands in Telegram UI
///
/// English is registered as the default menu; other supported languages are
/// registered for users with that interface language.
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(command_menu("en")).await?;

    for (code, _) in i18n::SUPPORTED_LANGS {
        if *code == "en" {
            continue;
        }
        bot.set_my_commands(command_menu(code)).language_code(*code).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let command_list = format!("{}", Command::descriptions());

        assert!(command_list.contains("These commands are supported"));
        assert!(command_list.contains("/start"));
        assert!(command_list.contains("/add"));
    }

    #[test]
    fn test_parse_add_keeps_raw_arguments() {
        let cmd = Command::parse("/add food 12.50", "expense_bot").unwrap();
        assert_eq!(cmd, Command::Add("food 12.50".to_string()));
    }

    #[test]
    fn test_parse_commands_without_arguments() {
        assert_eq!(
            Command::parse("/add", "expense_bot").unwrap(),
            Command::Add(String::new())
        );
        assert_eq!(
            Command::parse("/start", "expense_bot").unwrap(),
            Command::Start(String::new())
        );
    }

    #[test]
    fn test_parse_start_ignores_payload() {
        assert!(matches!(
            Command::parse("/start hello there", "expense_bot"),
            Ok(Command::Start(_))
        ));
    }

    #[test]
    fn test_command_menu_localized() {
        let ru = command_menu("ru");
        assert_eq!(ru.len(), 2);
        assert_eq!(ru[1].command, "add");
        assert!(ru[1].description.contains("категория"));
    }
}
