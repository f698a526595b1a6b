//! Command handler implementations (/start, /add)

use fluent_templates::fluent_bundle::FluentArgs;
use teloxide::prelude::*;
use unic_langid::LanguageIdentifier;

use super::types::{HandlerDeps, HandlerError};
use crate::expense::{format_amount, record_expense, CommandError, ExpenseEntry};
use crate::i18n;
use crate::telegram::Bot;

/// Handle /start command
///
/// Always replies with the usage text; never touches the spreadsheet.
pub async fn handle_start_command(bot: &Bot, chat_id: ChatId, lang: &LanguageIdentifier) -> Result<(), HandlerError> {
    bot.send_message(chat_id, i18n::t(lang, "start-usage")).await?;
    Ok(())
}

/// Confirmation text for a recorded expense
fn confirmation(lang: &LanguageIdentifier, entry: &ExpenseEntry) -> String {
    let mut args = FluentArgs::new();
    args.set("amount", format_amount(entry.amount));
    args.set("category", entry.category.clone());
    args.set("date", entry.date_string());
    i18n::t_args(lang, "expense-added", &args)
}

/// Handle /add command
///
/// Every outcome produces exactly one reply. Backend failures are logged
/// with their cause; the user only sees the fixed message for the error kind.
pub async fn handle_add_command(
    bot: &Bot,
    chat_id: ChatId,
    lang: &LanguageIdentifier,
    args: &str,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let reply = match record_expense(args, &deps.sheets, || deps.today()).await {
        Ok(entry) => {
            log::info!(
                "Recorded expense for chat {}: {} {} on {}",
                chat_id,
                entry.category,
                entry.amount,
                entry.date_string()
            );
            confirmation(lang, &entry)
        }
        Err(err) => {
            match &err {
                CommandError::MalformedCommand => {
                    log::info!("Malformed /add from chat {}: {:?}", chat_id, args);
                }
                CommandError::BackendUnavailable(cause) => {
                    log::error!("Error connecting to Google Sheet (chat {}): {}", chat_id, cause);
                }
                CommandError::WriteFailed(cause) => {
                    log::error!("Error appending row (chat {}): {}", chat_id, cause);
                }
            }
            i18n::t(lang, err.message_key())
        }
    };

    bot.send_message(chat_id, reply).await?;
    Ok(())
}
