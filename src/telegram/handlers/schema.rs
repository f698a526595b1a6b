//! Dispatcher schema

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_add_command, handle_start_command};
use super::types::{HandlerDeps, HandlerError};
use crate::i18n;
use crate::telegram::bot::Command;
use crate::telegram::Bot;

/// Creates the dispatcher schema for the bot.
///
/// Only `/start` and `/add` are routed; every other update is dropped.
///
/// # Arguments
/// * `deps` - Handler dependencies (spreadsheet handle, clock)
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let lang = i18n::lang_from_code(msg.from.as_ref().and_then(|u| u.language_code.as_deref()));

                match cmd {
                    Command::Start(_) => {
                        handle_start_command(&bot, msg.chat.id, &lang).await?;
                    }
                    Command::Add(args) => {
                        handle_add_command(&bot, msg.chat.id, &lang, &args, &deps).await?;
                    }
                }
                Ok(())
            }
        },
    ))
}
