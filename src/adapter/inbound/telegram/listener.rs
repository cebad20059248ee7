//! Telegram long-polling listener for subscriber commands.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{error, info, warn};

use super::command::bot_commands;
use super::handler::{reply_to, CommandSender};
use crate::port::SubscriberDirectory;

/// Serve commands until the dispatcher stops.
pub async fn run_command_listener(bot: Bot, directory: Arc<dyn SubscriberDirectory>) {
    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!("Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let directory = Arc::clone(&directory);
        async move {
            let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
                return respond(());
            };

            let sender = CommandSender {
                user_id: user.id.0,
                username: user.username.clone(),
                chat_id: msg.chat.id.0,
            };

            if let Some(reply) = reply_to(text, &sender, directory.as_ref()).await {
                if let Err(e) = bot.send_message(msg.chat.id, reply).await {
                    error!(error = %e, "Failed to send Telegram command response");
                }
            }

            respond(())
        }
    })
    .await;

    info!("Telegram command listener stopped");
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
