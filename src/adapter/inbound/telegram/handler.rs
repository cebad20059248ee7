//! Command handling independent of the Telegram transport.
//!
//! The listener extracts a [`CommandSender`] from each update and hands the
//! text here; the reply (if any) is sent back to the originating chat.

use std::fmt::Write as _;

use tracing::{error, info};

use super::command::{command_help, parse_command, BotCommandKind, CommandParseError};
use crate::domain::{DeliveryAddress, Subscriber, SubscriberId};
use crate::port::SubscriberDirectory;

/// Who sent a command, and from where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSender {
    pub user_id: u64,
    pub username: Option<String>,
    pub chat_id: i64,
}

impl CommandSender {
    /// Directory id for this sender: the username, or the numeric user id
    /// for accounts without one.
    #[must_use]
    pub fn subscriber_id(&self) -> SubscriberId {
        match self.username.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => SubscriberId::new(name),
            _ => SubscriberId::new(self.user_id.to_string()),
        }
    }

    #[must_use]
    pub fn address(&self) -> DeliveryAddress {
        DeliveryAddress::from(self.chat_id)
    }
}

/// Build the reply to `text`. Returns `None` for non-command chatter.
pub async fn reply_to(
    text: &str,
    sender: &CommandSender,
    directory: &dyn SubscriberDirectory,
) -> Option<String> {
    match parse_command(text) {
        Ok(BotCommandKind::Start) => Some(register(sender, directory).await),
        Ok(BotCommandKind::List) => Some(list(directory).await),
        Ok(BotCommandKind::Help) => Some(command_help().to_string()),
        Err(CommandParseError::NotACommand) => None,
        Err(CommandParseError::UnknownCommand(cmd)) => {
            Some(format!("Unknown command {cmd}. Send /help for the list."))
        }
    }
}

async fn register(sender: &CommandSender, directory: &dyn SubscriberDirectory) -> String {
    let id = sender.subscriber_id();
    match directory.upsert_subscriber(&id, &sender.address()).await {
        Ok(()) => {
            info!(subscriber = %id, chat_id = sender.chat_id, "Subscriber registered");
            format!(
                "👋 Welcome, {id}!\n\n\
                 This chat will receive fuel price alerts for your rules.\n\
                 Send /list to see current subscriptions."
            )
        }
        Err(e) => {
            error!(subscriber = %id, error = %e, "Failed to register subscriber");
            "Registration failed, please try again later.".to_string()
        }
    }
}

async fn list(directory: &dyn SubscriberDirectory) -> String {
    match directory.list_subscribers().await {
        Ok(subscribers) => render_subscribers(&subscribers),
        Err(e) => {
            error!(error = %e, "Failed to list subscribers");
            "Could not load subscribers, please try again later.".to_string()
        }
    }
}

fn render_subscribers(subscribers: &[Subscriber]) -> String {
    if subscribers.is_empty() {
        return "No subscribers registered yet.".to_string();
    }

    let mut out = String::from("📜 Subscribers\n");
    for subscriber in subscribers {
        let _ = write!(out, "\n{}", subscriber.id);
        match &subscriber.address {
            Some(address) if !address.is_blank() => {
                let _ = writeln!(out, " (chat {address})");
            }
            _ => out.push_str(" (not registered)\n"),
        }
        if subscriber.rules.is_empty() {
            out.push_str("  • no rules\n");
        }
        for rule in &subscriber.rules {
            let _ = writeln!(out, "  • {rule}");
        }
    }
    out.trim_end().to_string()
}
