//! Telegram notifier that delivers alert messages to subscriber chats.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::debug;

use crate::domain::DeliveryAddress;
use crate::error::SendError;
use crate::port::Notifier;

/// Configuration for the Telegram bot.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN`. Returns `None` if it is missing or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").ok()?;
        if bot_token.trim().is_empty() {
            return None;
        }
        Some(Self { bot_token })
    }

    /// Build a bot client for this configuration.
    #[must_use]
    pub fn bot(&self) -> Bot {
        Bot::new(&self.bot_token)
    }
}

/// Parse a delivery address as a Telegram chat id.
///
/// # Errors
///
/// Returns [`SendError::InvalidAddress`] if the address is not an integer.
pub fn parse_chat_id(address: &DeliveryAddress) -> Result<ChatId, SendError> {
    address
        .as_str()
        .trim()
        .parse::<i64>()
        .map(ChatId)
        .map_err(|e| SendError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Delivers alerts through the Telegram Bot API using HTML parse mode.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, address: &DeliveryAddress, text: &str) -> Result<(), SendError> {
        let chat_id = parse_chat_id(address)?;

        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        debug!(chat_id = chat_id.0, "Telegram message sent");
        Ok(())
    }
}
