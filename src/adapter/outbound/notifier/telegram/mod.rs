//! Telegram alert delivery.
//!
//! Requires the `telegram` feature to be enabled.

mod notifier;

pub use notifier::{parse_chat_id, TelegramConfig, TelegramNotifier};
