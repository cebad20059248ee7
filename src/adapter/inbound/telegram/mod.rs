//! Inbound Telegram commands: registration and listing.

pub mod command;
pub mod handler;
#[cfg(feature = "telegram")]
pub mod listener;

pub use command::{bot_commands, command_help, parse_command, BotCommandKind, CommandParseError};
pub use handler::{reply_to, CommandSender};
#[cfg(feature = "telegram")]
pub use listener::run_command_listener;
