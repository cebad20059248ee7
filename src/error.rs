use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure to obtain a usable price snapshot for one cycle.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("price request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("price source returned status {status}")]
    Status { status: u16 },

    #[error("price request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed price payload: {0}")]
    Malformed(String),

    #[error("price payload contained no readings")]
    EmptyPayload,
}

/// Failure to deliver one notification.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("delivery address '{address}' is not usable: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport rejected message: {0}")]
    Transport(String),
}

/// Failure to read or write the subscriber directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("directory connection error: {0}")]
    Connection(String),

    #[error("directory query failed: {0}")]
    Query(String),

    #[error("directory request timed out after {0:?}")]
    Timeout(Duration),

    #[error("corrupt directory record for '{subscriber}': {reason}")]
    Corrupt { subscriber: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, Error>;
