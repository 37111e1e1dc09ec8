// src/errors.rs

//! Typed errors for configuration and command dispatch. Task bodies and
//! HTTP clients report through `anyhow`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("No runnable task in flags: {0}")]
    UnknownTask(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
