// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Task flags (`-n`, `--status`, ...) are collected as raw tokens and handed
//! to [`crate::schedule::TaskMask::from_tokens`], so unknown flags are ignored
//! instead of rejected. That keeps "tokens supplied but none recognised"
//! distinct from "no tokens at all".

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `stationwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stationwatch",
    version,
    about = "Watch a broadcast stream and relay song, outage, lyric and swear-log events.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Stationwatch.toml` in the current working directory. A
    /// missing default file is fine; a missing explicit file is an error.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STATIONWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the usage statement.
    Usage,

    /// Run the scheduler that launches each enabled task on its own cadence.
    ///
    /// Task flags: -n/--nowplaying, -s/--status, -l/--lyric, -w/--swear,
    /// -u/--update. With no flags every task is enabled.
    Scheduler {
        #[arg(
            value_name = "TASK_FLAGS",
            num_args = 0..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        tokens: Vec<String>,
    },

    /// Run a single task once, synchronously, without the scheduler.
    Task {
        #[arg(
            value_name = "TASK_FLAG",
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        tokens: Vec<String>,
    },

    /// Ask a scheduler running in another process to stop.
    Kill,

    /// Send a test message to the configured test channel.
    Message {
        #[arg(num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// List the channels visible to the notification token.
    Channels,

    /// Print resolved settings without running anything.
    Check,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Flag value, used when forwarding the level to worker processes.
    pub fn as_flag_value(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
