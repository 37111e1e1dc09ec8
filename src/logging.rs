// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The level comes from `--log-level` when given, else from
//! `STATIONWATCH_LOG`, else `info`. `STATIONWATCH_LOG` may also hold a full
//! filter directive such as `stationwatch=debug,reqwest=info`.
//!
//! Output goes to stderr; stdout is reserved for `channels`, `check` and
//! `usage`. Workers spawned by the scheduler inherit stderr and receive the
//! scheduler's `--log-level`, so both sides log at the same verbosity.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "STATIONWATCH_LOG";

/// HTTP stack crates are capped at `warn` unless a directive says otherwise.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV_VAR).ok().as_deref())?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Resolve the effective filter from the CLI flag and the env value.
pub fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> Result<EnvFilter> {
    let directives = match (cli_level, env_value.map(str::trim)) {
        (Some(level), _) => format!("{},{QUIET_DEPENDENCIES}", level.as_flag_value()),
        (None, Some(env)) if !env.is_empty() => {
            if env.contains('=') {
                env.to_string()
            } else {
                format!("{},{QUIET_DEPENDENCIES}", env.to_lowercase())
            }
        }
        _ => format!("info,{QUIET_DEPENDENCIES}"),
    };

    EnvFilter::try_new(&directives).with_context(|| format!("invalid log filter {directives:?}"))
}
