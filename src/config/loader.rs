// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawConfig, Settings};
use crate::errors::{BotError, Result};

/// Load a configuration file from a given path and return the raw `RawConfig`.
///
/// This only performs TOML deserialization; it does **not** apply environment
/// overrides or validation. Use [`load_settings`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Resolve the effective settings for this invocation.
///
/// - `explicit = Some(path)`: the file must exist.
/// - `explicit = None`: [`default_config_path`] is used if present, otherwise
///   every section falls back to its defaults.
///
/// Environment overrides are applied after the file and before validation.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let mut raw = match explicit {
        Some(path) => load_from_path(path).map_err(|e| match e {
            BotError::IoError(io) => BotError::ConfigError(format!(
                "cannot read config file {}: {io}",
                path.display()
            )),
            other => other,
        })?,
        None => {
            let path = default_config_path();
            if path.exists() {
                load_from_path(&path)?
            } else {
                debug!(path = %path.display(), "no config file found; using defaults");
                RawConfig::default()
            }
        }
    };

    apply_env_overrides(&mut raw, |key| std::env::var(key).ok());
    Settings::try_from(raw)
}

/// Overlay secrets and paths from the environment onto a raw config.
///
/// Empty variables are ignored so that an exported-but-blank variable does
/// not wipe a value from the file.
pub fn apply_env_overrides(raw: &mut RawConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("SLACK_TOKEN") {
        raw.slack.token = v;
    }
    if let Some(v) = get("STREAM_URL") {
        raw.station.stream_url = v;
    }
    if let Some(v) = get("TUNEIN_STATION_ID") {
        raw.tunein.station_id = v;
    }
    if let Some(v) = get("TUNEIN_PARTNER_ID") {
        raw.tunein.partner_id = v;
    }
    if let Some(v) = get("TUNEIN_PARTNER_KEY") {
        raw.tunein.partner_key = v;
    }
    if let Some(v) = get("GENIUS_TOKEN") {
        raw.genius.token = v;
    }
    if let Some(v) = get("LOGGERPATH") {
        raw.station.logger_dir = PathBuf::from(v);
    }
}

/// Default config location: `Stationwatch.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Stationwatch.toml")
}
