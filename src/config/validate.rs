// src/config/validate.rs

use crate::config::model::{RawConfig, Settings};
use crate::errors::{BotError, Result};

impl TryFrom<RawConfig> for Settings {
    type Error = crate::errors::BotError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(Settings::new_unchecked(raw))
    }
}

/// Check invariants that `serde` defaults cannot express.
pub fn validate_raw_config(cfg: &RawConfig) -> Result<()> {
    validate_scheduler(cfg)?;
    validate_station(cfg)?;
    Ok(())
}

fn validate_scheduler(cfg: &RawConfig) -> Result<()> {
    let s = &cfg.scheduler;

    if s.base_frequency == 0 {
        return Err(BotError::ConfigError(
            "[scheduler].base_frequency must be >= 1 (got 0)".to_string(),
        ));
    }
    if s.tick_millis == 0 {
        return Err(BotError::ConfigError(
            "[scheduler].tick_millis must be >= 1 (got 0)".to_string(),
        ));
    }
    if s.max_workers == 0 {
        return Err(BotError::ConfigError(
            "[scheduler].max_workers must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_station(cfg: &RawConfig) -> Result<()> {
    let s = &cfg.station;

    if s.probe_attempts == 0 {
        return Err(BotError::ConfigError(
            "[station].probe_attempts must be >= 1 (got 0)".to_string(),
        ));
    }
    if s.probe_timeout_secs == 0 {
        return Err(BotError::ConfigError(
            "[station].probe_timeout_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
