#![allow(dead_code)]

use std::path::PathBuf;

use stationwatch::config::{RawConfig, Settings};
use stationwatch::types::LaunchMode;

/// Builder for `Settings` to simplify test setup.
///
/// Starts from the same defaults as an empty config file.
pub struct SettingsBuilder {
    raw: RawConfig,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawConfig::default(),
        }
    }

    pub fn base_frequency(mut self, val: u64) -> Self {
        self.raw.scheduler.base_frequency = val;
        self
    }

    pub fn tick_millis(mut self, val: u64) -> Self {
        self.raw.scheduler.tick_millis = val;
        self
    }

    pub fn launch_mode(mut self, mode: LaunchMode) -> Self {
        self.raw.scheduler.launch_mode = mode;
        self
    }

    pub fn max_workers(mut self, val: usize) -> Self {
        self.raw.scheduler.max_workers = val;
        self
    }

    pub fn stream_url(mut self, url: &str) -> Self {
        self.raw.station.stream_url = url.to_string();
        self
    }

    pub fn probe_attempts(mut self, val: u32) -> Self {
        self.raw.station.probe_attempts = val;
        self
    }

    pub fn state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.station.state_dir = dir.into();
        self
    }

    pub fn logger_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.station.logger_dir = dir.into();
        self
    }

    pub fn slack_token(mut self, token: &str) -> Self {
        self.raw.slack.token = token.to_string();
        self
    }

    pub fn genius_token(mut self, token: &str) -> Self {
        self.raw.genius.token = token.to_string();
        self
    }

    pub fn tunein(mut self, station_id: &str, partner_id: &str, partner_key: &str) -> Self {
        self.raw.tunein.station_id = station_id.to_string();
        self.raw.tunein.partner_id = partner_id.to_string();
        self.raw.tunein.partner_key = partner_key.to_string();
        self
    }

    pub fn update_command(mut self, command: &str, repo_dir: impl Into<PathBuf>) -> Self {
        self.raw.update.command = command.to_string();
        self.raw.update.repo_dir = repo_dir.into();
        self
    }

    pub fn raw(self) -> RawConfig {
        self.raw
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
