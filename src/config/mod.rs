// src/config/mod.rs

//! Configuration loading and validation for stationwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and overlay the environment (`loader.rs`).
//! - Validate basic invariants and produce immutable `Settings` (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{apply_env_overrides, default_config_path, load_from_path, load_settings};
pub use model::{
    GeniusSection, RawConfig, SchedulerSection, SchedulerSettings, Settings, SlackSection,
    StationSection, StationSettings, TuneInSection, UpdateSection,
};
pub use validate::validate_raw_config;
