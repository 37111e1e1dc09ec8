// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::types::LaunchMode;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [scheduler]
/// base_frequency = 5
/// launch_mode = "process"
///
/// [station]
/// stream_url = "http://stream.example.org:8000/"
/// logger_dir = "/srv/song-log"
///
/// [slack]
/// alerts_channel = "engineering"
/// ```
///
/// All sections are optional and have reasonable defaults. Secrets are
/// usually supplied through the environment instead (see
/// [`crate::config::loader::apply_env_overrides`]).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub station: StationSection,

    #[serde(default)]
    pub slack: SlackSection,

    #[serde(default)]
    pub tunein: TuneInSection,

    #[serde(default)]
    pub genius: GeniusSection,

    #[serde(default)]
    pub update: UpdateSection,
}

/// `[scheduler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    /// Ticks per firing for the fastest tasks. Each task multiplies this by
    /// its own fixed factor (see [`crate::schedule::TaskKind::multiplier`]).
    #[serde(default = "default_base_frequency")]
    pub base_frequency: u64,

    /// Length of one tick in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    #[serde(default)]
    pub launch_mode: LaunchMode,

    /// Upper bound on concurrently running task bodies in `in_process` mode.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Program re-invoked for each firing in `process` mode. Defaults to the
    /// currently running executable.
    #[serde(default)]
    pub worker_program: Option<PathBuf>,
}

fn default_base_frequency() -> u64 {
    5
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_max_workers() -> usize {
    8
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            base_frequency: default_base_frequency(),
            tick_millis: default_tick_millis(),
            launch_mode: LaunchMode::default(),
            max_workers: default_max_workers(),
            worker_program: None,
        }
    }
}

/// `[station]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StationSection {
    /// Icecast status page for the monitored stream.
    #[serde(default)]
    pub stream_url: String,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    #[serde(default = "default_probe_attempts")]
    pub probe_attempts: u32,

    /// Where the song, lyric and run-status markers live.
    #[serde(default = "default_dir")]
    pub state_dir: PathBuf,

    /// Directory shared with the song logger (`nowPlaying.txt`,
    /// `swear.json`, `profanity.txt`, `lyrics.txt`, `lastSwear.json`).
    #[serde(default = "default_dir")]
    pub logger_dir: PathBuf,
}

fn default_probe_timeout_secs() -> u64 {
    60
}

fn default_probe_attempts() -> u32 {
    5
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for StationSection {
    fn default() -> Self {
        Self {
            stream_url: String::new(),
            probe_timeout_secs: default_probe_timeout_secs(),
            probe_attempts: default_probe_attempts(),
            state_dir: default_dir(),
            logger_dir: default_dir(),
        }
    }
}

/// `[slack]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackSection {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default = "default_nowplaying_channel")]
    pub nowplaying_channel: String,

    #[serde(default = "default_alerts_channel")]
    pub alerts_channel: String,

    #[serde(default = "default_test_channel")]
    pub test_channel: String,

    #[serde(default = "default_slack_api_base")]
    pub api_base: String,
}

fn default_display_name() -> String {
    "STATION-BOT".to_string()
}

fn default_nowplaying_channel() -> String {
    "nowplaying".to_string()
}

fn default_alerts_channel() -> String {
    "engineering".to_string()
}

fn default_test_channel() -> String {
    "boondoggling".to_string()
}

fn default_slack_api_base() -> String {
    "https://slack.com/api".to_string()
}

impl Default for SlackSection {
    fn default() -> Self {
        Self {
            token: String::new(),
            display_name: default_display_name(),
            nowplaying_channel: default_nowplaying_channel(),
            alerts_channel: default_alerts_channel(),
            test_channel: default_test_channel(),
            api_base: default_slack_api_base(),
        }
    }
}

/// `[tunein]` section (TuneIn AIR metadata API).
#[derive(Debug, Clone, Deserialize)]
pub struct TuneInSection {
    #[serde(default)]
    pub station_id: String,

    #[serde(default)]
    pub partner_id: String,

    #[serde(default)]
    pub partner_key: String,

    #[serde(default = "default_tunein_api_url")]
    pub api_url: String,
}

fn default_tunein_api_url() -> String {
    "http://air.radiotime.com/Playing.ashx".to_string()
}

impl Default for TuneInSection {
    fn default() -> Self {
        Self {
            station_id: String::new(),
            partner_id: String::new(),
            partner_key: String::new(),
            api_url: default_tunein_api_url(),
        }
    }
}

/// `[genius]` section (lyrics lookup).
#[derive(Debug, Clone, Deserialize)]
pub struct GeniusSection {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_genius_api_base")]
    pub api_base: String,

    #[serde(default = "default_genius_web_base")]
    pub web_base: String,
}

fn default_genius_api_base() -> String {
    "https://api.genius.com".to_string()
}

fn default_genius_web_base() -> String {
    "https://genius.com".to_string()
}

impl Default for GeniusSection {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_genius_api_base(),
            web_base: default_genius_web_base(),
        }
    }
}

/// `[update]` section for the self-update stub.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    #[serde(default = "default_update_command")]
    pub command: String,

    #[serde(default = "default_dir")]
    pub repo_dir: PathBuf,
}

fn default_update_command() -> String {
    "git pull".to_string()
}

impl Default for UpdateSection {
    fn default() -> Self {
        Self {
            command: default_update_command(),
            repo_dir: default_dir(),
        }
    }
}

/// Validated, immutable settings threaded through the scheduler and every
/// task body. Build one with `Settings::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub scheduler: SchedulerSettings,
    pub station: StationSettings,
    pub slack: SlackSection,
    pub tunein: TuneInSection,
    pub genius: GeniusSection,
    pub update: UpdateSection,
}

#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    pub base_frequency: u64,
    pub tick: Duration,
    pub launch_mode: LaunchMode,
    pub max_workers: usize,
    pub worker_program: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct StationSettings {
    pub stream_url: String,
    pub probe_timeout: Duration,
    pub probe_attempts: u32,
    pub state_dir: PathBuf,
    pub logger_dir: PathBuf,
}

impl Settings {
    pub(crate) fn new_unchecked(raw: RawConfig) -> Self {
        let RawConfig {
            scheduler,
            station,
            slack,
            tunein,
            genius,
            update,
        } = raw;

        Self {
            scheduler: SchedulerSettings {
                base_frequency: scheduler.base_frequency,
                tick: Duration::from_millis(scheduler.tick_millis),
                launch_mode: scheduler.launch_mode,
                max_workers: scheduler.max_workers,
                worker_program: scheduler.worker_program,
            },
            station: StationSettings {
                stream_url: station.stream_url,
                probe_timeout: Duration::from_secs(station.probe_timeout_secs),
                probe_attempts: station.probe_attempts,
                state_dir: station.state_dir,
                logger_dir: station.logger_dir,
            },
            slack,
            tunein,
            genius,
            update,
        }
    }
}
