// src/state/store.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::fs::FileSystem;
use crate::types::RunStatus;

/// Sentinel song marker that forces one unconditional announcement.
pub const FORCE_SONG_MARKER: &str = "None";

/// Persisted scalars. Each key is written by a single owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    /// Last track announced by the song-change task.
    LastSong,
    /// Last track the lyric check ran against.
    LastLyric,
    /// Loop continuation and stream incident marker.
    RunStatus,
    /// Last relayed swear-log record, as JSON.
    SwearSnapshot,
}

impl StateKey {
    /// File name of the marker.
    pub fn file_name(&self) -> &'static str {
        match self {
            StateKey::LastSong => ".station.song",
            StateKey::LastLyric => ".station.lyric",
            StateKey::RunStatus => ".station.stat",
            StateKey::SwearSnapshot => "lastSwear.json",
        }
    }

    /// Value returned by [`StateStore::get`] when the marker is missing.
    pub fn default_value(&self) -> &'static str {
        match self {
            StateKey::RunStatus => RunStatus::Running.as_str(),
            _ => "",
        }
    }

    /// The swear snapshot lives with the logger's files; everything else
    /// lives in the state directory.
    fn lives_in_logger_dir(&self) -> bool {
        matches!(self, StateKey::SwearSnapshot)
    }
}

/// File-backed key/value store for the markers.
///
/// Reads never fail: a missing or unreadable marker yields
/// [`StateKey::default_value`]. Writes overwrite unconditionally.
#[derive(Debug, Clone)]
pub struct StateStore {
    fs: Arc<dyn FileSystem>,
    state_dir: PathBuf,
    logger_dir: PathBuf,
}

impl StateStore {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        state_dir: impl Into<PathBuf>,
        logger_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fs,
            state_dir: state_dir.into(),
            logger_dir: logger_dir.into(),
        }
    }

    /// Absolute (or working-dir relative) location of a marker.
    pub fn path_of(&self, key: StateKey) -> PathBuf {
        let dir: &Path = if key.lives_in_logger_dir() {
            &self.logger_dir
        } else {
            &self.state_dir
        };
        dir.join(key.file_name())
    }

    pub fn get(&self, key: StateKey) -> String {
        let path = self.path_of(key);
        if !self.fs.exists(&path) {
            return key.default_value().to_string();
        }
        match self.fs.read_to_string(&path) {
            Ok(value) => value.trim_end_matches(['\r', '\n']).to_string(),
            Err(err) => {
                warn!(marker = %path.display(), error = %err, "unreadable marker; using default");
                key.default_value().to_string()
            }
        }
    }

    pub fn set(&self, key: StateKey, value: &str) -> Result<()> {
        let path = self.path_of(key);
        debug!(marker = %path.display(), value, "writing marker");
        self.fs
            .write(&path, value.as_bytes())
            .with_context(|| format!("writing marker {:?}", key))
    }

    pub fn clear(&self, key: StateKey) -> Result<()> {
        let path = self.path_of(key);
        debug!(marker = %path.display(), "clearing marker");
        self.fs
            .remove_file(&path)
            .with_context(|| format!("clearing marker {:?}", key))
    }

    /// Current run status. An unparseable marker is treated as `Running`.
    pub fn run_status(&self) -> RunStatus {
        let raw = self.get(StateKey::RunStatus);
        raw.parse().unwrap_or_else(|err: String| {
            warn!(error = %err, "malformed run status marker; treating as Running");
            RunStatus::Running
        })
    }

    pub fn set_run_status(&self, status: RunStatus) -> Result<()> {
        self.set(StateKey::RunStatus, status.as_str())
    }
}
