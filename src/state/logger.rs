// src/state/logger.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::clients::profanity::ProfanityList;
use crate::fs::FileSystem;

pub const NOW_PLAYING_FILE: &str = "nowPlaying.txt";
pub const SWEAR_RECORD_FILE: &str = "swear.json";
pub const PROFANITY_FILE: &str = "profanity.txt";
pub const LYRICS_REPORT_FILE: &str = "lyrics.txt";

/// Files shared with the external song logger.
///
/// The logger writes `nowPlaying.txt`, `swear.json` and `profanity.txt`; we
/// only ever write the `lyrics.txt` report back.
#[derive(Debug, Clone)]
pub struct LoggerFiles {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
}

impl LoggerFiles {
    pub fn new(fs: Arc<dyn FileSystem>, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Track currently logged as playing, without its trailing newline.
    /// `None` if the file is missing or unreadable.
    pub fn now_playing(&self) -> Option<String> {
        let path = self.dir.join(NOW_PLAYING_FILE);
        if !self.fs.exists(&path) {
            debug!(path = %path.display(), "no now-playing file");
            return None;
        }
        match self.fs.read_to_string(&path) {
            Ok(text) => Some(text.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read now-playing file");
                None
            }
        }
    }

    /// Newest swear-log record. `None` if absent or not valid JSON.
    pub fn swear_record(&self) -> Option<Value> {
        let path = self.dir.join(SWEAR_RECORD_FILE);
        if !self.fs.exists(&path) {
            return None;
        }
        let text = match self.fs.read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read swear record");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed swear record");
                None
            }
        }
    }

    /// Profanity word list. A missing list is an empty list.
    pub fn profanity(&self) -> ProfanityList {
        let path = self.dir.join(PROFANITY_FILE);
        match self.fs.read_to_string(&path) {
            Ok(text) => ProfanityList::parse(&text),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "no profanity list; every song will pass");
                ProfanityList::default()
            }
        }
    }

    pub fn write_lyrics_report(&self, report: &str) -> Result<()> {
        let path = self.dir.join(LYRICS_REPORT_FILE);
        self.fs
            .write(&path, report.as_bytes())
            .with_context(|| format!("writing lyrics report {:?}", path))
    }
}
