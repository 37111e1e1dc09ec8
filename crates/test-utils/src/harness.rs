#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use stationwatch::clients::ProbeResult;
use stationwatch::config::Settings;
use stationwatch::fs::mock::MockFileSystem;
use stationwatch::fs::FileSystem;
use stationwatch::state::{LoggerFiles, StateKey, StateStore};
use stationwatch::tasks::{Announcer, TaskContext};

use crate::builders::SettingsBuilder;
use crate::fakes::{FakeLyrics, FakeNotifier, RecordingPublisher, ScriptedProbe};

pub const STATE_DIR: &str = "/state";
pub const LOGGER_DIR: &str = "/logger";

/// A `TaskContext` over an in-memory filesystem and fake collaborators,
/// with handles kept so tests can inspect what happened.
pub struct TaskHarness {
    pub fs: MockFileSystem,
    pub notifier: Arc<FakeNotifier>,
    pub probe: Arc<ScriptedProbe>,
    pub publisher: Arc<RecordingPublisher>,
    pub lyrics: Arc<FakeLyrics>,
    pub ctx: TaskContext,
}

impl TaskHarness {
    /// Default settings, a probe that reports `track` and clean lyrics.
    pub fn new(probe: ScriptedProbe) -> Self {
        Self::with_settings(
            SettingsBuilder::new()
                .state_dir(STATE_DIR)
                .logger_dir(LOGGER_DIR)
                .stream_url("http://stream.test/status.xsl")
                .genius_token("genius-token")
                .build(),
            probe,
            FakeLyrics::clean(),
        )
    }

    pub fn with_settings(settings: Settings, probe: ScriptedProbe, lyrics: FakeLyrics) -> Self {
        let fs = MockFileSystem::new();
        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        let store = StateStore::new(
            Arc::clone(&shared),
            &settings.station.state_dir,
            &settings.station.logger_dir,
        );
        let logger = LoggerFiles::new(shared, &settings.station.logger_dir);

        let notifier = Arc::new(FakeNotifier::new());
        let probe = Arc::new(probe);
        let publisher = Arc::new(RecordingPublisher::new());
        let lyrics = Arc::new(lyrics);

        let ctx = TaskContext {
            announcer: Announcer::new(notifier.clone(), &settings.slack.display_name),
            settings,
            store,
            logger,
            probe: probe.clone(),
            publisher: publisher.clone(),
            lyrics: lyrics.clone(),
        };

        Self {
            fs,
            notifier,
            probe,
            publisher,
            lyrics,
            ctx,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.ctx.store
    }

    pub fn marker(&self, key: StateKey) -> Option<String> {
        self.fs.contents(self.ctx.store.path_of(key))
    }

    pub fn logger_path(&self, name: &str) -> PathBuf {
        self.ctx.logger.dir().join(name)
    }

    pub fn write_logger_file(&self, name: &str, contents: &str) {
        self.fs.add_file(self.logger_path(name), contents);
    }

    pub fn logger_file(&self, name: &str) -> Option<String> {
        self.fs.contents(self.logger_path(name))
    }

    pub fn alerts_channel(&self) -> &str {
        &self.ctx.settings.slack.alerts_channel
    }

    pub fn nowplaying_channel(&self) -> &str {
        &self.ctx.settings.slack.nowplaying_channel
    }

    /// Probe reporting the stream up with `track`.
    pub fn up(track: &str) -> ScriptedProbe {
        ScriptedProbe::up(track)
    }

    pub fn script(results: Vec<ProbeResult>, fallback: ProbeResult) -> ScriptedProbe {
        ScriptedProbe::new(results, fallback)
    }
}
