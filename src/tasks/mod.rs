// src/tasks/mod.rs

//! Task bodies.
//!
//! Each body runs once per firing, reads and writes only its own markers
//! in the [`StateStore`], and talks to the outside world through the
//! collaborator traits in [`crate::clients`]. Bodies are idempotent:
//! running one again with unchanged upstream input has no visible effect.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::clients::{
    Delivery, GeniusSearch, IcecastProbe, LyricsSearch, MetadataPublisher, Notifier,
    SlackClient, StreamProbe, TuneInPublisher,
};
use crate::config::Settings;
use crate::fs::{FileSystem, RealFileSystem};
use crate::schedule::TaskKind;
use crate::state::{LoggerFiles, StateStore};

pub mod lyric_check;
pub mod metadata;
pub mod self_update;
pub mod song_change;
pub mod stream_health;
pub mod swear_log;

pub const ROBOT_ICON: &str = ":robot_face:";
pub const SKULL_ICON: &str = ":skull:";
pub const MUSIC_ICON: &str = ":musical_note:";

/// Sends messages under the configured display name.
#[derive(Clone)]
pub struct Announcer {
    notifier: Arc<dyn Notifier>,
    display_name: String,
}

impl Announcer {
    pub fn new(notifier: Arc<dyn Notifier>, display_name: impl Into<String>) -> Self {
        Self {
            notifier,
            display_name: display_name.into(),
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Post `text` to the channel named `channel`. Falls back to the raw
    /// name if it cannot be resolved to an id.
    pub async fn announce(&self, channel: &str, text: &str, icon: &str) -> Delivery {
        let target = self
            .notifier
            .resolve_channel_id(channel)
            .await
            .unwrap_or_else(|| channel.to_string());

        let delivery = self
            .notifier
            .send(&target, text, &self.display_name, icon)
            .await;

        if delivery.ok {
            info!(channel, "message sent");
        } else {
            warn!(channel, detail = %delivery.detail, "message not delivered");
        }
        delivery
    }
}

/// Everything a task body needs for one firing.
#[derive(Clone)]
pub struct TaskContext {
    pub settings: Settings,
    pub store: StateStore,
    pub logger: LoggerFiles,
    pub announcer: Announcer,
    pub probe: Arc<dyn StreamProbe>,
    pub publisher: Arc<dyn MetadataPublisher>,
    pub lyrics: Arc<dyn LyricsSearch>,
}

impl TaskContext {
    /// Production wiring: real filesystem and HTTP collaborators.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let store = StateStore::new(
            Arc::clone(&fs),
            &settings.station.state_dir,
            &settings.station.logger_dir,
        );
        let logger = LoggerFiles::new(fs, &settings.station.logger_dir);
        let notifier = Arc::new(SlackClient::new(&settings.slack.api_base, &settings.slack.token));
        let announcer = Announcer::new(notifier, &settings.slack.display_name);
        let probe = Arc::new(IcecastProbe::new()?);
        let publisher = Arc::new(TuneInPublisher::new(&settings.tunein.api_url));
        let lyrics = Arc::new(GeniusSearch::new(&settings.genius.api_base, &settings.genius.web_base)?);

        Ok(Self {
            settings,
            store,
            logger,
            announcer,
            probe,
            publisher,
            lyrics,
        })
    }
}

/// Run one task body to completion.
pub async fn run_task(kind: TaskKind, ctx: &TaskContext) -> Result<()> {
    info!(task = %kind, "running task");
    match kind {
        TaskKind::SongChange => song_change::run(ctx).await,
        TaskKind::StreamHealth => stream_health::run(ctx).await,
        TaskKind::LyricCheck => lyric_check::run(ctx).await,
        TaskKind::SwearLog => swear_log::run(ctx).await,
        TaskKind::SelfUpdate => self_update::run(ctx).await,
    }
}
