// src/clients/mod.rs

//! External collaborators.
//!
//! Task bodies only see the traits in this module. Production wiring uses
//! the HTTP clients in the submodules; tests substitute fakes from
//! `stationwatch-test-utils`.

use std::time::Duration;

use async_trait::async_trait;

pub mod genius;
pub mod icecast;
pub mod profanity;
pub mod slack;
pub mod tunein;

pub use genius::GeniusSearch;
pub use icecast::IcecastProbe;
pub use profanity::ProfanityList;
pub use slack::SlackClient;
pub use tunein::TuneInPublisher;

/// Outcome of a single notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub ok: bool,
    /// Message timestamp on success, error text on failure.
    pub detail: String,
}

impl Delivery {
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
}

/// Chat workspace that receives announcements.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, channel: &str, text: &str, display_name: &str, icon: &str) -> Delivery;

    async fn resolve_channel_id(&self, name: &str) -> Option<String>;

    async fn list_channels(&self) -> anyhow::Result<Vec<ChannelInfo>>;
}

/// Result of one stream probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// Stream is up; carries the current track as `#NowPlaying: <track>`.
    Up(String),
    /// Stream is down; carries a human-readable diagnostic.
    Down(String),
}

#[async_trait]
pub trait StreamProbe: Send + Sync {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeResult;
}

/// Receives now-playing metadata. Failures are the publisher's problem.
#[async_trait]
pub trait MetadataPublisher: Send + Sync {
    async fn publish(
        &self,
        station_id: &str,
        partner_id: &str,
        partner_key: &str,
        title: &str,
        artist: &str,
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsReport {
    pub report: String,
    pub clean: bool,
}

/// Lyrics lookup plus profanity screening.
#[async_trait]
pub trait LyricsSearch: Send + Sync {
    async fn search(
        &self,
        title: &str,
        artist: &str,
        auth_token: &str,
        profanity: &ProfanityList,
    ) -> LyricsReport;
}
