// src/clients/icecast.rs

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::{ProbeResult, StreamProbe};

/// Prefix marking a probe result as a track identity.
pub const NOW_PLAYING_TAG: &str = "#NowPlaying: ";

/// Why a probe counted the stream as down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The status page answered but lists no stream data, so the server
    /// runs without a connected encoder.
    NoData,
    /// Timeout, connection failure or an error status.
    Unreachable,
}

impl ProbeFailure {
    pub fn diagnostic(&self) -> String {
        let cause = match self {
            ProbeFailure::NoData => {
                "No data read from the Icecast server.\n\
                 The station computer is on and Icecast is running, but no \
                 encoder is feeding it. Check for a disconnected or duplicated \
                 encoder instance first."
            }
            ProbeFailure::Unreachable => {
                "HTTP request to the Icecast status page failed or timed out.\n\
                 Possible causes:\n\
                 1) Icecast has been closed on the station computer\n\
                 2) several Icecast instances are running\n\
                 3) the station computer lost internet access\n\
                 4) the station computer is rebooting or off\n\n\
                 Check the encoder as well, it may also be down."
            }
        };
        format!("ALERT!! STREAM IS DOWN!!\nLikely cause:\n{cause}")
    }
}

/// Probes an Icecast status page and reads the current track from its
/// `streamdata` cells.
#[derive(Debug, Clone)]
pub struct IcecastProbe {
    http: reqwest::Client,
    cell: Regex,
}

impl IcecastProbe {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            cell: Regex::new(r#"(?s)<td class="streamdata">(.*?)</td>"#)?,
        })
    }

    /// Last `streamdata` cell of a status page, or `None` if there is none.
    pub fn current_track(&self, html: &str) -> Option<String> {
        self.cell
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .last()
            .map(|m| m.as_str().trim().to_string())
    }
}

#[async_trait]
impl StreamProbe for IcecastProbe {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeResult {
        let response = self
            .http
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let body = match response {
            Ok(r) => r.text().await,
            Err(err) => {
                debug!(url, error = %err, "stream probe request failed");
                return ProbeResult::Down(ProbeFailure::Unreachable.diagnostic());
            }
        };

        match body {
            Ok(html) => match self.current_track(&html) {
                Some(track) => ProbeResult::Up(format!("{NOW_PLAYING_TAG}{track}")),
                None => ProbeResult::Down(ProbeFailure::NoData.diagnostic()),
            },
            Err(err) => {
                debug!(url, error = %err, "stream probe body read failed");
                ProbeResult::Down(ProbeFailure::Unreachable.diagnostic())
            }
        }
    }
}
