use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use stationwatch::clients::{
    ChannelInfo, Delivery, LyricsReport, LyricsSearch, MetadataPublisher, Notifier,
    ProbeResult, ProfanityList, StreamProbe,
};
use stationwatch::exec::TaskLauncher;
use stationwatch::schedule::TaskKind;

/// A message captured by [`FakeNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: String,
    pub text: String,
    pub display_name: String,
    pub icon: String,
}

/// A fake notifier that records every message and always succeeds unless
/// told otherwise. Channel names resolve to themselves.
#[derive(Debug, Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<SentMessage>>,
    channels: Vec<ChannelInfo>,
    fail_with: Option<String>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            fail_with: Some(detail.to_string()),
            ..Self::default()
        }
    }

    pub fn with_channels(channels: Vec<ChannelInfo>) -> Self {
        Self {
            channels,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, channel: &str) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.channel == channel)
            .collect()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, channel: &str, text: &str, display_name: &str, icon: &str) -> Delivery {
        self.sent.lock().unwrap().push(SentMessage {
            channel: channel.to_string(),
            text: text.to_string(),
            display_name: display_name.to_string(),
            icon: icon.to_string(),
        });
        match &self.fail_with {
            Some(detail) => Delivery::failed(detail.clone()),
            None => Delivery {
                ok: true,
                detail: "1700000000.000100".to_string(),
            },
        }
    }

    async fn resolve_channel_id(&self, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    async fn list_channels(&self) -> anyhow::Result<Vec<ChannelInfo>> {
        Ok(self.channels.clone())
    }
}

/// A probe that replays a script of results, then repeats a fallback.
#[derive(Debug)]
pub struct ScriptedProbe {
    script: Mutex<VecDeque<ProbeResult>>,
    fallback: ProbeResult,
    calls: Mutex<usize>,
}

impl ScriptedProbe {
    pub fn new(script: Vec<ProbeResult>, fallback: ProbeResult) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(0),
        }
    }

    /// Always reports the stream up with `track`.
    pub fn up(track: &str) -> Self {
        Self::new(Vec::new(), ProbeResult::Up(track.to_string()))
    }

    /// Always reports the stream down with `diagnostic`.
    pub fn down(diagnostic: &str) -> Self {
        Self::new(Vec::new(), ProbeResult::Down(diagnostic.to_string()))
    }

    /// Queue more results in front of the fallback.
    pub fn push(&self, result: ProbeResult) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl StreamProbe for ScriptedProbe {
    async fn probe(&self, _url: &str, _timeout: Duration) -> ProbeResult {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// A metadata publisher that records `(title, artist)` pairs.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataPublisher for RecordingPublisher {
    async fn publish(
        &self,
        _station_id: &str,
        _partner_id: &str,
        _partner_key: &str,
        title: &str,
        artist: &str,
    ) {
        self.published
            .lock()
            .unwrap()
            .push((title.to_string(), artist.to_string()));
    }
}

/// A lyrics search that returns a fixed report and records its queries.
#[derive(Debug)]
pub struct FakeLyrics {
    result: Mutex<LyricsReport>,
    queries: Mutex<Vec<(String, String)>>,
}

impl FakeLyrics {
    pub fn new(report: &str, clean: bool) -> Self {
        Self {
            result: Mutex::new(LyricsReport {
                report: report.to_string(),
                clean,
            }),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn clean() -> Self {
        Self::new("PASS Profanity Test #1", true)
    }

    pub fn set_result(&self, report: &str, clean: bool) {
        *self.result.lock().unwrap() = LyricsReport {
            report: report.to_string(),
            clean,
        };
    }

    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LyricsSearch for FakeLyrics {
    async fn search(
        &self,
        title: &str,
        artist: &str,
        _auth_token: &str,
        _profanity: &ProfanityList,
    ) -> LyricsReport {
        self.queries
            .lock()
            .unwrap()
            .push((title.to_string(), artist.to_string()));
        self.result.lock().unwrap().clone()
    }
}

type LaunchHook = Box<dyn FnMut(usize, TaskKind) + Send>;

/// A fake launcher that:
/// - records which tasks were launched
/// - optionally runs a hook on every launch (1-based launch count)
/// - optionally refuses to launch some kinds.
pub struct RecordingLauncher {
    launched: Arc<Mutex<Vec<TaskKind>>>,
    on_launch: Option<LaunchHook>,
    refuse: Vec<TaskKind>,
}

impl RecordingLauncher {
    pub fn new(launched: Arc<Mutex<Vec<TaskKind>>>) -> Self {
        Self {
            launched,
            on_launch: None,
            refuse: Vec::new(),
        }
    }

    pub fn on_launch(mut self, hook: impl FnMut(usize, TaskKind) + Send + 'static) -> Self {
        self.on_launch = Some(Box::new(hook));
        self
    }

    /// Launching `kind` fails (after being recorded).
    pub fn refuse(mut self, kind: TaskKind) -> Self {
        self.refuse.push(kind);
        self
    }
}

impl TaskLauncher for RecordingLauncher {
    fn launch(
        &mut self,
        kind: TaskKind,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        let count = {
            let mut guard = self.launched.lock().unwrap();
            guard.push(kind);
            guard.len()
        };
        if let Some(hook) = self.on_launch.as_mut() {
            hook(count, kind);
        }
        let refused = self.refuse.contains(&kind);

        Box::pin(async move {
            if refused {
                anyhow::bail!("refusing to launch {kind}");
            }
            Ok(())
        })
    }
}
