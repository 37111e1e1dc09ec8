// src/tasks/song_change.rs

use anyhow::Result;
use tracing::{debug, info};

use crate::clients::ProbeResult;
use crate::state::store::FORCE_SONG_MARKER;
use crate::state::StateKey;

use super::metadata::{announcement_text, split_metadata};
use super::{TaskContext, MUSIC_ICON};

/// Announce the current track if it differs from the last one announced,
/// then publish its metadata. A `"None"` marker forces one announcement.
///
/// When the stream is down there is no track to compare, so the marker is
/// left alone.
pub async fn run(ctx: &TaskContext) -> Result<()> {
    let station = &ctx.settings.station;
    let current = match ctx.probe.probe(&station.stream_url, station.probe_timeout).await {
        ProbeResult::Up(track) => track,
        ProbeResult::Down(_) => {
            info!("stream down; no track to compare");
            return Ok(());
        }
    };

    let last = ctx.store.get(StateKey::LastSong);
    let changed = last == FORCE_SONG_MARKER || last != current;
    debug!(last = %last, current = %current, changed, "comparing tracks");

    if changed {
        let slack = &ctx.settings.slack;
        ctx.announcer
            .announce(&slack.nowplaying_channel, &announcement_text(&current), MUSIC_ICON)
            .await;

        let (title, artist) = split_metadata(&current);
        let tunein = &ctx.settings.tunein;
        ctx.publisher
            .publish(&tunein.station_id, &tunein.partner_id, &tunein.partner_key, &title, &artist)
            .await;
    }

    ctx.store.set(StateKey::LastSong, &current)
}
