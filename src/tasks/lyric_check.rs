// src/tasks/lyric_check.rs

use anyhow::Result;
use tracing::{debug, info};

use crate::state::StateKey;

use super::metadata::split_metadata;
use super::{TaskContext, SKULL_ICON};

/// Screen the lyrics of the song the logger reports as playing.
///
/// Works from `nowPlaying.txt` rather than the stream, so it keeps running
/// while the stream is down. The report is always written to `lyrics.txt`;
/// the alerts channel only hears about songs that fail screening.
pub async fn run(ctx: &TaskContext) -> Result<()> {
    let Some(current) = ctx.logger.now_playing() else {
        debug!("logger has no now-playing entry");
        return Ok(());
    };

    let last = ctx.store.get(StateKey::LastLyric);
    if current == last {
        debug!(track = %current, "lyrics already checked");
        return Ok(());
    }

    ctx.store.set(StateKey::LastLyric, &current)?;

    let (title, artist) = split_metadata(&current);
    let profanity = ctx.logger.profanity();
    let result = ctx
        .lyrics
        .search(&title, &artist, &ctx.settings.genius.token, &profanity)
        .await;

    info!(title = %title, artist = %artist, clean = result.clean, "lyrics checked");

    if !result.clean {
        let text = format!(
            "Warning! Song currently playing may contain swears. Generating Report...\n```{}```",
            result.report
        );
        ctx.announcer
            .announce(&ctx.settings.slack.alerts_channel, &text, SKULL_ICON)
            .await;
    }

    ctx.logger.write_lyrics_report(&result.report)
}
