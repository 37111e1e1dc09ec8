// src/tasks/stream_health.rs

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::clients::ProbeResult;
use crate::types::RunStatus;

use super::{TaskContext, ROBOT_ICON, SKULL_ICON};

pub const BACK_ONLINE_TEXT: &str = "The Stream is Back Online!";

/// Probe the stream up to `probe_attempts` times.
///
/// - Up after being down: announce recovery and mark `Running`.
/// - Up and already `Running`: nothing.
/// - Down on every attempt: send the diagnostic and mark `StreamDown`. This
///   repeats on every firing until the stream recovers.
///
/// A `Done` marker is never overwritten, so a pending shutdown request
/// survives a concurrent health check.
pub async fn run(ctx: &TaskContext) -> Result<()> {
    let station = &ctx.settings.station;
    let attempts = station.probe_attempts.max(1);

    let mut outcome = ProbeResult::Down(String::new());
    for attempt in 1..=attempts {
        outcome = ctx.probe.probe(&station.stream_url, station.probe_timeout).await;
        if matches!(outcome, ProbeResult::Up(_)) {
            break;
        }
        debug!(attempt, attempts, "stream probe failed");
    }

    let status = ctx.store.run_status();
    let alerts = &ctx.settings.slack.alerts_channel;

    match outcome {
        ProbeResult::Up(_) => match status {
            RunStatus::StreamDown => {
                info!("stream recovered");
                ctx.announcer.announce(alerts, BACK_ONLINE_TEXT, ROBOT_ICON).await;
                ctx.store.set_run_status(RunStatus::Running)?;
            }
            RunStatus::Running => debug!("stream online"),
            RunStatus::Done => debug!("stream online; shutdown pending"),
        },
        ProbeResult::Down(diagnostic) => {
            warn!(attempts, "stream down");
            ctx.announcer.announce(alerts, &diagnostic, SKULL_ICON).await;
            if status != RunStatus::Done {
                ctx.store.set_run_status(RunStatus::StreamDown)?;
            }
        }
    }

    Ok(())
}
