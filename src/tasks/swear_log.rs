// src/tasks/swear_log.rs

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::state::StateKey;

use super::{TaskContext, SKULL_ICON};

/// Fields every swear-log record must carry, as strings.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "date",
    "time",
    "song title",
    "song artist",
    "song composer",
    "show name",
    "report",
];

/// Compare two records key by key in both directions, ignoring key order.
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    match (a.as_object(), b.as_object()) {
        (Some(a), Some(b)) => {
            a.iter()
                .all(|(k, v)| b.get(k).is_some_and(|w| structurally_equal(v, w)))
                && b.keys().all(|k| a.contains_key(k))
        }
        _ => a == b,
    }
}

/// Format a record for the alerts channel. `None` when any required field
/// is missing or not a string.
pub fn format_swear_log(record: &Value) -> Option<String> {
    let field = |name: &str| record.get(name).and_then(Value::as_str);
    if !REQUIRED_FIELDS.iter().all(|&f| field(f).is_some()) {
        return None;
    }
    let get = |name: &str| field(name).unwrap_or_default();

    Some(format!(
        "```\nSWEAR LOG SUBMISSION FROM {}:\n\n\
         Date         \t{}\n\
         Time         \t{}\n\
         Song     Name\t{}\n\
         Song   Artist\t{}\n\
         Song Composer\t{}\n\n\n\
         Report:    \t{}```",
        get("show name"),
        get("date"),
        get("time"),
        get("song title"),
        get("song artist"),
        get("song composer"),
        get("report"),
    ))
}

/// Relay the newest swear-log record if it differs from the last one
/// relayed.
///
/// The snapshot is updated on any difference, even when the record fails
/// validation, so a malformed record is reported once in the logs and then
/// left alone.
pub async fn run(ctx: &TaskContext) -> Result<()> {
    let Some(record) = ctx.logger.swear_record() else {
        debug!("no readable swear record");
        return Ok(());
    };

    let snapshot_text = ctx.store.get(StateKey::SwearSnapshot);
    let snapshot: Option<Value> = if snapshot_text.trim().is_empty() {
        None
    } else {
        serde_json::from_str(&snapshot_text).ok()
    };

    if snapshot
        .as_ref()
        .is_some_and(|s| structurally_equal(&record, s))
    {
        debug!("swear record unchanged");
        return Ok(());
    }

    let encoded = serde_json::to_string(&record).context("encoding swear snapshot")?;
    ctx.store.set(StateKey::SwearSnapshot, &encoded)?;

    match format_swear_log(&record) {
        Some(text) => {
            info!("relaying new swear log entry");
            ctx.announcer
                .announce(&ctx.settings.slack.alerts_channel, &text, SKULL_ICON)
                .await;
        }
        None => warn!("swear record is missing required fields; not relayed"),
    }

    Ok(())
}
