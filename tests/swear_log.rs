// tests/swear_log.rs

mod common;
use crate::common::init_tracing;

use serde_json::json;
use stationwatch::state::logger::SWEAR_RECORD_FILE;
use stationwatch::state::StateKey;
use stationwatch::tasks::swear_log::{self, format_swear_log, structurally_equal};
use stationwatch::tasks::SKULL_ICON;
use stationwatch_test_utils::harness::TaskHarness;

fn harness() -> TaskHarness {
    TaskHarness::new(TaskHarness::up("#NowPlaying: irrelevant"))
}

const RECORD: &str = r#"{
    "date": "2024-03-01",
    "time": "14:05",
    "song title": "Song",
    "song artist": "Band",
    "song composer": "Writer",
    "show name": "Morning Show",
    "report": "Caught it late"
}"#;

const RECORD_REORDERED: &str = r#"{
    "report": "Caught it late",
    "show name": "Morning Show",
    "song composer": "Writer",
    "song artist": "Band",
    "song title": "Song",
    "time": "14:05",
    "date": "2024-03-01"
}"#;

#[test]
fn structural_equality_ignores_key_order_and_checks_both_ways() {
    let a = json!({"a": 1, "b": {"c": [1, 2]}});
    let b = json!({"b": {"c": [1, 2]}, "a": 1});
    assert!(structurally_equal(&a, &b));

    let superset = json!({"a": 1, "b": {"c": [1, 2]}, "extra": true});
    assert!(!structurally_equal(&a, &superset));
    assert!(!structurally_equal(&superset, &a));

    let changed = json!({"a": 2, "b": {"c": [1, 2]}});
    assert!(!structurally_equal(&a, &changed));
}

#[test]
fn formatter_requires_all_string_fields() {
    let record: serde_json::Value = serde_json::from_str(RECORD).unwrap();
    let text = format_swear_log(&record).unwrap();
    assert!(text.starts_with("```\nSWEAR LOG SUBMISSION FROM Morning Show:"));
    assert!(text.contains("Song   Artist\tBand\n"));
    assert!(text.ends_with("Report:    \tCaught it late```"));

    let mut missing = record.clone();
    missing.as_object_mut().unwrap().remove("song composer");
    assert_eq!(format_swear_log(&missing), None);

    let mut wrong_type = record;
    wrong_type["time"] = json!(1405);
    assert_eq!(format_swear_log(&wrong_type), None);
}

#[tokio::test]
async fn reordered_record_is_not_relayed_again() -> anyhow::Result<()> {
    init_tracing();
    let h = harness();
    h.write_logger_file(SWEAR_RECORD_FILE, RECORD);

    swear_log::run(&h.ctx).await?;
    assert_eq!(h.notifier.sent().len(), 1);

    h.write_logger_file(SWEAR_RECORD_FILE, RECORD_REORDERED);
    swear_log::run(&h.ctx).await?;
    swear_log::run(&h.ctx).await?;

    assert_eq!(h.notifier.sent().len(), 1);
    Ok(())
}

#[tokio::test]
async fn single_field_change_relays_once_and_updates_snapshot() -> anyhow::Result<()> {
    init_tracing();
    let h = harness();
    h.write_logger_file(SWEAR_RECORD_FILE, RECORD);
    swear_log::run(&h.ctx).await?;

    let changed = RECORD.replace("Caught it late", "Dumped in time");
    h.write_logger_file(SWEAR_RECORD_FILE, &changed);
    swear_log::run(&h.ctx).await?;
    swear_log::run(&h.ctx).await?;

    let sent = h.notifier.sent_to(h.alerts_channel());
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].icon, SKULL_ICON);
    assert!(sent[1].text.contains("Dumped in time"));

    let snapshot: serde_json::Value =
        serde_json::from_str(&h.marker(StateKey::SwearSnapshot).unwrap())?;
    assert_eq!(snapshot["report"], "Dumped in time");
    Ok(())
}

#[tokio::test]
async fn invalid_record_is_snapshotted_but_not_relayed() -> anyhow::Result<()> {
    init_tracing();
    let h = harness();
    h.write_logger_file(SWEAR_RECORD_FILE, r#"{"date": "2024-03-01"}"#);

    swear_log::run(&h.ctx).await?;

    assert!(h.notifier.sent().is_empty());
    assert!(h.marker(StateKey::SwearSnapshot).is_some());
    Ok(())
}

#[tokio::test]
async fn malformed_json_fails_closed() -> anyhow::Result<()> {
    init_tracing();
    let h = harness();
    h.write_logger_file(SWEAR_RECORD_FILE, "{not json");

    swear_log::run(&h.ctx).await?;

    assert!(h.notifier.sent().is_empty());
    assert!(h.marker(StateKey::SwearSnapshot).is_none());
    Ok(())
}
