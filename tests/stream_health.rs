// tests/stream_health.rs

mod common;
use crate::common::init_tracing;

use stationwatch::clients::ProbeResult;
use stationwatch::state::StateKey;
use stationwatch::tasks::stream_health::{self, BACK_ONLINE_TEXT};
use stationwatch::tasks::{ROBOT_ICON, SKULL_ICON};
use stationwatch::types::RunStatus;
use stationwatch_test_utils::builders::SettingsBuilder;
use stationwatch_test_utils::fakes::{FakeLyrics, ScriptedProbe};
use stationwatch_test_utils::harness::{TaskHarness, LOGGER_DIR, STATE_DIR};

fn up() -> ProbeResult {
    ProbeResult::Up("#NowPlaying: Song __by__ Artist".to_string())
}

fn down() -> ProbeResult {
    ProbeResult::Down("ALERT!! STREAM IS DOWN!!".to_string())
}

fn harness_with_attempts(attempts: u32, probe: ScriptedProbe) -> TaskHarness {
    let settings = SettingsBuilder::new()
        .state_dir(STATE_DIR)
        .logger_dir(LOGGER_DIR)
        .probe_attempts(attempts)
        .build();
    TaskHarness::with_settings(settings, probe, FakeLyrics::clean())
}

#[tokio::test]
async fn incident_is_deduplicated() -> anyhow::Result<()> {
    init_tracing();
    // One probe attempt per firing: down, down, down, up, up.
    let probe = ScriptedProbe::new(vec![down(), down(), down(), up()], up());
    let h = harness_with_attempts(1, probe);
    h.store().set_run_status(RunStatus::Running)?;

    for _ in 0..5 {
        stream_health::run(&h.ctx).await?;
    }

    let sent = h.notifier.sent_to(h.alerts_channel());
    let diagnostics: Vec<_> = sent.iter().filter(|m| m.icon == SKULL_ICON).collect();
    let recoveries: Vec<_> = sent.iter().filter(|m| m.text == BACK_ONLINE_TEXT).collect();

    assert_eq!(sent.len(), 4);
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(recoveries.len(), 1);
    assert_eq!(recoveries[0].icon, ROBOT_ICON);
    // The recovery is the fourth message, right after the last diagnostic.
    assert_eq!(sent[3].text, BACK_ONLINE_TEXT);
    assert_eq!(h.store().run_status(), RunStatus::Running);
    Ok(())
}

#[tokio::test]
async fn retries_stop_at_first_success() -> anyhow::Result<()> {
    init_tracing();
    let probe = ScriptedProbe::new(vec![down(), down(), up()], down());
    let h = harness_with_attempts(5, probe);

    stream_health::run(&h.ctx).await?;

    assert_eq!(h.probe.calls(), 3);
    assert!(h.notifier.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn down_after_all_attempts_sets_stream_down() -> anyhow::Result<()> {
    init_tracing();
    let h = harness_with_attempts(5, ScriptedProbe::down("no data"));
    h.store().set_run_status(RunStatus::Running)?;

    stream_health::run(&h.ctx).await?;

    assert_eq!(h.probe.calls(), 5);
    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "no data");
    assert_eq!(h.marker(StateKey::RunStatus).as_deref(), Some("Stream Down"));
    Ok(())
}

#[tokio::test]
async fn online_without_prior_incident_is_silent() -> anyhow::Result<()> {
    init_tracing();
    let h = TaskHarness::new(ScriptedProbe::new(vec![], up()));

    stream_health::run(&h.ctx).await?;

    assert!(h.notifier.sent().is_empty());
    assert_eq!(h.store().run_status(), RunStatus::Running);
    Ok(())
}

#[tokio::test]
async fn pending_shutdown_is_never_overwritten() -> anyhow::Result<()> {
    init_tracing();
    let h = harness_with_attempts(1, ScriptedProbe::new(vec![down()], up()));
    h.store().set_run_status(RunStatus::Done)?;

    stream_health::run(&h.ctx).await?;
    assert_eq!(h.store().run_status(), RunStatus::Done);

    stream_health::run(&h.ctx).await?;
    assert_eq!(h.store().run_status(), RunStatus::Done);
    Ok(())
}
