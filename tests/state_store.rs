// tests/state_store.rs

use std::sync::Arc;

use stationwatch::fs::mock::MockFileSystem;
use stationwatch::fs::RealFileSystem;
use stationwatch::state::{LoggerFiles, StateKey, StateStore};
use stationwatch::types::RunStatus;

#[test]
fn missing_markers_read_as_defaults() {
    let store = StateStore::new(Arc::new(MockFileSystem::new()), "/state", "/logger");

    assert_eq!(store.get(StateKey::LastSong), "");
    assert_eq!(store.get(StateKey::LastLyric), "");
    assert_eq!(store.get(StateKey::SwearSnapshot), "");
    assert_eq!(store.get(StateKey::RunStatus), "Running");
    assert_eq!(store.run_status(), RunStatus::Running);
}

#[test]
fn markers_live_in_their_directories() {
    let store = StateStore::new(Arc::new(MockFileSystem::new()), "/state", "/logger");

    assert_eq!(store.path_of(StateKey::LastSong).to_str(), Some("/state/.station.song"));
    assert_eq!(store.path_of(StateKey::LastLyric).to_str(), Some("/state/.station.lyric"));
    assert_eq!(store.path_of(StateKey::RunStatus).to_str(), Some("/state/.station.stat"));
    assert_eq!(
        store.path_of(StateKey::SwearSnapshot).to_str(),
        Some("/logger/lastSwear.json")
    );
}

#[test]
fn set_overwrites_and_clear_removes() {
    let fs = MockFileSystem::new();
    let store = StateStore::new(Arc::new(fs.clone()), "/state", "/logger");

    store.set(StateKey::LastLyric, "first").unwrap();
    store.set(StateKey::LastLyric, "second").unwrap();
    assert_eq!(store.get(StateKey::LastLyric), "second");

    store.set_run_status(RunStatus::StreamDown).unwrap();
    assert_eq!(fs.contents("/state/.station.stat").as_deref(), Some("Stream Down"));
    assert_eq!(store.run_status(), RunStatus::StreamDown);

    store.clear(StateKey::RunStatus).unwrap();
    assert!(fs.contents("/state/.station.stat").is_none());
    assert_eq!(store.run_status(), RunStatus::Running);

    // Clearing twice is fine.
    store.clear(StateKey::RunStatus).unwrap();
}

#[test]
fn keys_are_independent() {
    let store = StateStore::new(Arc::new(MockFileSystem::new()), "/state", "/logger");
    store.set(StateKey::LastSong, "a").unwrap();
    store.set(StateKey::LastLyric, "b").unwrap();
    store.clear(StateKey::LastSong).unwrap();
    assert_eq!(store.get(StateKey::LastSong), "");
    assert_eq!(store.get(StateKey::LastLyric), "b");
}

#[test]
fn malformed_run_status_reads_as_running() {
    let fs = MockFileSystem::new();
    fs.add_file("/state/.station.stat", "garbage");
    let store = StateStore::new(Arc::new(fs), "/state", "/logger");
    assert_eq!(store.run_status(), RunStatus::Running);
}

#[test]
fn trailing_newline_from_external_writers_is_ignored() {
    let fs = MockFileSystem::new();
    fs.add_file("/state/.station.stat", "Done\n");
    let store = StateStore::new(Arc::new(fs), "/state", "/logger");
    assert_eq!(store.run_status(), RunStatus::Done);
}

#[test]
fn real_filesystem_round_trip_and_kill_marker() {
    let dir = tempfile::tempdir().unwrap();
    let state_dir = dir.path().join("state");
    let store = StateStore::new(Arc::new(RealFileSystem), &state_dir, dir.path());

    assert_eq!(store.run_status(), RunStatus::Running);
    store.set_run_status(RunStatus::Done).unwrap();
    assert_eq!(
        std::fs::read_to_string(state_dir.join(".station.stat")).unwrap(),
        "Done"
    );
    store.clear(StateKey::RunStatus).unwrap();
    assert!(!state_dir.join(".station.stat").exists());
}

#[test]
fn logger_files_read_inputs_and_write_report() {
    let fs = MockFileSystem::new();
    fs.add_file("/logger/nowPlaying.txt", "Song __by__ Band\r\n");
    fs.add_file("/logger/profanity.txt", "darn\nheck\n\n");
    fs.add_file("/logger/swear.json", r#"{"date": "today"}"#);
    let logger = LoggerFiles::new(Arc::new(fs.clone()), "/logger");

    assert_eq!(logger.now_playing().as_deref(), Some("Song __by__ Band"));
    assert_eq!(logger.profanity().len(), 2);
    assert_eq!(logger.swear_record().unwrap()["date"], "today");

    logger.write_lyrics_report("report").unwrap();
    assert_eq!(fs.contents("/logger/lyrics.txt").as_deref(), Some("report"));
}

#[test]
fn logger_files_tolerate_missing_inputs() {
    let logger = LoggerFiles::new(Arc::new(MockFileSystem::new()), "/logger");
    assert!(logger.now_playing().is_none());
    assert!(logger.swear_record().is_none());
    assert!(logger.profanity().is_empty());
}
