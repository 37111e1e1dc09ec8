// tests/task_mask.rs

use proptest::prelude::*;
use stationwatch::schedule::{TaskKind, TaskMask, IDLE_TOKEN};

#[test]
fn no_tokens_enables_everything() {
    let mask = TaskMask::from_tokens(Vec::<String>::new());
    assert_eq!(mask, TaskMask::ALL);
    assert_eq!(mask.kinds(), TaskKind::ALL.to_vec());
}

#[test]
fn only_unknown_tokens_gives_empty_mask() {
    let mask = TaskMask::from_tokens(["--bogus", "-x"]);
    assert!(mask.is_empty());
    assert!(mask.kinds().is_empty());
}

#[test]
fn short_and_long_aliases_compose_with_or() {
    let mask = TaskMask::from_tokens(["-n", "--status", "-n", "--nope"]);
    assert_eq!(mask, TaskMask::SONG_CHANGE | TaskMask::STREAM_HEALTH);
    assert_eq!(
        mask.kinds(),
        vec![TaskKind::SongChange, TaskKind::StreamHealth]
    );
}

#[test]
fn order_does_not_matter() {
    let a = TaskMask::from_tokens(["-w", "-l", "-u"]);
    let b = TaskMask::from_tokens(["-u", "-w", "-l"]);
    assert_eq!(a, b);
}

#[test]
fn reserved_bits_set_but_never_run() {
    let mask = TaskMask::from_tokens(["--reserved5", "--reserved7"]);
    assert!(mask.contains(TaskMask::RESERVED5));
    assert!(mask.contains(TaskMask::RESERVED7));
    assert!(!mask.contains(TaskMask::RESERVED6));
    assert!(mask.kinds().is_empty());
}

#[test]
fn empty_mask_encodes_to_idle() {
    assert_eq!(TaskMask::EMPTY.to_tokens(), vec![IDLE_TOKEN]);
    assert_eq!(TaskMask::from_tokens([IDLE_TOKEN]), TaskMask::EMPTY);
}

#[test]
fn single_task_selection_follows_priority() {
    assert_eq!(
        TaskKind::first_in_tokens(["-u", "-l", "-s"]),
        Some(TaskKind::StreamHealth)
    );
    assert_eq!(TaskKind::first_in_tokens(["--swear"]), Some(TaskKind::SwearLog));
    assert_eq!(TaskKind::first_in_tokens(["--reserved6"]), None);
    assert_eq!(TaskKind::first_in_tokens(Vec::<&str>::new()), None);
}

#[test]
fn every_kind_flag_decodes_to_itself() {
    for kind in TaskKind::ALL {
        assert_eq!(TaskMask::from_tokens([kind.long_flag()]), kind.flag());
        assert_eq!(TaskMask::from_tokens([kind.short_flag()]), kind.flag());
    }
}

proptest! {
    #[test]
    fn tokens_round_trip_every_mask(bits in any::<u8>()) {
        let mask = TaskMask::from_bits(bits);
        let tokens = mask.to_tokens();
        prop_assert_eq!(TaskMask::from_tokens(tokens), mask);
    }

    #[test]
    fn or_matches_decoding_concatenated_tokens(a in any::<u8>(), b in any::<u8>()) {
        let (ma, mb) = (TaskMask::from_bits(a), TaskMask::from_bits(b));
        let mut tokens = ma.to_tokens();
        tokens.extend(mb.to_tokens());
        prop_assert_eq!(TaskMask::from_tokens(tokens), ma | mb);
    }
}
