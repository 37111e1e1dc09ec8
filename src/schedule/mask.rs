// src/schedule/mask.rs

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use tracing::debug;

use super::task_kind::TaskKind;

/// Token that is recognised but enables nothing. It is what an empty mask
/// encodes to.
pub const IDLE_TOKEN: &str = "--idle";

/// Fixed-width set of task flags, one bit per slot.
///
/// Bits 4..=6 are reserved slots with no task body; they can be set and
/// round-trip through tokens but never fire anything.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TaskMask(u8);

/// `(flag, long token, short token)` for every slot, lowest bit first.
const FLAG_TOKENS: [(TaskMask, &str, Option<&str>); 8] = [
    (TaskMask::SONG_CHANGE, "--nowplaying", Some("-n")),
    (TaskMask::STREAM_HEALTH, "--status", Some("-s")),
    (TaskMask::LYRIC_CHECK, "--lyric", Some("-l")),
    (TaskMask::SWEAR_LOG, "--swear", Some("-w")),
    (TaskMask::RESERVED5, "--reserved5", None),
    (TaskMask::RESERVED6, "--reserved6", None),
    (TaskMask::RESERVED7, "--reserved7", None),
    (TaskMask::SELF_UPDATE, "--update", Some("-u")),
];

impl TaskMask {
    pub const EMPTY: TaskMask = TaskMask(0);
    pub const SONG_CHANGE: TaskMask = TaskMask(1 << 0);
    pub const STREAM_HEALTH: TaskMask = TaskMask(1 << 1);
    pub const LYRIC_CHECK: TaskMask = TaskMask(1 << 2);
    pub const SWEAR_LOG: TaskMask = TaskMask(1 << 3);
    pub const RESERVED5: TaskMask = TaskMask(1 << 4);
    pub const RESERVED6: TaskMask = TaskMask(1 << 5);
    pub const RESERVED7: TaskMask = TaskMask(1 << 6);
    pub const SELF_UPDATE: TaskMask = TaskMask(1 << 7);
    pub const ALL: TaskMask = TaskMask(u8::MAX);

    pub const fn from_bits(bits: u8) -> Self {
        TaskMask(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: TaskMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Decode task tokens (short or long aliases) into a mask.
    ///
    /// - No tokens at all: every flag is set.
    /// - Unknown tokens are skipped; if nothing is recognised the mask is
    ///   empty and the scheduler will never fire anything.
    /// - Duplicates are harmless.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut saw_any = false;
        let mut mask = TaskMask::EMPTY;

        for token in tokens {
            saw_any = true;
            let token = token.as_ref();
            if token == IDLE_TOKEN {
                continue;
            }
            match lookup_token(token) {
                Some(flag) => mask |= flag,
                None => debug!(token, "ignoring unknown task token"),
            }
        }

        if saw_any { mask } else { TaskMask::ALL }
    }

    /// Long tokens that decode back to exactly this mask.
    pub fn to_tokens(self) -> Vec<&'static str> {
        if self.is_empty() {
            return vec![IDLE_TOKEN];
        }
        FLAG_TOKENS
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, long, _)| *long)
            .collect()
    }

    /// Runnable task kinds enabled by this mask, in priority order.
    pub fn kinds(self) -> Vec<TaskKind> {
        TaskKind::ALL
            .into_iter()
            .filter(|kind| self.contains(kind.flag()))
            .collect()
    }
}

fn lookup_token(token: &str) -> Option<TaskMask> {
    FLAG_TOKENS
        .iter()
        .find(|(_, long, short)| *long == token || *short == Some(token))
        .map(|(flag, _, _)| *flag)
}

impl BitOr for TaskMask {
    type Output = TaskMask;

    fn bitor(self, rhs: TaskMask) -> TaskMask {
        TaskMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for TaskMask {
    fn bitor_assign(&mut self, rhs: TaskMask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for TaskMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskMask({:08b})", self.0)
    }
}
