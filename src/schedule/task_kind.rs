// src/schedule/task_kind.rs

use std::fmt;

use super::mask::TaskMask;

/// A task that has a body. Reserved mask slots have no `TaskKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SongChange,
    StreamHealth,
    LyricCheck,
    SwearLog,
    SelfUpdate,
}

impl TaskKind {
    /// Every kind, in the priority order used when a single task is picked
    /// from a list of tokens.
    pub const ALL: [TaskKind; 5] = [
        TaskKind::SongChange,
        TaskKind::StreamHealth,
        TaskKind::LyricCheck,
        TaskKind::SwearLog,
        TaskKind::SelfUpdate,
    ];

    /// Factor applied to the base frequency to get this task's divisor.
    pub fn multiplier(&self) -> u64 {
        match self {
            TaskKind::SongChange => 2,
            TaskKind::StreamHealth => 20,
            TaskKind::LyricCheck => 1,
            TaskKind::SwearLog => 1,
            TaskKind::SelfUpdate => 1200,
        }
    }

    pub fn flag(&self) -> TaskMask {
        match self {
            TaskKind::SongChange => TaskMask::SONG_CHANGE,
            TaskKind::StreamHealth => TaskMask::STREAM_HEALTH,
            TaskKind::LyricCheck => TaskMask::LYRIC_CHECK,
            TaskKind::SwearLog => TaskMask::SWEAR_LOG,
            TaskKind::SelfUpdate => TaskMask::SELF_UPDATE,
        }
    }

    /// Long CLI token, used when re-invoking the binary as a worker.
    pub fn long_flag(&self) -> &'static str {
        match self {
            TaskKind::SongChange => "--nowplaying",
            TaskKind::StreamHealth => "--status",
            TaskKind::LyricCheck => "--lyric",
            TaskKind::SwearLog => "--swear",
            TaskKind::SelfUpdate => "--update",
        }
    }

    pub fn short_flag(&self) -> &'static str {
        match self {
            TaskKind::SongChange => "-n",
            TaskKind::StreamHealth => "-s",
            TaskKind::LyricCheck => "-l",
            TaskKind::SwearLog => "-w",
            TaskKind::SelfUpdate => "-u",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::SongChange => "song_change",
            TaskKind::StreamHealth => "stream_health",
            TaskKind::LyricCheck => "lyric_check",
            TaskKind::SwearLog => "swear_log",
            TaskKind::SelfUpdate => "self_update",
        }
    }

    /// First runnable kind named by `tokens`, by priority.
    ///
    /// Unlike [`TaskMask::from_tokens`], an empty token list selects
    /// nothing.
    pub fn first_in_tokens<I, S>(tokens: I) -> Option<TaskKind>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<S> = tokens.into_iter().collect();
        if tokens.is_empty() {
            return None;
        }
        TaskMask::from_tokens(tokens).kinds().into_iter().next()
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
