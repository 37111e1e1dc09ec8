// src/schedule/tick_step.rs

//! Result type for a single scheduler tick.

use super::task_kind::TaskKind;

/// What happened on one tick.
///
/// Tests step the scheduler by hand and assert on these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickStep {
    /// Zero-based index of the tick that produced this step.
    pub tick: u64,
    /// Tasks whose counters hit their divisor, in priority order.
    pub fired: Vec<TaskKind>,
}

impl TickStep {
    pub fn fired(&self, kind: TaskKind) -> bool {
        self.fired.contains(&kind)
    }
}
