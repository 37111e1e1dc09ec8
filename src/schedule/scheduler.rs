// src/schedule/scheduler.rs

use tracing::trace;

use super::mask::TaskMask;
use super::task_kind::TaskKind;
use super::tick_step::TickStep;

#[derive(Debug, Clone)]
struct TaskSlot {
    kind: TaskKind,
    divisor: u64,
    counter: u64,
}

/// Per-task counters for the tick loop.
///
/// Each enabled task has a counter starting at 0 and a divisor of
/// `base_frequency * multiplier`. On every tick a task fires iff
/// `counter % divisor == 0`; firing resets the counter to 1, otherwise it
/// advances by 1. With counters starting at 0 every enabled task fires on
/// the first tick and then every `divisor` ticks.
///
/// This type does no IO and never sleeps.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    slots: Vec<TaskSlot>,
    next_tick: u64,
}

impl TickScheduler {
    pub fn new(mask: TaskMask, base_frequency: u64) -> Self {
        let slots = mask
            .kinds()
            .into_iter()
            .map(|kind| TaskSlot {
                kind,
                divisor: base_frequency.max(1).saturating_mul(kind.multiplier()),
                counter: 0,
            })
            .collect();

        Self {
            slots,
            next_tick: 0,
        }
    }

    /// Advance every counter by one tick and report which tasks fired.
    pub fn tick(&mut self) -> TickStep {
        let tick = self.next_tick;
        self.next_tick += 1;

        let mut fired = Vec::new();
        for slot in &mut self.slots {
            if slot.counter % slot.divisor == 0 {
                fired.push(slot.kind);
                slot.counter = 1;
            } else {
                slot.counter += 1;
            }
        }

        trace!(tick, ?fired, "scheduler tick");
        TickStep { tick, fired }
    }

    /// Tasks with a counter, in priority order.
    pub fn enabled(&self) -> Vec<TaskKind> {
        self.slots.iter().map(|s| s.kind).collect()
    }

    pub fn counter_of(&self, kind: TaskKind) -> Option<u64> {
        self.slot(kind).map(|s| s.counter)
    }

    pub fn divisor_of(&self, kind: TaskKind) -> Option<u64> {
        self.slot(kind).map(|s| s.divisor)
    }

    /// Number of ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.next_tick
    }

    fn slot(&self, kind: TaskKind) -> Option<&TaskSlot> {
        self.slots.iter().find(|s| s.kind == kind)
    }
}
