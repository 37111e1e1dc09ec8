// src/engine/mod.rs

//! Tick loop engine.
//!
//! The pure core state machine lives in [`core`]: it owns the per-task
//! counters and turns [`TickEvent`]s into [`CoreCommand`]s. The async/IO
//! shell in [`runtime`] sleeps between ticks, reads the run-status marker
//! and hands fired tasks to a launcher.

use crate::schedule::TaskKind;
use crate::types::RunStatus;

/// Events fed into the core, one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Advance every counter by one tick.
    Tick,
    /// The run-status marker was read after the tick's sleep.
    StatusObserved(RunStatus),
}

/// Side effects the core asks the shell to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Hand these tasks to the launcher, in order.
    Launch(Vec<TaskKind>),
    /// Delete the run-status marker before exiting.
    ClearRunStatus,
}

/// Result of feeding one event to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    pub keep_running: bool,
}

pub mod core;
pub mod runtime;

pub use core::CoreRuntime;
pub use runtime::Runtime;
