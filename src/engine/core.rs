// src/engine/core.rs

//! Pure core of the tick loop.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`TickEvent`]s and produces:
//! - updated counters
//! - a list of commands describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for sleeping,
//! reading the run-status marker and launching tasks.
//!
//! The core can be tested without Tokio, a filesystem or processes.

use tracing::info;

use crate::schedule::{TaskKind, TickScheduler};
use crate::types::RunStatus;

use super::{CoreCommand, CoreStep, TickEvent};

#[derive(Debug)]
pub struct CoreRuntime {
    scheduler: TickScheduler,
}

impl CoreRuntime {
    pub fn new(scheduler: TickScheduler) -> Self {
        Self { scheduler }
    }

    /// Expose the counters (for tests).
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn enabled(&self) -> Vec<TaskKind> {
        self.scheduler.enabled()
    }

    /// Handle a single event, updating counters and returning the commands
    /// for the IO shell.
    pub fn step(&mut self, event: TickEvent) -> CoreStep {
        match event {
            TickEvent::Tick => {
                let step = self.scheduler.tick();
                let commands = if step.fired.is_empty() {
                    Vec::new()
                } else {
                    vec![CoreCommand::Launch(step.fired)]
                };
                CoreStep {
                    commands,
                    keep_running: true,
                }
            }
            TickEvent::StatusObserved(RunStatus::Done) => {
                info!(ticks = self.scheduler.ticks(), "shutdown requested");
                CoreStep {
                    commands: vec![CoreCommand::ClearRunStatus],
                    keep_running: false,
                }
            }
            TickEvent::StatusObserved(_) => CoreStep {
                commands: Vec::new(),
                keep_running: true,
            },
        }
    }
}
