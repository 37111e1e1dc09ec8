// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::exec::TaskLauncher;
use crate::state::store::FORCE_SONG_MARKER;
use crate::state::{StateKey, StateStore};
use crate::types::RunStatus;

use super::core::CoreRuntime;
use super::{CoreCommand, CoreStep, TickEvent};

/// Drives the tick loop: one `Tick` event, then one tick of sleep, then one
/// `StatusObserved` event, forever until the core says stop.
///
/// This is a pure IO shell around `CoreRuntime`, which contains the firing
/// rules. Launch failures are logged and never stop the loop.
pub struct Runtime<L: TaskLauncher> {
    core: CoreRuntime,
    store: StateStore,
    launcher: L,
    tick: Duration,
}

impl<L: TaskLauncher> fmt::Debug for Runtime<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl<L: TaskLauncher> Runtime<L> {
    pub fn new(core: CoreRuntime, store: StateStore, launcher: L, tick: Duration) -> Self {
        Self {
            core,
            store,
            launcher,
            tick,
        }
    }

    /// Seed the markers and run until a `Done` run status is observed.
    ///
    /// Seeding overwrites `Done`: a `kill` issued before the loop starts is
    /// lost.
    pub async fn run(mut self) -> Result<()> {
        let enabled = self.core.enabled();
        if enabled.is_empty() {
            warn!("no runnable task enabled; scheduler will idle until killed");
        }
        info!(?enabled, tick = ?self.tick, "scheduler started");

        self.store.set(StateKey::LastSong, FORCE_SONG_MARKER)?;
        self.store.set_run_status(RunStatus::Running)?;

        loop {
            let step = self.core.step(TickEvent::Tick);
            if !self.apply(step).await? {
                break;
            }

            tokio::time::sleep(self.tick).await;

            let status = self.store.run_status();
            let step = self.core.step(TickEvent::StatusObserved(status));
            if !self.apply(step).await? {
                break;
            }
        }

        info!("scheduler exiting");
        Ok(())
    }

    /// Execute the commands of one core step. Returns whether to continue.
    async fn apply(&mut self, step: CoreStep) -> Result<bool> {
        for command in step.commands {
            match command {
                CoreCommand::Launch(kinds) => {
                    for kind in kinds {
                        debug!(task = %kind, "launching task");
                        if let Err(err) = self.launcher.launch(kind).await {
                            warn!(task = %kind, error = %err, "failed to launch task");
                        }
                    }
                }
                CoreCommand::ClearRunStatus => {
                    self.store.clear(StateKey::RunStatus)?;
                }
            }
        }
        Ok(step.keep_running)
    }
}
