// src/exec/backend.rs

//! Pluggable task launcher abstraction.
//!
//! The runtime talks to a `TaskLauncher` instead of spawning work itself.
//! This makes it easy to swap in a recording launcher in tests while keeping
//! the production launchers here.
//!
//! - `ProcessLauncher` (default) re-invokes this binary as
//!   `stationwatch task <flag>`, one OS process per firing.
//! - `InProcessLauncher` runs task bodies on Tokio tasks, bounded by a
//!   semaphore, with a supervisor that logs errors and panics.
//!
//! Both are fire-and-forget: `launch` returns as soon as the work has been
//! started, and nothing flows back to the tick loop.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::Semaphore;
use tracing::{debug, error};

use crate::cli::LogLevel;
use crate::schedule::TaskKind;
use crate::tasks::{run_task, TaskContext};

use super::task_runner::spawn_worker;

/// Trait abstracting how a fired task is started.
///
/// Production code uses [`ProcessLauncher`] or [`InProcessLauncher`]; tests
/// can provide their own implementation that just records the firing.
pub trait TaskLauncher: Send {
    /// Start `kind` without waiting for it to finish.
    ///
    /// An error means the task could not be started at all; the caller logs
    /// it and moves on.
    fn launch(&mut self, kind: TaskKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Launches each firing as a separate OS process.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    program: PathBuf,
    config: Option<PathBuf>,
    log_level: Option<LogLevel>,
}

impl ProcessLauncher {
    /// `program` is re-invoked with the same `--config` and `--log-level` as
    /// the scheduler, so workers see the same settings.
    pub fn new(program: PathBuf, config: Option<PathBuf>, log_level: Option<LogLevel>) -> Self {
        Self {
            program,
            config,
            log_level,
        }
    }

    /// Arguments passed to the worker process for `kind`.
    pub fn worker_args(&self, kind: TaskKind) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(config) = &self.config {
            args.push("--config".to_string());
            args.push(config.display().to_string());
        }
        if let Some(level) = self.log_level {
            args.push("--log-level".to_string());
            args.push(level.as_flag_value().to_string());
        }
        args.push("task".to_string());
        args.push(kind.long_flag().to_string());
        args
    }
}

impl TaskLauncher for ProcessLauncher {
    fn launch(&mut self, kind: TaskKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let args = self.worker_args(kind);
        let program = self.program.clone();

        Box::pin(async move { spawn_worker(&program, &args, kind) })
    }
}

/// Runs task bodies inside the scheduler process on a bounded pool.
pub struct InProcessLauncher {
    ctx: Arc<TaskContext>,
    permits: Arc<Semaphore>,
}

impl InProcessLauncher {
    pub fn new(ctx: Arc<TaskContext>, max_workers: usize) -> Self {
        Self {
            ctx,
            permits: Arc::new(Semaphore::new(max_workers.max(1))),
        }
    }

    /// Number of bodies that could start right now.
    pub fn available_workers(&self) -> usize {
        self.permits.available_permits()
    }
}

impl TaskLauncher for InProcessLauncher {
    fn launch(&mut self, kind: TaskKind) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let ctx = Arc::clone(&self.ctx);
        let permits = Arc::clone(&self.permits);

        Box::pin(async move {
            let permit = permits
                .try_acquire_owned()
                .map_err(|_| anyhow!("worker pool saturated; dropping firing of {kind}"))?;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                run_task(kind, &ctx).await
            });

            // Supervisor: the only place a worker's failure is observed.
            tokio::spawn(async move {
                match handle.await {
                    Ok(Ok(())) => debug!(task = %kind, "task finished"),
                    Ok(Err(err)) => error!(task = %kind, error = ?err, "task failed"),
                    Err(join_err) if join_err.is_panic() => {
                        error!(task = %kind, "task panicked")
                    }
                    Err(join_err) => error!(task = %kind, error = %join_err, "task aborted"),
                }
            });

            Ok(())
        })
    }
}
