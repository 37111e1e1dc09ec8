// src/exec/task_runner.rs

//! Process spawning helpers.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::schedule::TaskKind;

/// Spawn a worker process for `kind` and return immediately.
///
/// The worker inherits stdout/stderr, so its logs interleave with the
/// scheduler's. A detached reaper waits on the child and logs how it exited.
pub fn spawn_worker(program: &Path, args: &[String], kind: TaskKind) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(false);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning worker {:?} for task '{}'", program, kind))?;

    let pid = child.id();
    debug!(task = %kind, ?pid, "worker process started");

    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if status.success() => {
                debug!(task = %kind, ?pid, "worker process exited")
            }
            Ok(status) => warn!(
                task = %kind,
                ?pid,
                exit_code = ?status.code(),
                "worker process failed"
            ),
            Err(err) => warn!(task = %kind, ?pid, error = %err, "waiting for worker process"),
        }
    });

    Ok(())
}

/// Run a shell command in `dir` and wait for it to exit.
pub async fn run_shell_command(command: &str, dir: &Path) -> Result<ExitStatus> {
    info!(cmd = %command, dir = %dir.display(), "running shell command");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    };

    cmd.current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning shell command '{}'", command))?;

    child
        .wait()
        .await
        .with_context(|| format!("waiting for shell command '{}'", command))
}
