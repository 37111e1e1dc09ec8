// src/tasks/self_update.rs

use anyhow::Result;
use tracing::{info, warn};

use crate::exec::task_runner::run_shell_command;

use super::TaskContext;

/// Run the configured repository update command (default `git pull`) in
/// `repo_dir`. The running scheduler is not restarted.
pub async fn run(ctx: &TaskContext) -> Result<()> {
    let update = &ctx.settings.update;
    let status = run_shell_command(&update.command, &update.repo_dir).await?;
    if status.success() {
        info!(command = %update.command, "update command finished");
    } else {
        warn!(command = %update.command, code = ?status.code(), "update command failed");
    }
    Ok(())
}
