use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Persisted tri-state marker that controls tick loop continuation and
/// stream incident dedup.
///
/// - `Running`: scheduler is running and the stream was last seen online.
/// - `StreamDown`: scheduler is running and the stream was last seen offline.
/// - `Done`: shutdown requested; the loop exits the next time it polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    StreamDown,
    Done,
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Running
    }
}

impl RunStatus {
    /// Text persisted in the status marker file.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Running => "Running",
            RunStatus::StreamDown => "Stream Down",
            RunStatus::Done => "Done",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Running" => Ok(RunStatus::Running),
            "Stream Down" => Ok(RunStatus::StreamDown),
            "Done" => Ok(RunStatus::Done),
            other => Err(format!(
                "invalid run status: {other:?} (expected \"Running\", \"Stream Down\" or \"Done\")"
            )),
        }
    }
}

/// How the tick loop isolates each task firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    /// Re-invoke this binary as `task <flag>` in a fresh OS process.
    Process,
    /// Run the task body on a bounded pool of Tokio tasks inside the
    /// scheduler process.
    InProcess,
}

impl Default for LaunchMode {
    fn default() -> Self {
        LaunchMode::Process
    }
}

impl FromStr for LaunchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "process" => Ok(LaunchMode::Process),
            "in_process" | "in-process" => Ok(LaunchMode::InProcess),
            other => Err(format!(
                "invalid launch_mode: {other} (expected \"process\" or \"in_process\")"
            )),
        }
    }
}
