// src/exec/mod.rs

//! Task execution layer.
//!
//! - [`backend`] provides the `TaskLauncher` trait and the two production
//!   launchers the runtime can use.
//! - [`task_runner`] handles spawning worker and shell processes with
//!   `tokio::process::Command`.

pub mod backend;
pub mod task_runner;

pub use backend::{InProcessLauncher, ProcessLauncher, TaskLauncher};
