// src/schedule/mod.rs

//! Task selection and pacing.
//!
//! - [`mask`] decodes CLI task tokens into a [`TaskMask`].
//! - [`task_kind`] names the runnable tasks and their fixed multipliers.
//! - [`scheduler`] owns the per-task counters and decides what fires on
//!   each tick.
//! - [`tick_step`] is the result type of one tick.

pub mod mask;
pub mod scheduler;
pub mod task_kind;
pub mod tick_step;

pub use mask::{TaskMask, IDLE_TOKEN};
pub use scheduler::TickScheduler;
pub use task_kind::TaskKind;
pub use tick_step::TickStep;
