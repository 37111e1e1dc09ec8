// src/state/mod.rs

//! Durable checkpoints shared between the tick loop and task bodies.
//!
//! - [`store`] holds the persisted markers (song, lyric, run status, swear
//!   snapshot). Each marker is one small file; there is no cross-marker
//!   transaction.
//! - [`logger`] reads the files produced by the external song logger and
//!   writes the lyric report sidecar next to them.

pub mod logger;
pub mod store;

pub use logger::LoggerFiles;
pub use store::{StateKey, StateStore};
