//! Async host for a memory-match round.
//!
//! [`Session`] owns a [`GameEngine`](memory_match_core::GameEngine) inside a
//! single tokio task, so intents from any front end are serialized without
//! locks and deferred transitions run on real time.

pub mod config;
pub mod session;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use config::SessionConfig;
pub use session::{Session, EVENT_BUFFER, INTENT_QUEUE};
