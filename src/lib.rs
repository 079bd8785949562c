//! Memory Match (workspace facade crate).
//!
//! Re-exports the workspace crates as `memory_match::{core,types,input,term,session}`
//! and hosts the binary's command line and the headless JSON-lines harness.

pub mod cli;
pub mod headless;

pub use memory_match_core as core;
pub use memory_match_input as input;
pub use memory_match_session as session;
pub use memory_match_term as term;
pub use memory_match_types as types;
