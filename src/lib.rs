//! Blocktris (workspace facade crate).
//!
//! Re-exports the workspace crates as `blocktris::{core,input,term,audio,types}`
//! and holds the binary's configuration layer.

pub mod config;

pub use blocktris_audio as audio;
pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_term as term;
pub use blocktris_types as types;
