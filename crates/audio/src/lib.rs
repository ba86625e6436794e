//! Audio adapter.
//!
//! The game only ever *requests* sounds. [`CuePlayer`] turns those requests
//! into backend calls while guaranteeing that at most one instance of each
//! cue is live at a time, and tracks cue lengths so a finished one-shot cue
//! can be started again.

pub mod backend;
pub mod cue_player;

pub use blocktris_types as types;

pub use backend::{AudioBackend, BellBackend, SilentBackend};
pub use cue_player::{cue_length_ms, CuePlayer};
