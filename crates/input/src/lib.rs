//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events to [`crate::types::Intent`]s, keeps the held
//! intent set up to date on terminals that never report key releases, and
//! turns mouse drags into touch-style swipes and taps.

pub mod gesture;
pub mod handler;
pub mod map;

pub use blocktris_types as types;

pub use gesture::{Gesture, GestureTracker};
pub use handler::InputHandler;
pub use map::{map_key, should_quit, KeyInput};
