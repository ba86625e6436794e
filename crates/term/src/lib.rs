//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and renders into a simple framebuffer that is
//! diffed and flushed to the terminal.
//!
//! - [`GameView`] turns a snapshot into framebuffer cells (pure, testable)
//! - [`TerminalRenderer`] owns raw mode, the alternate screen and mouse capture
//! - [`RenderThrottle`] skips redraws of unchanged frames

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{ChangedRuns, FrameEncoder, Run, TerminalRenderer};
