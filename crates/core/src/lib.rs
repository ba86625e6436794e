//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else. It has no
//! dependency on terminals, audio devices or wall-clock time: the outer loop
//! feeds it elapsed milliseconds and held intents, and reads back snapshots and
//! queued audio commands.
//!
//! # Module Structure
//!
//! - [`pieces`]: the static catalog of seven tetrominoes, four frames each
//! - [`piece`]: the falling piece (kind, frame index, position, color)
//! - [`board`]: 20x10 playfield with placement checks and row compaction
//! - [`game_state`]: the Title / Playing / GameOver session state machine
//! - [`intents`]: held-intent accumulator sampled once per tick
//! - [`clock`]: raw and capped per-frame elapsed time
//! - [`rng`]: uniform random piece generation
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Game Rules
//!
//! - Rotation is a table lookup with no wall kicks; a blocked rotation is rejected.
//! - A piece falls one row every `drop_delay` ms and locks when it cannot fall.
//! - Full rows are removed one at a time, top to bottom.
//! - Every 10 lines the level goes up and the drop delay shrinks by 100ms,
//!   down to a 200ms floor.
//!
//! # Example
//!
//! ```
//! use blocktris_core::{GameSession, IntentSet};
//! use blocktris_core::types::{GamePhase, Intent};
//!
//! let mut session = GameSession::new(12345);
//! let mut intents = IntentSet::new();
//! intents.press(Intent::Confirm);
//!
//! // Confirm is debounced on the title screen.
//! session.tick(501, &mut intents);
//! assert_eq!(session.phase(), GamePhase::Playing);
//! ```

pub mod board;
pub mod clock;
pub mod error;
pub mod game_state;
pub mod intents;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::{FrameClock, FrameDelta};
pub use error::{CoreError, Result};
pub use game_state::{GameSession, LockEvent};
pub use intents::IntentSet;
pub use piece::Tetromino;
pub use pieces::{cells_of, default_color_of, shape_of};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PieceSnapshot};
