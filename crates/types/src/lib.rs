//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, audio cues).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: row 0, column 3, orientation 0
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `KEYBOARD_DELAY_MS` | 300 | Cooldown before a held move/rotate repeats |
//! | `INITIAL_DROP_DELAY_MS` | 600 | Gravity at the start of a game |
//! | `DROP_DELAY_STEP_MS` | 100 | Gravity speed-up per level |
//! | `DROP_DELAY_FLOOR_MS` | 200 | Gravity never gets faster than this |
//! | `TITLE_CONFIRM_DEBOUNCE_MS` | 500 | Confirm must be held this long on the title screen |
//! | `GAME_OVER_FLICKER_MS` | 500 | Game-over banner blink interval |
//! | `GAME_OVER_TAP_DELAY_MS` | 3000 | Taps are ignored this long after game over |
//! | `MAX_FRAME_MS` | 100 | Clamp applied to drawing-related frame time |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{PieceKind, Rotation, Intent, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let parsed = PieceKind::parse_name("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Rotation::from_index(6), Rotation::South);
//!
//! assert_eq!(Intent::parse_name("softDrop"), Some(Intent::SoftDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn row of a fresh piece's 4x4 frame
pub const SPAWN_ROW: i8 = 0;

/// Spawn column of a fresh piece's 4x4 frame (centered horizontally)
pub const SPAWN_COL: i8 = 3;

/// Cooldown applied after a successful move or rotate before a held intent repeats
pub const KEYBOARD_DELAY_MS: i32 = 300;

/// Gravity interval at the start of every game
pub const INITIAL_DROP_DELAY_MS: u32 = 600;

/// Gravity speed-up applied on every level up
pub const DROP_DELAY_STEP_MS: u32 = 100;

/// Gravity is never reduced below this interval
pub const DROP_DELAY_FLOOR_MS: u32 = 200;

/// Lines needed for each level up
pub const LINES_PER_LEVEL: u32 = 10;

/// Level shown at the start of every game
pub const START_LEVEL: u32 = 1;

/// Confirm must be held longer than this on the title screen to start a game
pub const TITLE_CONFIRM_DEBOUNCE_MS: u32 = 500;

/// Interval of the game-over banner blink
pub const GAME_OVER_FLICKER_MS: u32 = 500;

/// A tap on the game-over screen only returns to the title after this long
pub const GAME_OVER_TAP_DELAY_MS: u32 = 3000;

/// Maximum frame time used for drawing-related timing
pub const MAX_FRAME_MS: u32 = 100;

/// Native canvas width; pointer coordinates are expressed in this space
pub const CANVAS_WIDTH: f32 = 370.0;

/// Native canvas height
pub const CANVAS_HEIGHT: f32 = 803.0;

/// Canvas x of the board's left edge
pub const CANVAS_BOARD_X: f32 = 10.0;

/// Canvas y of the board's top edge
pub const CANVAS_BOARD_Y: f32 = 93.0;

/// Canvas size of one board cell
pub const CANVAS_CELL: f32 = 35.0;

/// Hit region of the mute button (bounds are exclusive)
pub const MUTE_BUTTON: CanvasRect = CanvasRect::new(235.0, 60.0, 32.0, 32.0);


/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Rgb)`: Cell filled with the color of the piece that landed there
pub type Cell = Option<Rgb>;

/// The seven tetromino piece kinds
///
/// Declaration order matches the piece catalog's table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::parse_name("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::parse_name("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::parse_name("unknown"), None);
    /// ```
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Orientation index of a piece (0-3)
///
/// The catalog stores one precomputed frame per orientation; rotating
/// clockwise simply advances the index modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Orientation for an arbitrary index, wrapped modulo 4
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Next orientation (index + 1 mod 4)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

/// Abstract player intents, decoupled from the device that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate to the next orientation
    RotateCw,
    /// Move piece one row down
    SoftDrop,
    /// Start a game / leave the game-over screen
    Confirm,
}

impl Intent {
    pub const ALL: [Intent; 5] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::RotateCw,
        Intent::SoftDrop,
        Intent::Confirm,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse intent from its camelCase name (case-insensitive)
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotatecw" => Some(Intent::RotateCw),
            "softdrop" => Some(Intent::SoftDrop),
            "confirm" => Some(Intent::Confirm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::SoftDrop => "softDrop",
            Intent::Confirm => "confirm",
        }
    }
}

/// Top-level phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Title,
    Playing,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Title => "title",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Named sound cues requested by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    FullLine,
    GameOver,
    MainTheme,
    NewLevel,
    Rotate,
}

impl SoundCue {
    pub const ALL: [SoundCue; 5] = [
        SoundCue::FullLine,
        SoundCue::GameOver,
        SoundCue::MainTheme,
        SoundCue::NewLevel,
        SoundCue::Rotate,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "fullLine" => Some(SoundCue::FullLine),
            "gameOver" => Some(SoundCue::GameOver),
            "mainTheme" => Some(SoundCue::MainTheme),
            "newLevel" => Some(SoundCue::NewLevel),
            "rotate" => Some(SoundCue::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::FullLine => "fullLine",
            SoundCue::GameOver => "gameOver",
            SoundCue::MainTheme => "mainTheme",
            SoundCue::NewLevel => "newLevel",
            SoundCue::Rotate => "rotate",
        }
    }

    /// Whether the cue restarts from the beginning when it ends
    pub fn looping(&self) -> bool {
        matches!(self, SoundCue::MainTheme)
    }
}

/// Fire-and-forget request from the game to the audio adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCommand {
    /// Start a cue unless an instance of it is still playing
    Play(SoundCue),
    /// Stop every playing cue
    StopAll,
    /// Global volume: muted = 0, unmuted = 1
    SetMuted(bool),
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CanvasRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict containment test (points on the edge are outside)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.x + self.w && y > self.y && y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}
