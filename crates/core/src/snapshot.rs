use crate::piece::Tetromino;
use crate::types::{Cell, GamePhase, PieceKind, Rgb, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Read-only view of a piece for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
    pub color: Rgb,
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            row: value.row(),
            col: value.col(),
            color: value.color(),
        }
    }
}

impl PieceSnapshot {
    /// Rebuild the live piece (for shape queries)
    pub fn to_piece(&self) -> Tetromino {
        let mut piece = Tetromino::new(self.kind);
        piece.set_rotation(self.rotation);
        piece.set_position(self.row, self.col);
        piece.set_color(self.color);
        piece
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_delay_ms: u32,
    pub muted: bool,
    pub game_over_visible: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        let empty = PieceSnapshot::from(Tetromino::new(PieceKind::O));
        self.phase = GamePhase::Title;
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.current = empty;
        self.next = empty;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.drop_delay_ms = 0;
        self.muted = false;
        self.game_over_visible = false;
    }

    /// Whether the falling piece should be drawn
    pub fn shows_current(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Stable fingerprint, used to skip redraws of unchanged frames
    pub fn fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut h = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let empty = PieceSnapshot::from(Tetromino::new(PieceKind::O));
        let mut s = Self {
            phase: GamePhase::Title,
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: empty,
            next: empty,
            score: 0,
            level: 0,
            lines: 0,
            drop_delay_ms: 0,
            muted: false,
            game_over_visible: false,
        };
        s.clear();
        s
    }
}
