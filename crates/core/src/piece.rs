//! Active piece - a live tetromino with position, orientation and color

use crate::error::{CoreError, Result};
use crate::pieces::{cells_of, default_color_of, shape_of, CellOffset, RotationState};
use crate::types::{PieceKind, Rgb, Rotation, SPAWN_COL, SPAWN_ROW};

/// A falling (or previewed) piece
///
/// `row`/`col` locate the top-left corner of the 4x4 frame in board space,
/// so they may be negative when the frame's empty columns hang off the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: Rotation,
    row: i8,
    col: i8,
    color: Rgb,
}

impl Tetromino {
    /// Create a new tetromino at the spawn position with its default color
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
            color: default_color_of(kind),
        }
    }

    /// Create a tetromino from a piece name such as `"T"`
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_core::{CoreError, Tetromino};
    /// use blocktris_core::types::PieceKind;
    ///
    /// assert_eq!(Tetromino::parse("l").unwrap().kind(), PieceKind::L);
    /// assert!(matches!(Tetromino::parse("X"), Err(CoreError::UnknownPieceKind(_))));
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        PieceKind::parse_name(name)
            .map(Self::new)
            .ok_or_else(|| CoreError::UnknownPieceKind(name.to_string()))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Current occupancy frame
    pub fn shape(&self) -> &'static RotationState {
        shape_of(self.kind, self.rotation)
    }

    /// Whether the frame cell at (local_row, local_col) is filled
    pub fn cell_at(&self, local_row: usize, local_col: usize) -> bool {
        self.shape()
            .get(local_row)
            .and_then(|r| r.get(local_col))
            .copied()
            .unwrap_or(false)
    }

    /// Filled cells in board coordinates, as (row, col)
    ///
    /// Coordinates saturate at the `i8` bounds, which are always off the board.
    pub fn cells(&self) -> [CellOffset; 4] {
        cells_of(self.kind, self.rotation)
            .map(|(r, c)| (self.row.saturating_add(r), self.col.saturating_add(c)))
    }

    pub fn set_position(&mut self, row: i8, col: i8) {
        self.row = row;
        self.col = col;
    }

    /// Set the orientation index; values wrap modulo 4
    pub fn set_orientation(&mut self, orientation: u8) {
        self.rotation = Rotation::from_index(orientation);
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Take over kind, position, orientation and color from another piece
    pub fn copy_from(&mut self, other: &Tetromino) {
        self.kind = other.kind;
        self.col = other.col;
        self.row = other.row;
        self.rotation = other.rotation;
        self.color = other.color;
    }
}
