//! Board module - manages the game grid
//!
//! The board is a 20x10 grid where each cell is empty or filled with the color
//! of the piece that landed there. Coordinates are (row, col): row 0 is the top,
//! col 0 is the left edge. Uses a flat array for cache locality and zero
//! allocation.

use crate::piece::Tetromino;
use crate::pieces::cells_of;
use crate::types::{Cell, PieceKind, Rgb, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (row, col), `None` when out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check whether a piece of `kind` in `rotation` fits with its frame at (row, col)
    ///
    /// Every filled frame cell must land inside the board on an empty cell.
    /// Any origin is accepted; one that pushes a cell past the `i8` range is
    /// simply off the board.
    pub fn can_place(&self, kind: PieceKind, rotation: Rotation, row: i8, col: i8) -> bool {
        cells_of(kind, rotation).iter().all(|&(dr, dc)| {
            match (row.checked_add(dr), col.checked_add(dc)) {
                (Some(r), Some(c)) => self.is_free(r, c),
                _ => false,
            }
        })
    }

    /// Stamp a piece into the grid using its color
    ///
    /// Cells outside the board are skipped; callers check `can_place` first.
    pub fn place(&mut self, piece: &Tetromino) {
        let color = Some(piece.color());
        for (row, col) in piece.cells() {
            self.set(row, col, color);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|c| c.is_some())
    }

    /// Remove `row` and shift every row above it down by one
    ///
    /// Row `r` takes the contents of row `r - 1` for `r` from `row` down to 1,
    /// then row 0 is emptied.
    pub fn compact(&mut self, row: usize) {
        if row >= BOARD_HEIGHT as usize {
            return;
        }

        for r in (1..=row).rev() {
            let src = (r - 1) * WIDTH;
            self.cells.copy_within(src..src + WIDTH, r * WIDTH);
        }

        self.cells[..WIDTH].fill(None);
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Fill every column of a row except those listed in `gaps`
    #[doc(hidden)]
    pub fn fill_row_except(&mut self, row: i8, gaps: &[i8], color: Rgb) {
        for col in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&col) {
                self.set(row, col, Some(color));
            }
        }
    }

    /// Row slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
