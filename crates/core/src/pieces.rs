//! Pieces module - the static tetromino catalog
//!
//! Each piece kind owns four precomputed 4x4 occupancy frames, one per
//! orientation index, plus a default display color. Rotation is a plain
//! table lookup: there is no rotation system and there are no wall kicks.
//! O repeats one frame four times; I, S and Z alternate two frames.

use crate::types::{PieceKind, Rgb, Rotation};

/// One 4x4 occupancy frame, row-major (`frame[row][col]`)
pub type RotationState = [[bool; 4]; 4];

/// Offset of a single filled cell inside the 4x4 frame, as (row, col)
pub type CellOffset = (i8, i8);

/// Catalog entry for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    pub frames: [RotationState; 4],
    pub color: Rgb,
}

/// Build a frame from four rows of `#` (filled) and `.` (empty)
const fn frame(rows: [&[u8; 4]; 4]) -> RotationState {
    let mut out = [[false; 4]; 4];
    let mut r = 0;
    while r < 4 {
        let mut c = 0;
        while c < 4 {
            out[r][c] = rows[r][c] == b'#';
            c += 1;
        }
        r += 1;
    }
    out
}

const O_FRAME: RotationState = frame([b"....", b".##.", b".##.", b"...."]);

const I_FLAT: RotationState = frame([b"....", b"####", b"....", b"...."]);
const I_TALL: RotationState = frame([b".#..", b".#..", b".#..", b".#.."]);

const S_FLAT: RotationState = frame([b"....", b".##.", b"##..", b"...."]);
const S_TALL: RotationState = frame([b"#...", b"##..", b".#..", b"...."]);

const Z_FLAT: RotationState = frame([b"....", b"##..", b".##.", b"...."]);
const Z_TALL: RotationState = frame([b".#..", b"##..", b"#...", b"...."]);

/// Catalog table, indexed by [`PieceKind::index`]
static CATALOG: [PieceDefinition; 7] = [
    // O
    PieceDefinition {
        frames: [O_FRAME, O_FRAME, O_FRAME, O_FRAME],
        color: Rgb::from_hex(0xD4AF37),
    },
    // I
    PieceDefinition {
        frames: [I_FLAT, I_TALL, I_FLAT, I_TALL],
        color: Rgb::from_hex(0x4FB0C6),
    },
    // T
    PieceDefinition {
        frames: [
            frame([b"....", b"###.", b".#..", b"...."]),
            frame([b".#..", b"##..", b".#..", b"...."]),
            frame([b"....", b".#..", b"###.", b"...."]),
            frame([b".#..", b".##.", b".#..", b"...."]),
        ],
        color: Rgb::from_hex(0x9B59B6),
    },
    // L
    PieceDefinition {
        frames: [
            frame([b"....", b"###.", b"#...", b"...."]),
            frame([b"##..", b".#..", b".#..", b"...."]),
            frame([b"....", b"..#.", b"###.", b"...."]),
            frame([b".#..", b".#..", b".##.", b"...."]),
        ],
        color: Rgb::from_hex(0x2980B9),
    },
    // J
    PieceDefinition {
        frames: [
            frame([b"....", b"###.", b"..#.", b"...."]),
            frame([b".#..", b".#..", b"##..", b"...."]),
            frame([b"....", b"#...", b"###.", b"...."]),
            frame([b"##..", b"#...", b"#...", b"...."]),
        ],
        color: Rgb::from_hex(0xF39C12),
    },
    // S
    PieceDefinition {
        frames: [S_FLAT, S_TALL, S_FLAT, S_TALL],
        color: Rgb::from_hex(0xE74C3C),
    },
    // Z
    PieceDefinition {
        frames: [Z_FLAT, Z_TALL, Z_FLAT, Z_TALL],
        color: Rgb::from_hex(0x2ECC71),
    },
];

/// Full catalog entry for a piece kind
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    &CATALOG[kind.index()]
}

/// Occupancy frame for a piece kind and orientation
pub fn shape_of(kind: PieceKind, rotation: Rotation) -> &'static RotationState {
    &definition(kind).frames[rotation.index() as usize]
}

/// Default display color of a piece kind
pub fn default_color_of(kind: PieceKind) -> Rgb {
    definition(kind).color
}

/// The four filled (row, col) offsets of a frame, in row-major order
pub fn cells_of(kind: PieceKind, rotation: Rotation) -> [CellOffset; 4] {
    let shape = shape_of(kind, rotation);
    let mut out = [(0, 0); 4];
    let mut n = 0;
    for (r, row) in shape.iter().enumerate() {
        for (c, &filled) in row.iter().enumerate() {
            if filled && n < 4 {
                out[n] = (r as i8, c as i8);
                n += 1;
            }
        }
    }
    out
}
