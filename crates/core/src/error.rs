//! Error types for the core crate

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur in core operations
///
/// Movement, rotation and placement never error: they report rejection as
/// `false`. The only fatal case is building a piece from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Piece name not in the catalog
    #[error("Invalid piece type: {0:?}")]
    UnknownPieceKind(String),
}
