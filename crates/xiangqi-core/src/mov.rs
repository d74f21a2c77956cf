//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// A xiangqi move.
///
/// Packed into a single integer: 8 bits source grid index, 8 bits
/// target grid index, 4 bits moved piece, 4 bits captured piece, and
/// one capture flag bit. The move carries everything needed to revert
/// it, so unmaking never has to consult external state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Creates a move; the capture flag is set iff `captured` is a piece.
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        let flag = !matches!(captured, Piece::Empty) as u32;
        Move(
            from.grid() as u32
                | (to.grid() as u32) << 8
                | (piece.index() as u32) << 16
                | (captured.index() as u32) << 20
                | flag << 24,
        )
    }

    /// Creates a non-capturing move.
    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Self::new(from, to, piece, Piece::Empty)
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: moves are only built from validated squares
        unsafe { Square::from_grid_unchecked((self.0 & 0xFF) as u8) }
    }

    /// Returns the target square.
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: moves are only built from validated squares
        unsafe { Square::from_grid_unchecked(((self.0 >> 8) & 0xFF) as u8) }
    }

    /// Returns the moved piece.
    #[inline]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> 16) & 0xF) as u8) {
            Some(p) => p,
            None => unreachable!(),
        }
    }

    /// Returns the captured piece, or [`Piece::Empty`] for quiet moves.
    #[inline]
    pub const fn captured(self) -> Piece {
        match Piece::from_index(((self.0 >> 20) & 0xF) as u8) {
            Some(p) => p,
            None => unreachable!(),
        }
    }

    /// Returns true if this move captures a piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        (self.0 >> 24) & 1 != 0
    }

    /// Returns true if this is the null placeholder.
    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the coordinate notation for this move (e.g., "h2e2").
    pub fn to_coord(self) -> String {
        if self.is_null() {
            return "0000".to_string();
        }
        format!("{}{}", self.from(), self.to())
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coord())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}
