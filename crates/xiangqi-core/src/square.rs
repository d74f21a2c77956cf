//! Board square representation on the padded grid.
//!
//! The 9x10 playing area is embedded in a one-dimensional grid of 11
//! columns and 14 rows. The extra border cells hold an off-board
//! sentinel so that movement deltas can be applied without explicit
//! bounds checks: one sentinel column on each side and two sentinel
//! rows at the top and bottom, enough for the knight's jump geometry.
//! Black's back rank (rank 9) occupies the topmost playing row, at the
//! low end of the grid.

use std::fmt;

/// Width of the padded grid (9 playing files + 2 sentinel columns).
pub const GRID_WIDTH: usize = 11;

/// Height of the padded grid (10 playing ranks + 4 sentinel rows).
pub const GRID_HEIGHT: usize = 14;

/// Total number of cells in the padded grid.
pub const GRID_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// A file (column) on the board, from a to i.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 9] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
        File::I,
    ];

    /// Creates a file from index (0-8).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(File::A),
            1 => Some(File::B),
            2 => Some(File::C),
            3 => Some(File::D),
            4 => Some(File::E),
            5 => Some(File::F),
            6 => Some(File::G),
            7 => Some(File::H),
            8 => Some(File::I),
            _ => None,
        }
    }

    /// Creates a file from a character ('a'-'i' or 'A'-'I').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c >= 'a' && c <= 'i' {
            Self::from_index(c as u8 - b'a')
        } else {
            None
        }
    }

    /// Returns the index (0-8).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the board, from 0 (Red's back rank) to 9 (Black's).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 10] = [
        Rank::R0,
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
        Rank::R9,
    ];

    /// Creates a rank from index (0-9).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::R0),
            1 => Some(Rank::R1),
            2 => Some(Rank::R2),
            3 => Some(Rank::R3),
            4 => Some(Rank::R4),
            5 => Some(Rank::R5),
            6 => Some(Rank::R6),
            7 => Some(Rank::R7),
            8 => Some(Rank::R8),
            9 => Some(Rank::R9),
            _ => None,
        }
    }

    /// Creates a rank from a character ('0'-'9').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        if c >= '0' && c <= '9' {
            Self::from_index(c as u8 - b'0')
        } else {
            None
        }
    }

    /// Returns the index (0-9).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'0' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A playing square, stored as its index into the padded grid.
///
/// Only the 90 on-board squares are representable; the sentinel border
/// has no `Square` value. a9 maps to grid index 23 and i0 to 130.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        let row = GRID_HEIGHT as u8 - 3 - rank.index();
        Square(row * GRID_WIDTH as u8 + 1 + file.index())
    }

    /// Creates a square from a padded grid index, rejecting border cells.
    #[inline]
    pub const fn from_grid(index: u8) -> Option<Self> {
        let row = index / GRID_WIDTH as u8;
        let col = index % GRID_WIDTH as u8;
        if row >= 2 && row <= 11 && col >= 1 && col <= 9 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from a padded grid index without validation.
    ///
    /// # Safety
    /// The index must refer to one of the 90 playing cells.
    #[inline]
    pub const unsafe fn from_grid_unchecked(index: u8) -> Self {
        debug_assert!(Square::from_grid(index).is_some());
        Square(index)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the padded grid index (23-130).
    #[inline]
    pub const fn grid(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % GRID_WIDTH as u8 - 1) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(GRID_HEIGHT as u8 - 3 - self.0 / GRID_WIDTH as u8) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}
