//! Xiangqi piece representation.

use crate::Color;

/// The seven kinds of xiangqi pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Advisor = 1,
    Elephant = 2,
    Knight = 3,
    Cannon = 4,
    Rook = 5,
    King = 6,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Knight,
        PieceKind::Cannon,
        PieceKind::Rook,
        PieceKind::King,
    ];

    /// Returns the index of this piece kind (0-6).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Advisor => "Advisor",
            PieceKind::Elephant => "Elephant",
            PieceKind::Knight => "Knight",
            PieceKind::Cannon => "Cannon",
            PieceKind::Rook => "Rook",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The content of one grid cell.
///
/// Besides the fourteen colored pieces there are two reserved tags:
/// [`Piece::Empty`] for a vacant playing square and [`Piece::OffBoard`]
/// for the sentinel border of the padded grid. The tag values fit in
/// four bits, which [`crate::Move`] relies on for its packed encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Empty = 0,
    RedPawn = 1,
    RedAdvisor = 2,
    RedElephant = 3,
    RedKnight = 4,
    RedCannon = 5,
    RedRook = 6,
    RedKing = 7,
    BlackPawn = 8,
    BlackAdvisor = 9,
    BlackElephant = 10,
    BlackKnight = 11,
    BlackCannon = 12,
    BlackRook = 13,
    BlackKing = 14,
    OffBoard = 15,
}

impl Piece {
    /// Creates a piece from color and kind.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        let tag = 1 + color.index() as u8 * 7 + kind.index() as u8;
        match Piece::from_index(tag) {
            Some(p) => p,
            None => unreachable!(),
        }
    }

    /// Creates a piece from its tag value (0-15).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Piece::Empty),
            1 => Some(Piece::RedPawn),
            2 => Some(Piece::RedAdvisor),
            3 => Some(Piece::RedElephant),
            4 => Some(Piece::RedKnight),
            5 => Some(Piece::RedCannon),
            6 => Some(Piece::RedRook),
            7 => Some(Piece::RedKing),
            8 => Some(Piece::BlackPawn),
            9 => Some(Piece::BlackAdvisor),
            10 => Some(Piece::BlackElephant),
            11 => Some(Piece::BlackKnight),
            12 => Some(Piece::BlackCannon),
            13 => Some(Piece::BlackRook),
            14 => Some(Piece::BlackKing),
            15 => Some(Piece::OffBoard),
            _ => None,
        }
    }

    /// Returns the tag value (0-15).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the kind, or `None` for the empty and off-board tags.
    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::RedPawn | Piece::BlackPawn => Some(PieceKind::Pawn),
            Piece::RedAdvisor | Piece::BlackAdvisor => Some(PieceKind::Advisor),
            Piece::RedElephant | Piece::BlackElephant => Some(PieceKind::Elephant),
            Piece::RedKnight | Piece::BlackKnight => Some(PieceKind::Knight),
            Piece::RedCannon | Piece::BlackCannon => Some(PieceKind::Cannon),
            Piece::RedRook | Piece::BlackRook => Some(PieceKind::Rook),
            Piece::RedKing | Piece::BlackKing => Some(PieceKind::King),
            Piece::Empty | Piece::OffBoard => None,
        }
    }

    /// Returns the color, or `None` for the empty and off-board tags.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self as u8 {
            1..=7 => Some(Color::Red),
            8..=14 => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns the FEN character for this piece.
    ///
    /// Empty squares map to a space and the off-board sentinel to 'x',
    /// which only matter for board diagrams, never for FEN output.
    pub const fn to_char(self) -> char {
        let c = match self.kind() {
            Some(PieceKind::Pawn) => 'p',
            Some(PieceKind::Advisor) => 'a',
            Some(PieceKind::Elephant) => 'b',
            Some(PieceKind::Knight) => 'n',
            Some(PieceKind::Cannon) => 'c',
            Some(PieceKind::Rook) => 'r',
            Some(PieceKind::King) => 'k',
            None => {
                return match self {
                    Piece::OffBoard => 'x',
                    _ => ' ',
                }
            }
        };
        match self.color() {
            Some(Color::Red) => c.to_ascii_uppercase(),
            _ => c,
        }
    }

    /// Parses a FEN character into a piece.
    ///
    /// Both notation families are accepted on input: 'B'/'E' for the
    /// elephant and 'N'/'H' for the knight (horse).
    pub const fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'a' => PieceKind::Advisor,
            'b' | 'e' => PieceKind::Elephant,
            'n' | 'h' => PieceKind::Knight,
            'c' => PieceKind::Cannon,
            'r' => PieceKind::Rook,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece::new(color, kind))
    }
}
