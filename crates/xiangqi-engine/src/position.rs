//! Xiangqi position representation.

use std::fmt;

use xiangqi_core::{Color, FenError, FenRecord, File, Move, Piece, PieceKind, Rank, Square};

use crate::grid::Grid;
use crate::movegen::is_king_attacked;
use crate::zobrist;

/// Snapshot of the fields [`Position::undo_move`] cannot reconstruct
/// from the move itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StateRecord {
    key: u64,
    rule60: u32,
}

/// Complete xiangqi position state.
///
/// A position is built once from FEN and then mutated in place by
/// [`make_move`](Position::make_move) / [`undo_move`](Position::undo_move)
/// pairs, which must nest LIFO. The undo chain is an owned stack of
/// state records, so unbalanced undo calls trip a `debug_assert` rather
/// than chasing dangling pointers.
///
/// A position is a single-threaded resource; parallel traversal wants
/// one clone per worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    grid: Grid,
    side_to_move: Color,
    kings: [Option<Square>; 2],
    rule60: u32,
    search_ply: u32,
    game_ply: u32,
    key: u64,
    states: Vec<StateRecord>,
}

impl Position {
    /// Creates an empty position with Red to move.
    pub fn empty() -> Self {
        Position {
            grid: Grid::empty(),
            side_to_move: Color::Red,
            kings: [None; 2],
            rule60: 0,
            search_ply: 0,
            game_ply: 0,
            key: 0,
            states: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenRecord::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// This is the setup operation: the position is rebuilt from
    /// scratch, including the king cache and a full identity-key
    /// computation. All later key maintenance is incremental.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenRecord::parse(fen)?;
        let mut position = Position::empty();

        for (rank_idx, rank_str) in parsed.piece_placement.split('/').enumerate() {
            let rank = Rank::ALL[9 - rank_idx]; // FEN starts from rank 9
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    let sq = Square::new(File::ALL[file], rank);
                    position.grid.set(sq, piece);
                    if let Some(color) = piece.color() {
                        if piece.kind() == Some(PieceKind::King) {
                            position.kings[color.index()] = Some(sq);
                        }
                    }
                    file += 1;
                }
            }
        }

        position.side_to_move = match parsed.active_color {
            'w' => Color::Red,
            'b' => Color::Black,
            _ => unreachable!("FEN parser validated this"),
        };

        position.rule60 = parsed.reversible_clock;

        // Convert from fullmove starting at 1 to game ply starting at
        // 0, tolerating the common incorrect FEN with fullmove 0.
        let fullmove = parsed.fullmove_number as i64;
        position.game_ply =
            ((fullmove - 1).max(0) * 2) as u32 + (position.side_to_move == Color::Black) as u32;

        position.key = position.compute_key();

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank_idx in (0..10).rev() {
            let mut empty_count = 0;
            for file in File::ALL {
                let sq = Square::new(file, Rank::ALL[rank_idx]);
                let piece = self.grid.piece_on(sq);
                if piece == Piece::Empty {
                    empty_count += 1;
                } else {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank_idx > 0 {
                fen.push('/');
            }
        }

        let black = (self.side_to_move == Color::Black) as u32;
        fen.push_str(match self.side_to_move {
            Color::Red => " w - - ",
            Color::Black => " b - - ",
        });
        fen.push_str(&self.rule60.to_string());
        fen.push(' ');
        fen.push_str(&(1 + self.game_ply.saturating_sub(black) / 2).to_string());

        fen
    }

    /// Returns the piece on the given square.
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.grid.piece_on(sq)
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the cached king square for the given color.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Returns the position identity key.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Returns plies since the last capture.
    #[inline]
    pub fn rule60(&self) -> u32 {
        self.rule60
    }

    /// Returns plies since the start of the game.
    #[inline]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    /// Returns plies since the search root.
    #[inline]
    pub fn search_ply(&self) -> u32 {
        self.search_ply
    }

    /// Marks the current position as a search root.
    #[inline]
    pub fn reset_search_ply(&mut self) {
        self.search_ply = 0;
    }

    /// Returns true if the given color's king is attacked.
    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        is_king_attacked(self, color)
    }

    #[inline]
    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Recomputes the identity key from the board alone.
    pub(crate) fn compute_key(&self) -> u64 {
        let mut key = 0u64;
        for file in File::ALL {
            for rank in Rank::ALL {
                let sq = Square::new(file, rank);
                key ^= zobrist::piece_key(self.grid.piece_on(sq), sq);
            }
        }
        if self.side_to_move == Color::Black {
            key ^= zobrist::side_key();
        }
        key
    }

    /// Makes a move, returning whether it was legal.
    ///
    /// The move is assumed to be pseudo-legal for this position.
    /// Legality is verified after mutation: if the mover's own king is
    /// left attacked, the move is fully unmade and `false` is returned
    /// with the position unchanged. Callers must not attempt any
    /// compensation of their own on an illegal result.
    pub fn make_move(&mut self, m: Move) -> bool {
        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();
        let piece = m.piece();

        debug_assert_eq!(self.grid.piece_on(from), piece);
        debug_assert_eq!(
            self.grid.piece_on(to),
            if m.is_capture() { m.captured() } else { Piece::Empty }
        );

        self.states.push(StateRecord {
            key: self.key,
            rule60: self.rule60,
        });
        self.search_ply += 1;
        self.game_ply += 1;

        self.grid.set(to, piece);
        self.grid.set(from, Piece::Empty);
        self.key ^= zobrist::piece_key(piece, from) ^ zobrist::piece_key(piece, to);

        if m.is_capture() {
            self.key ^= zobrist::piece_key(m.captured(), to);
            self.rule60 = 0;
        } else {
            self.rule60 += 1;
        }

        if piece.kind() == Some(PieceKind::King) {
            self.kings[us.index()] = Some(to);
        }

        self.side_to_move = us.opposite();
        self.key ^= zobrist::side_key();

        if self.in_check(us) {
            self.undo_move(m);
            return false;
        }
        true
    }

    /// Unmakes the most recently made move.
    ///
    /// `m` must be the same move value passed to the matching
    /// [`make_move`](Position::make_move); undoing anything else is a
    /// contract violation caught by debug assertions.
    pub fn undo_move(&mut self, m: Move) {
        let record = self.states.pop();
        debug_assert!(record.is_some(), "undo_move without a matching make_move");
        let Some(record) = record else { return };

        let from = m.from();
        let to = m.to();
        let piece = m.piece();
        debug_assert_eq!(self.grid.piece_on(to), piece);

        self.search_ply -= 1;
        self.game_ply -= 1;

        self.grid.set(from, piece);
        self.grid.set(
            to,
            if m.is_capture() {
                m.captured()
            } else {
                Piece::Empty
            },
        );

        self.side_to_move = self.side_to_move.opposite();
        if piece.kind() == Some(PieceKind::King) {
            self.kings[self.side_to_move.index()] = Some(from);
        }

        self.rule60 = record.rule60;
        self.key = record.key;
    }

    /// Flips the side to move without touching the board.
    ///
    /// Used by search-side pruning. The caller guarantees the side to
    /// move is not currently in check.
    pub fn make_null_move(&mut self) {
        self.states.push(StateRecord {
            key: self.key,
            rule60: self.rule60,
        });
        self.rule60 += 1;
        self.side_to_move = self.side_to_move.opposite();
        self.key ^= zobrist::side_key();
    }

    /// Reverts the most recent null move.
    pub fn undo_null_move(&mut self) {
        let record = self.states.pop();
        debug_assert!(
            record.is_some(),
            "undo_null_move without a matching make_null_move"
        );
        let Some(record) = record else { return };

        self.side_to_move = self.side_to_move.opposite();
        self.rule60 = record.rule60;
        self.key = record.key;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = "+---+---+---+---+---+---+---+---+---+";
        writeln!(f, "{}", divider)?;
        for rank_idx in (0..10).rev() {
            for file in File::ALL {
                let sq = Square::new(file, Rank::ALL[rank_idx]);
                write!(f, "| {} ", self.grid.piece_on(sq).to_char())?;
            }
            writeln!(f, "| {}", rank_idx)?;
            writeln!(f, "{}", divider)?;
        }
        writeln!(f, "  a   b   c   d   e   f   g   h   i")?;
        writeln!(f)?;
        writeln!(f, "Side to move: {}", self.side_to_move)?;
        writeln!(f, "Hash key:     {:016x}", self.key)?;
        write!(f, "King squares: ")?;
        for color in [Color::Red, Color::Black] {
            match self.kings[color.index()] {
                Some(sq) => write!(f, "{} ", sq)?,
                None => write!(f, "- ")?,
            }
        }
        writeln!(f)?;
        writeln!(f, "Rule 60:      {}", self.rule60)
    }
}
