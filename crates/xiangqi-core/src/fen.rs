//! FEN parsing and serialization for xiangqi positions.

use crate::Piece;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid reversible-move clock: {0}")]
    InvalidReversibleClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Parsed FEN data.
///
/// This struct holds the raw parsed FEN components. The engine is
/// responsible for converting this into its internal position
/// representation.
///
/// Xiangqi FEN keeps the six-field chess layout; the castling and en
/// passant fields are always "-" and are ignored on input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Piece placement string, rank 9 first (e.g., "rnbakabnr/9/...").
    pub piece_placement: String,
    /// Active color ('w' for Red, 'b' for Black).
    pub active_color: char,
    /// Plies since the last capture, for draw-by-inactivity rules.
    pub reversible_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl FenRecord {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str =
        "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        Self::validate_piece_placement(piece_placement)?;

        let active_color = match parts[1] {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        // parts[2] and parts[3] are the unused castling/en-passant slots

        let reversible_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidReversibleClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenRecord {
            piece_placement: piece_placement.to_string(),
            active_color,
            reversible_clock,
            fullmove_number,
        })
    }

    fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 10 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 10 ranks, got {}",
                ranks.len()
            )));
        }

        for (i, rank) in ranks.iter().enumerate() {
            let mut squares = 0;
            for c in rank.chars() {
                if c.is_ascii_digit() {
                    squares += c.to_digit(10).unwrap();
                } else if Piece::from_fen_char(c).is_some() {
                    squares += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        9 - i
                    )));
                }
            }
            if squares != 9 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 9",
                    9 - i,
                    squares
                )));
            }
        }

        Ok(())
    }

    /// Converts the parsed FEN back to a FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} - - {} {}",
            self.piece_placement, self.active_color, self.reversible_clock, self.fullmove_number
        )
    }
}

impl Default for FenRecord {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
