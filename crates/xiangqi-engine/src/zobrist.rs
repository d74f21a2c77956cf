//! Zobrist hashing for position identification.
//!
//! Each piece/cell combination gets a pseudo-random 64-bit key, plus
//! one key for the side to move. XORing the keys of every occupied
//! cell yields the position identity; make/undo maintain it
//! incrementally by XORing the affected cells in and out.

use xiangqi_core::{Piece, Square, GRID_SIZE};

/// Zobrist hash keys.
///
/// Generated with a fixed seed for reproducibility. Keys are indexed
/// by piece tag and grid cell; the rows for [`Piece::Empty`] and
/// [`Piece::OffBoard`] stay zero so callers can XOR a move's captured
/// field unconditionally.
struct ZobristKeys {
    pieces: [[u64; GRID_SIZE]; 16],
    side: u64,
}

impl ZobristKeys {
    const fn new() -> Self {
        // Simple xorshift64 PRNG for const initialization
        const fn next_random(state: u64) -> (u64, u64) {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x, x)
        }

        let mut state = 0x9E3779B97F4A7C15u64; // Golden ratio seed
        let mut pieces = [[0u64; GRID_SIZE]; 16];

        let mut tag = 1;
        while tag < 15 {
            let mut cell = 0;
            while cell < GRID_SIZE {
                let (new_state, value) = next_random(state);
                state = new_state;
                pieces[tag][cell] = value;
                cell += 1;
            }
            tag += 1;
        }

        let (_, side) = next_random(state);

        ZobristKeys { pieces, side }
    }
}

/// Global Zobrist keys (initialized at compile time).
static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Returns the key for a piece on a square.
///
/// The empty and off-board tags hash to zero.
#[inline]
pub(crate) fn piece_key(piece: Piece, sq: Square) -> u64 {
    ZOBRIST.pieces[piece.index()][sq.grid() as usize]
}

/// Returns the key toggled when Black is to move.
#[inline]
pub(crate) fn side_key() -> u64 {
    ZOBRIST.side
}
