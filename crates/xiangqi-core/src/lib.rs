//! Core types for xiangqi (Chinese chess).
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`], [`PieceKind`], and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for coordinates on the padded grid
//! - [`Move`] for move representation
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenRecord};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square, GRID_HEIGHT, GRID_SIZE, GRID_WIDTH};
