//! Attack detection.
//!
//! A pure predicate over the board: no side effects, safe to call with
//! any square including either king's current location. Each piece
//! kind that could reach the square is tested independently against
//! the shared movement tables.

use crate::grid::{zone, Zone, KNIGHT_EYES, ORTHOGONAL, PAWN_SIDE_STEPS};
use crate::Position;
use xiangqi_core::{Color, Piece, PieceKind, Square};

/// Returns true if the given square is attacked by the given color.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    let grid = position.grid();
    let origin = sq.grid() as i16;

    // knights, reached through an empty diagonal eye
    let knight = Piece::new(by, PieceKind::Knight);
    for (eye, attackers) in KNIGHT_EYES {
        if grid.piece(origin + eye) == Piece::Empty {
            for delta in attackers {
                if grid.piece(origin + delta) == knight {
                    return true;
                }
            }
        }
    }

    // rooks, cannons, and the facing king along orthogonal rays: the
    // first occupied cell with no screen before it attacks like a rook
    // (a king exactly the same way - the flying-general rule), the
    // first occupied cell behind exactly one screen attacks as a
    // cannon; the walk stops at the sentinel
    let rook = Piece::new(by, PieceKind::Rook);
    let king = Piece::new(by, PieceKind::King);
    let cannon = Piece::new(by, PieceKind::Cannon);
    for dir in ORTHOGONAL {
        let mut target = origin + dir;
        let mut screens = 0;
        loop {
            let occupant = grid.piece(target);
            if occupant == Piece::OffBoard {
                break;
            }
            if occupant != Piece::Empty {
                if screens == 0 && (occupant == rook || occupant == king) {
                    return true;
                }
                screens += 1;
                if screens == 2 && occupant == cannon {
                    return true;
                }
            }
            target += dir;
        }
    }

    // pawns, from the cells they could have stepped in from: straight
    // ahead always, sideways only for a pawn already past the river
    let pawn = Piece::new(by, PieceKind::Pawn);
    if grid.piece(origin - by.pawn_step()) == pawn {
        return true;
    }
    for step in PAWN_SIDE_STEPS {
        let cell = origin + step;
        if grid.piece(cell) == pawn && zone(by, cell) == Zone::Outside {
            return true;
        }
    }

    false
}

/// Returns true if the king of the given color is attacked.
///
/// A color with no king on the board is never in check.
pub fn is_king_attacked(position: &Position, king_color: Color) -> bool {
    match position.king_square(king_color) {
        Some(sq) => is_square_attacked(position, sq, king_color.opposite()),
        None => false,
    }
}
