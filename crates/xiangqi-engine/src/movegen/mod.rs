//! Move generation.
//!
//! This module enumerates pseudo-legal moves: moves consistent with
//! each piece's movement pattern and board occupancy, not yet verified
//! to leave the mover's own king safe. Legality is settled by
//! [`Position::make_move`], which rejects a move after speculative
//! application if it exposes the king.

mod attacks;
pub mod perft;

use crate::grid::{
    zone, Zone, DIAGONAL, ELEPHANT_JUMPS, KNIGHT_JUMPS, ORTHOGONAL, PAWN_SIDE_STEPS,
};
use crate::Position;
use xiangqi_core::{Color, Move, Piece, PieceKind, Square, GRID_SIZE};

pub use attacks::{is_king_attacked, is_square_attacked};

/// A list of moves with a fixed maximum capacity.
///
/// Xiangqi positions top out around 120 legal moves, so a fixed-size
/// array avoids heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any reachable position.
    pub const MAX_MOVES: usize = 128;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all pseudo-legal moves for the side to move.
pub fn generate_moves(position: &Position) -> MoveList {
    generate(position, false)
}

/// Generates pseudo-legal captures for the side to move.
///
/// Quiet moves are suppressed, but full rays are still walked so that
/// capture candidates beyond empty stretches are found.
pub fn generate_captures(position: &Position) -> MoveList {
    generate(position, true)
}

fn generate(position: &Position, captures_only: bool) -> MoveList {
    let mut moves = MoveList::new();
    let us = position.side_to_move();

    // sources in grid order, directions in table order, so traversal
    // counts reproduce exactly
    for index in 0..GRID_SIZE as u8 {
        let piece = position.grid().piece(index as i16);
        if piece.color() != Some(us) {
            continue;
        }
        // SAFETY: an occupied cell is always a playing square
        let from = unsafe { Square::from_grid_unchecked(index) };
        let Some(kind) = piece.kind() else { continue };

        match kind {
            PieceKind::Pawn => pawn_moves(position, from, piece, us, captures_only, &mut moves),
            PieceKind::King => {
                palace_moves(position, from, piece, us, &ORTHOGONAL, captures_only, &mut moves)
            }
            PieceKind::Advisor => {
                palace_moves(position, from, piece, us, &DIAGONAL, captures_only, &mut moves)
            }
            PieceKind::Elephant => {
                elephant_moves(position, from, piece, us, captures_only, &mut moves)
            }
            PieceKind::Knight => knight_moves(position, from, piece, captures_only, &mut moves),
            PieceKind::Rook => rook_moves(position, from, piece, captures_only, &mut moves),
            PieceKind::Cannon => cannon_moves(position, from, piece, captures_only, &mut moves),
        }
    }

    moves
}

/// Pushes a move to `target_index` if the cell is on board and not
/// friendly-occupied; the capture flag follows the occupant.
fn push_move(
    position: &Position,
    moves: &mut MoveList,
    from: Square,
    piece: Piece,
    target_index: i16,
    captures_only: bool,
) {
    let target = position.grid().piece(target_index);
    if target == Piece::OffBoard {
        return;
    }
    // SAFETY: a non-sentinel cell is always a playing square
    let to = unsafe { Square::from_grid_unchecked(target_index as u8) };
    if target == Piece::Empty {
        if !captures_only {
            moves.push(Move::quiet(from, to, piece));
        }
    } else if target.color() != piece.color() {
        moves.push(Move::new(from, to, piece, target));
    }
}

/// A pawn always steps forward; once across the river it may also step
/// sideways.
fn pawn_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    us: Color,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let origin = from.grid() as i16;
    push_move(
        position,
        moves,
        from,
        piece,
        origin + us.pawn_step(),
        captures_only,
    );
    if zone(us, origin) == Zone::Outside {
        for step in PAWN_SIDE_STEPS {
            push_move(position, moves, from, piece, origin + step, captures_only);
        }
    }
}

/// Kings and advisors only differ by their step table; both accept a
/// destination only inside their own palace.
fn palace_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    us: Color,
    deltas: &[i16; 4],
    captures_only: bool,
    moves: &mut MoveList,
) {
    let origin = from.grid() as i16;
    for &delta in deltas {
        let target = origin + delta;
        if zone(us, target) == Zone::Palace {
            push_move(position, moves, from, piece, target, captures_only);
        }
    }
}

/// An elephant jumps two diagonal steps, needs the intermediate eye
/// empty, and may not cross the river.
fn elephant_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    us: Color,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let origin = from.grid() as i16;
    for (eye, landing) in ELEPHANT_JUMPS {
        let target = origin + landing;
        if zone(us, target) != Zone::Outside && position.grid().piece(origin + eye) == Piece::Empty
        {
            push_move(position, moves, from, piece, target, captures_only);
        }
    }
}

/// A knight jump needs its orthogonally adjacent leg empty.
fn knight_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let origin = from.grid() as i16;
    for (leg, landings) in KNIGHT_JUMPS {
        if position.grid().piece(origin + leg) == Piece::Empty {
            for landing in landings {
                push_move(position, moves, from, piece, origin + landing, captures_only);
            }
        }
    }
}

/// A rook slides until the first occupied cell, which it may capture.
fn rook_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let origin = from.grid() as i16;
    for dir in ORTHOGONAL {
        let mut target = origin + dir;
        loop {
            let occupant = position.grid().piece(target);
            if occupant == Piece::OffBoard {
                break;
            }
            push_move(position, moves, from, piece, target, captures_only);
            if occupant != Piece::Empty {
                break;
            }
            target += dir;
        }
    }
}

/// A cannon slides like a rook when quiet but captures by jumping
/// exactly one screen; the second occupied cell ends the ray either
/// way.
fn cannon_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    captures_only: bool,
    moves: &mut MoveList,
) {
    let origin = from.grid() as i16;
    for dir in ORTHOGONAL {
        let mut target = origin + dir;
        let mut screens = 0;
        loop {
            let occupant = position.grid().piece(target);
            if occupant == Piece::OffBoard {
                break;
            }
            if occupant == Piece::Empty {
                if screens == 0 {
                    push_move(position, moves, from, piece, target, captures_only);
                }
            } else {
                screens += 1;
                if screens == 2 {
                    push_move(position, moves, from, piece, target, captures_only);
                    break;
                }
            }
            target += dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::zone_of;
    use xiangqi_core::{File, Rank};

    fn count_kind(moves: &MoveList, kind: PieceKind) -> usize {
        moves
            .as_slice()
            .iter()
            .filter(|m| m.piece().kind() == Some(kind))
            .count()
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let e3 = Square::new(File::E, Rank::R3);
        let e4 = Square::new(File::E, Rank::R4);
        let g3 = Square::new(File::G, Rank::R3);
        let g4 = Square::new(File::G, Rank::R4);

        let m1 = Move::quiet(e3, e4, Piece::RedPawn);
        let m2 = Move::quiet(g3, g4, Piece::RedPawn);

        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list[1], m2);
        assert_eq!(list.as_slice(), &[m1, m2]);
    }

    #[test]
    fn movelist_default_and_clear() {
        let mut list = MoveList::default();
        assert!(list.is_empty());

        list.push(Move::quiet(
            Square::new(File::E, Rank::R3),
            Square::new(File::E, Rank::R4),
            Piece::RedPawn,
        ));
        assert_eq!(list.len(), 1);

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn startpos_move_count() {
        let position = Position::startpos();
        let moves = generate_moves(&position);
        assert_eq!(moves.len(), 44);
    }

    #[test]
    fn startpos_move_count_by_kind() {
        let position = Position::startpos();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, PieceKind::Pawn), 5);
        assert_eq!(count_kind(&moves, PieceKind::Advisor), 2);
        assert_eq!(count_kind(&moves, PieceKind::Elephant), 4);
        assert_eq!(count_kind(&moves, PieceKind::Knight), 4);
        assert_eq!(count_kind(&moves, PieceKind::Cannon), 24);
        assert_eq!(count_kind(&moves, PieceKind::Rook), 4);
        assert_eq!(count_kind(&moves, PieceKind::King), 1);
    }

    #[test]
    fn startpos_black_mirror() {
        let position = Position::from_fen(
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR b - - 0 1",
        )
        .unwrap();
        assert_eq!(generate_moves(&position).len(), 44);
    }

    #[test]
    fn captures_only_matches_filtered_full_list() {
        for fen in [
            xiangqi_core::FenRecord::STARTPOS,
            "rnbakabnr/9/1c5c1/p1p1p1p1p/9/2P6/P3P1P1P/1C5C1/9/RNBAKABNR b - - 0 2",
            "2baka3/9/c3b3n/p3p3p/2p3n2/2P6/P3P3P/4B1N2/2N6/2BAKA2R w - - 0 20",
        ] {
            let position = Position::from_fen(fen).unwrap();
            let all = generate_moves(&position);
            let captures = generate_captures(&position);

            let expected: Vec<Move> = all
                .as_slice()
                .iter()
                .copied()
                .filter(|m| m.is_capture())
                .collect();
            assert_eq!(captures.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn startpos_captures() {
        // only the cannons can capture from the opening layout
        let position = Position::startpos();
        let captures = generate_captures(&position);
        assert_eq!(captures.len(), 2);
        for m in &captures {
            assert_eq!(m.piece(), Piece::RedCannon);
            assert_eq!(m.captured(), Piece::BlackKnight);
        }
    }

    #[test]
    fn pawn_before_river_only_pushes() {
        let position = Position::from_fen("4k4/9/9/9/9/9/4P4/9/9/4K4 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        let pawn_targets: Vec<String> = moves
            .as_slice()
            .iter()
            .filter(|m| m.piece() == Piece::RedPawn)
            .map(|m| m.to().to_algebraic())
            .collect();
        assert_eq!(pawn_targets, vec!["e4".to_string()]);
    }

    #[test]
    fn pawn_past_river_steps_sideways() {
        let position = Position::from_fen("4k4/9/9/9/4P4/9/9/9/9/4K4 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        let mut pawn_targets: Vec<String> = moves
            .as_slice()
            .iter()
            .filter(|m| m.piece() == Piece::RedPawn)
            .map(|m| m.to().to_algebraic())
            .collect();
        pawn_targets.sort();
        assert_eq!(
            pawn_targets,
            vec!["d5".to_string(), "e6".to_string(), "f5".to_string()]
        );
    }

    #[test]
    fn pawn_on_last_rank_cannot_leave_the_board() {
        let position = Position::from_fen("3kP4/9/9/9/9/9/9/9/9/4K4 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        let pawn_targets: Vec<String> = moves
            .as_slice()
            .iter()
            .filter(|m| m.piece() == Piece::RedPawn)
            .map(|m| m.to().to_algebraic())
            .collect();
        // forward falls off the board; only the sideways steps remain
        assert_eq!(pawn_targets.len(), 2);
        assert!(pawn_targets.contains(&"d9".to_string()));
        assert!(pawn_targets.contains(&"f9".to_string()));
    }

    #[test]
    fn king_and_advisor_stay_in_palace() {
        for fen in [
            xiangqi_core::FenRecord::STARTPOS,
            "4k4/4a4/9/9/9/9/9/3A5/4K4/9 w - - 0 1",
            "4k4/4a4/9/9/9/9/9/3A5/4K4/9 b - - 0 1",
        ] {
            let position = Position::from_fen(fen).unwrap();
            let us = position.side_to_move();
            let moves = generate_moves(&position);
            for m in &moves {
                if matches!(
                    m.piece().kind(),
                    Some(PieceKind::King) | Some(PieceKind::Advisor)
                ) {
                    assert_eq!(zone_of(us, m.to()), Zone::Palace, "{m} leaves the palace");
                }
            }
        }
    }

    #[test]
    fn elephant_eye_block() {
        // free elephant has both forward jumps; a blocker on d1 removes one
        let free = Position::from_fen("4k4/9/9/9/9/9/9/9/9/2B1K4 w - - 0 1").unwrap();
        assert_eq!(count_kind(&generate_moves(&free), PieceKind::Elephant), 2);

        let blocked = Position::from_fen("4k4/9/9/9/9/9/9/9/3p5/2B1K4 w - - 0 1").unwrap();
        let moves = generate_moves(&blocked);
        let elephant_targets: Vec<String> = moves
            .as_slice()
            .iter()
            .filter(|m| m.piece() == Piece::RedElephant)
            .map(|m| m.to().to_algebraic())
            .collect();
        assert_eq!(elephant_targets, vec!["a2".to_string()]);
    }

    #[test]
    fn elephant_cannot_cross_river() {
        // red elephant on c4 could geometrically reach a6/e6, both
        // across the river; only the backward jumps survive
        let position = Position::from_fen("4k4/9/9/9/9/2B6/9/9/9/4K4 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        for m in &moves {
            if m.piece() == Piece::RedElephant {
                assert_ne!(zone_of(Color::Red, m.to()), Zone::Outside, "{m} crosses the river");
                assert!(m.to().rank().index() <= 4);
            }
        }
        assert_eq!(count_kind(&moves, PieceKind::Elephant), 2);
    }

    #[test]
    fn knight_legs_block_jumps() {
        // at startpos only the forward leg of each knight is open
        let position = Position::startpos();
        let moves = generate_moves(&position);
        for m in &moves {
            if m.piece().kind() == Some(PieceKind::Knight) {
                let delta = m.to().grid() as i16 - m.from().grid() as i16;
                let (leg, _) = KNIGHT_JUMPS
                    .iter()
                    .find(|(_, landings)| landings.contains(&delta))
                    .expect("knight move matches a jump entry");
                assert_eq!(
                    position.grid().piece(m.from().grid() as i16 + leg),
                    Piece::Empty,
                    "{m} jumps over an occupied leg"
                );
            }
        }
    }

    #[test]
    fn knight_fully_blocked_generates_nothing() {
        // pawns on all four legs pin the knight in place
        let position =
            Position::from_fen("4k4/9/9/9/4p4/3pNp3/4p4/9/9/4K4 w - - 0 1").unwrap();
        let moves = generate_moves(&position);
        assert_eq!(count_kind(&moves, PieceKind::Knight), 0);
    }

    #[test]
    fn cannon_screen_invariants() {
        for fen in [
            xiangqi_core::FenRecord::STARTPOS,
            "1cbakab2/9/2n3nc1/p1p1p1p1p/9/2P6/P3P1P1P/1C2B2C1/9/RN1AKABNR w - - 0 4",
        ] {
            let position = Position::from_fen(fen).unwrap();
            let moves = generate_moves(&position);
            for m in &moves {
                if m.piece().kind() != Some(PieceKind::Cannon) {
                    continue;
                }
                let from = m.from().grid() as i16;
                let to = m.to().grid() as i16;
                let dir = if from / 11 == to / 11 {
                    if to > from { 1 } else { -1 }
                } else if to > from {
                    11
                } else {
                    -11
                };
                let mut screens = 0;
                let mut cell = from + dir;
                while cell != to {
                    if position.grid().piece(cell) != Piece::Empty {
                        screens += 1;
                    }
                    cell += dir;
                }
                if m.is_capture() {
                    assert_eq!(screens, 1, "{m} captures over {screens} screens");
                } else {
                    assert_eq!(screens, 0, "{m} is quiet beyond a screen");
                }
            }
        }
    }

    #[test]
    fn no_move_starts_or_ends_off_board() {
        // Square values are on-board by construction; re-validate the
        // raw grid indices anyway
        let position = Position::startpos();
        let moves = generate_moves(&position);
        for m in &moves {
            assert!(Square::from_grid(m.from().grid()).is_some());
            assert!(Square::from_grid(m.to().grid()).is_some());
            assert_ne!(position.piece_on(m.from()), Piece::Empty);
        }
    }

    #[test]
    fn generated_captures_target_attacked_squares() {
        let position = Position::from_fen(
            "2baka3/9/c3b3n/p3p3p/2p3n2/2P6/P3P3P/4B1N2/2N6/2BAKA2R w - - 0 20",
        )
        .unwrap();
        let us = position.side_to_move();
        for m in &generate_captures(&position) {
            assert!(
                is_square_attacked(&position, m.to(), us),
                "capture {m} targets an unattacked square"
            );
        }
    }

    #[test]
    fn attacked_enemy_pieces_have_a_capture() {
        // the detector only tests kinds that can reach across the
        // board (advisors and elephants never can), so these positions
        // have no advisor/elephant captures and no bare king line
        for fen in [
            xiangqi_core::FenRecord::STARTPOS,
            "1cbakab2/9/2n3nc1/p1p1p1p1p/9/2P6/P3P1P1P/1C2B2C1/9/RN1AKABNR w - - 0 4",
        ] {
            let position = Position::from_fen(fen).unwrap();
            let us = position.side_to_move();
            let captures = generate_captures(&position);
            for file in File::ALL {
                for rank in Rank::ALL {
                    let sq = Square::new(file, rank);
                    if position.piece_on(sq).color() != Some(us.opposite()) {
                        continue;
                    }
                    let attacked = is_square_attacked(&position, sq, us);
                    let captured = captures.as_slice().iter().any(|m| m.to() == sq);
                    assert_eq!(attacked, captured, "mismatch on {sq}");
                }
            }
        }
    }
}
