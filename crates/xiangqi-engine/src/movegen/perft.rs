//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can
//! be compared against known-correct values to validate the move
//! generator together with make/undo. Generation is pseudo-legal, so
//! every move is pushed through [`Position::make_move`] and illegal
//! ones simply do not contribute.

use super::generate_moves;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);
    let mut nodes = 0u64;
    for &m in &moves {
        if !position.make_move(m) {
            continue;
        }
        nodes += perft(position, depth - 1);
        position.undo_move(m);
    }
    nodes
}

/// Perft with divide - shows the node count under each root move.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &mut Position, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_moves(position);
    let mut results = Vec::with_capacity(moves.len());

    for &m in &moves {
        if !position.make_move(m) {
            continue;
        }
        let nodes = if depth > 1 {
            perft(position, depth - 1)
        } else {
            1
        };
        position.undo_move(m);
        results.push((m.to_coord(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
