//! Perft: exhaustive move-path counting for validating the move generator
//! and make/unmake against known node counts.

use super::Board;

/// Counts the leaf nodes of the legal move tree to the given depth.
pub fn perft(board: &mut Board, depth: u16) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut count: u64 = 0;
    for mv in &moves {
        let prior = board.make_move(*mv);
        count += perft(board, depth - 1);
        board.unmake_move(*mv, prior);
    }
    count
}

/// Perft split by root move, the standard tool for pinning down where a
/// generator disagrees with a reference count.
pub fn perft_divide(board: &mut Board, depth: u16) -> Vec<(String, u64)> {
    let mut results = Vec::new();
    for mv in &board.generate_moves() {
        let prior = board.make_move(*mv);
        let nodes = if depth > 1 { perft(board, depth - 1) } else { 1 };
        board.unmake_move(*mv, prior);
        results.push((mv.to_string(), nodes));
    }
    results
}
