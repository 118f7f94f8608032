//! Static evaluation: material plus piece-square tables.
//!
//! Scores are in centipawns from white's point of view; the search negates
//! for the side to move. The tables are the classic hand-tuned middlegame
//! set: knights and bishops prefer the center, pawns are pushed toward
//! promotion, the king hides behind its pawns.

use crate::board::Board;
use crate::core::{PieceType, Player};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Material worth of a piece type. Kings carry no material score; both
/// sides always have exactly one.
#[inline]
pub fn piece_value(pt: PieceType) -> i32 {
    match pt {
        PieceType::P => PAWN_VALUE,
        PieceType::N => KNIGHT_VALUE,
        PieceType::B => BISHOP_VALUE,
        PieceType::R => ROOK_VALUE,
        PieceType::Q => QUEEN_VALUE,
        _ => 0,
    }
}

#[rustfmt::skip]
const PAWN_PSQ: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PSQ: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PSQ: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PSQ: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PSQ: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_PSQ: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[inline]
fn psq(pt: PieceType, sq_idx: u8) -> i32 {
    let i = sq_idx as usize;
    match pt {
        PieceType::P => PAWN_PSQ[i],
        PieceType::N => KNIGHT_PSQ[i],
        PieceType::B => BISHOP_PSQ[i],
        PieceType::R => ROOK_PSQ[i],
        PieceType::Q => QUEEN_PSQ[i],
        PieceType::K => KING_PSQ[i],
        PieceType::None => 0,
    }
}

/// Evaluates the position in centipawns, positive for white.
pub fn eval_board(board: &Board) -> i32 {
    let mut score: i32 = 0;
    for sq in board.occupied() {
        let piece = board.piece_at_sq(sq);
        let pt = piece.type_of();
        match piece.player_lossy() {
            Player::White => score += piece_value(pt) + psq(pt, sq.0),
            // black's tables are white's flipped vertically
            Player::Black => score -= piece_value(pt) + psq(pt, sq.0 ^ 56),
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(eval_board(&Board::start_pos()), 0);
    }

    #[test]
    fn material_advantage_shows() {
        // white is up a queen
        let board = Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert!(eval_board(&board) >= QUEEN_VALUE / 2);
    }

    #[test]
    fn mirrored_position_negates() {
        let white_active =
            Board::from_fen("4k3/8/8/8/8/5N2/8/4K3 w - - 0 1").unwrap();
        let black_active =
            Board::from_fen("4k3/8/5n2/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(eval_board(&white_active), -eval_board(&black_active));
    }

    #[test]
    fn centralized_knight_beats_rim_knight() {
        let central = Board::from_fen("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let rim = Board::from_fen("4k3/8/8/8/N7/8/8/4K3 w - - 0 1").unwrap();
        assert!(eval_board(&central) > eval_board(&rim));
    }
}
