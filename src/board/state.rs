//! The per-position metadata snapshot used to reverse moves.
//!
//! [`Board::make_move`] returns the `GameState` that was in effect just
//! before the move; [`Board::unmake_move`] takes that same value back and
//! restores it verbatim. Keeping the whole prior state (rather than a diff)
//! is what makes unmake trivial for every move kind: only the piece
//! placement has to be reversed by hand.
//!
//! [`Board::make_move`]: ../struct.Board.html#method.make_move
//! [`Board::unmake_move`]: ../struct.Board.html#method.unmake_move

use super::castle_rights::Castling;
use crate::core::sq::{NO_SQ, SQ};
use crate::core::PieceType;

/// Metadata of a position that cannot be recomputed cheaply after a move is
/// reversed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    /// Castling rights remaining for both players.
    pub castling: Castling,
    /// En-passant target square, or `NO_SQ`.
    pub ep_square: SQ,
    /// Plies since the last capture or pawn move; 100 triggers the
    /// fifty-move draw.
    pub rule_50: u16,
    /// Full moves played, starting at 1 and advancing after black's move.
    pub fullmove: u16,
    /// Zobrist hash of the position.
    pub zobrist: u64,
    /// Piece type captured by the move that produced this state, if any.
    pub captured: PieceType,
}

impl GameState {
    /// State of an empty board with no rights and nothing played.
    pub const fn blank() -> GameState {
        GameState {
            castling: Castling::no_rights(),
            ep_square: NO_SQ,
            rule_50: 0,
            fullmove: 1,
            zobrist: 0,
            captured: PieceType::None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::blank()
    }
}
