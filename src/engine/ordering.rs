//! Move ordering: MVV-LVA capture scoring, promotion bonuses, and the
//! killer-move table.
//!
//! Ordering only changes how fast the search proves its result, never what
//! the result is, so the scores here are plain heuristics: take the most
//! valuable victim with the least valuable attacker, try queen promotions
//! before the rest, and try the quiet moves that recently caused cutoffs
//! at the same ply before the unscored remainder.

use crate::board::Board;
use crate::core::move_list::{MoveList, ScoredMoveList};
use crate::core::piece_move::{Move, MoveKind};
use crate::core::PieceType;

use super::search::MAX_PLY;

/// Victim worth by type, indexed P through Q. Spread out so every victim
/// tier outranks any attacker adjustment.
const VICTIM_SCORE: [i16; 5] = [15, 25, 35, 45, 55];

const KILLER_BONUS: i16 = 70;

fn mvv_lva(victim: PieceType, attacker: PieceType) -> i16 {
    debug_assert!(victim != PieceType::None && victim != PieceType::K);
    VICTIM_SCORE[victim as usize - 1] - attacker as i16
}

fn promo_bonus(promo: PieceType) -> i16 {
    match promo {
        PieceType::Q => 63,
        PieceType::N => 62,
        PieceType::R => 61,
        _ => 60, // bishop
    }
}

/// Two quiet moves per ply that last caused a beta cutoff there.
pub struct KillerTable {
    killers: [[Move; 2]; MAX_PLY],
}

impl KillerTable {
    pub fn new() -> KillerTable {
        KillerTable {
            killers: [[Move::NULL; 2]; MAX_PLY],
        }
    }

    /// Records a quiet cutoff move. A move already held in either slot is
    /// a no-op; otherwise the second slot takes it once the first is
    /// occupied, so the first killer at a ply is never evicted.
    pub fn store(&mut self, ply: usize, mv: Move) {
        if ply >= MAX_PLY {
            return;
        }
        let slots = &mut self.killers[ply];
        if slots[0] == mv || slots[1] == mv {
            return;
        }
        if slots[0].is_null() {
            slots[0] = mv;
        } else {
            slots[1] = mv;
        }
    }

    #[inline]
    pub fn is_killer(&self, ply: usize, mv: Move) -> bool {
        ply < MAX_PLY && (self.killers[ply][0] == mv || self.killers[ply][1] == mv)
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        KillerTable::new()
    }
}

/// Scores every move and returns the list sorted best first.
pub fn order_moves(
    board: &Board,
    moves: &MoveList,
    killers: &KillerTable,
    ply: usize,
) -> ScoredMoveList {
    let mut scored = ScoredMoveList::default();
    for &mv in moves.iter() {
        scored.push(mv, score_move(board, killers, ply, mv));
    }
    scored
        .as_mut_slice()
        .sort_unstable_by_key(|sm| std::cmp::Reverse(sm.score));
    scored
}

/// Scores only captures and promotions, for quiescence; quiet moves are
/// dropped entirely.
pub fn order_noisy_moves(board: &Board, moves: &MoveList) -> ScoredMoveList {
    let mut scored = ScoredMoveList::default();
    for &mv in moves.iter() {
        if is_noisy(board, mv) {
            scored.push(mv, score_move(board, &KillerTable::new(), MAX_PLY, mv));
        }
    }
    scored
        .as_mut_slice()
        .sort_unstable_by_key(|sm| std::cmp::Reverse(sm.score));
    scored
}

/// Captures and promotions keep the quiescence search going.
pub fn is_noisy(board: &Board, mv: Move) -> bool {
    mv.kind() == MoveKind::Promotion
        || mv.kind() == MoveKind::EnPassant
        || board.piece_at_sq(mv.dst()).type_of() != PieceType::None
}

fn score_move(board: &Board, killers: &KillerTable, ply: usize, mv: Move) -> i16 {
    match mv.kind() {
        MoveKind::Promotion => {
            // a capturing promotion still ranks by the promoted piece
            promo_bonus(mv.promo_type())
        }
        MoveKind::EnPassant => mvv_lva(PieceType::P, PieceType::P),
        _ => {
            let victim = board.piece_at_sq(mv.dst()).type_of();
            if victim != PieceType::None {
                mvv_lva(victim, board.piece_at_sq(mv.src()).type_of())
            } else if killers.is_killer(ply, mv) {
                KILLER_BONUS
            } else {
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sq::SQ;

    #[test]
    fn capture_of_the_queen_comes_first() {
        // the b4 knight can take either the d5 queen or the c6 knight
        let board =
            Board::from_fen("4k3/8/2n5/3q4/1N6/2P5/8/4K3 w - - 0 1").unwrap();
        let ordered = order_moves(&board, &board.generate_moves(), &KillerTable::new(), 0);
        assert_eq!(ordered[0].mv.to_string(), "b4d5");
    }

    #[test]
    fn pawn_takes_queen_beats_knight_takes_queen() {
        assert!(mvv_lva(PieceType::Q, PieceType::P) > mvv_lva(PieceType::Q, PieceType::N));
        assert!(mvv_lva(PieceType::P, PieceType::Q) < mvv_lva(PieceType::N, PieceType::P));
    }

    #[test]
    fn queen_promotion_outranks_every_capture() {
        assert!(promo_bonus(PieceType::Q) > mvv_lva(PieceType::Q, PieceType::P));
        assert!(promo_bonus(PieceType::N) > promo_bonus(PieceType::R));
    }

    #[test]
    fn killers_rank_above_quiet_moves() {
        let board = Board::start_pos();
        let killer = Move::new(SQ::G1, SQ::F3);
        let mut killers = KillerTable::new();
        killers.store(3, killer);
        let ordered = order_moves(&board, &board.generate_moves(), &killers, 3);
        assert_eq!(ordered[0].mv, killer);
    }

    #[test]
    fn killer_slots_fill_without_evicting_the_first() {
        let a = Move::new(SQ::E2, SQ::E4);
        let b = Move::new(SQ::D2, SQ::D4);
        let c = Move::new(SQ::C2, SQ::C4);
        let mut killers = KillerTable::new();
        killers.store(0, a);
        killers.store(0, a); // duplicate in the first slot, no-op
        killers.store(0, b);
        killers.store(0, b); // duplicate in the second slot, also a no-op
        assert!(killers.is_killer(0, a));
        assert!(killers.is_killer(0, b));

        // a third distinct killer replaces only the second slot
        killers.store(0, c);
        assert!(killers.is_killer(0, a));
        assert!(killers.is_killer(0, c));
        assert!(!killers.is_killer(0, b));
        assert!(!killers.is_killer(1, a));
    }

    #[test]
    fn quiescence_ordering_keeps_only_noise() {
        let board =
            Board::from_fen("4k3/8/2n5/3q4/1N6/2P5/8/4K3 w - - 0 1").unwrap();
        let noisy = order_noisy_moves(&board, &board.generate_moves());
        assert!(noisy.len() >= 1);
        assert!(noisy.iter().all(|sm| is_noisy(&board, sm.mv)));
    }
}
