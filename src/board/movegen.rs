//! Legal move generation.
//!
//! Moves are generated strictly legal, never filtered after the fact. The
//! generator computes the squares the enemy attacks with the moving king
//! lifted off the board, the pieces currently giving check, and the pieces
//! pinned against the king; every emitted move is then restricted by those
//! three masks up front. En-passant captures are the one case validated by
//! simulating the resulting occupancy, since they are the only move that
//! clears two squares at once.

use crate::core::bitboard::BitBoard;
use crate::core::masks::{CASTLE_EMPTY_BB, CASTLE_PATH_BB};
use crate::core::move_list::MoveList;
use crate::core::piece_move::Move;
use crate::core::sq::{NO_SQ, SQ};
use crate::core::{CastleType, Piece, PieceType, Player};
use crate::helper::prelude::*;

use super::Board;

/// Generates every legal move for the side to move, and reports whether
/// that side is in check.
pub fn generate_legal(board: &Board) -> (MoveList, bool) {
    let mut gen = MoveGen::new(board);
    let in_check = gen.checkers.is_not_empty();

    gen.gen_king_moves();
    if !gen.checkers.more_than_one() {
        gen.compute_evasion_masks();
        gen.compute_pinned();
        gen.gen_knight_moves();
        gen.gen_slider_moves();
        gen.gen_pawn_moves();
        gen.gen_en_passant();
        if !in_check {
            gen.gen_castling();
        }
    }
    (gen.list, in_check)
}

struct MoveGen<'a> {
    board: &'a Board,
    list: MoveList,
    us: Player,
    them: Player,
    occ: BitBoard,
    us_bb: BitBoard,
    them_bb: BitBoard,
    ksq: SQ,
    danger: BitBoard,
    checkers: BitBoard,
    pinned: BitBoard,
    capture_mask: BitBoard,
    push_mask: BitBoard,
}

impl<'a> MoveGen<'a> {
    fn new(board: &'a Board) -> MoveGen<'a> {
        let us = board.turn();
        let them = !us;
        let occ = board.occupied();
        let ksq = board.king_sq(us);
        let checkers = board.attackers_to(ksq, occ) & board.get_occupied_player(them);
        let mut gen = MoveGen {
            board,
            list: MoveList::default(),
            us,
            them,
            occ,
            us_bb: board.get_occupied_player(us),
            them_bb: board.get_occupied_player(them),
            ksq,
            danger: BitBoard::EMPTY,
            checkers,
            pinned: BitBoard::EMPTY,
            capture_mask: BitBoard::EMPTY,
            push_mask: BitBoard::EMPTY,
        };
        gen.danger = gen.compute_danger();
        gen
    }

    /// All squares the enemy attacks, with our king removed from the
    /// occupancy so sliders see through it. A checked king may otherwise
    /// step backwards along the checking ray into an "unattacked" square.
    fn compute_danger(&self) -> BitBoard {
        let occ_no_king = (self.occ ^ self.ksq.to_bb()).0;
        let board = self.board;
        let mut danger: u64 = 0;
        for sq in board.piece_bb(self.them, PieceType::P) {
            danger |= pawn_attacks_from(sq, self.them);
        }
        for sq in board.piece_bb(self.them, PieceType::N) {
            danger |= knight_moves(sq);
        }
        for sq in board.piece_bb(self.them, PieceType::B) | board.piece_bb(self.them, PieceType::Q)
        {
            danger |= bishop_attacks(occ_no_king, sq.0);
        }
        for sq in board.piece_bb(self.them, PieceType::R) | board.piece_bb(self.them, PieceType::Q)
        {
            danger |= rook_attacks(occ_no_king, sq.0);
        }
        danger |= king_moves(board.king_sq(self.them));
        BitBoard(danger)
    }

    /// Out of check: captures may take anything, pushes may go anywhere
    /// empty. In (single) check: captures must take the checker, pushes
    /// must block its ray.
    fn compute_evasion_masks(&mut self) {
        if self.checkers.is_empty() {
            self.capture_mask = self.them_bb;
            self.push_mask = !self.occ;
        } else {
            self.capture_mask = self.checkers;
            let checker_sq = self.checkers.to_sq();
            self.push_mask = match self.board.piece_at_sq(checker_sq).type_of() {
                PieceType::B | PieceType::R | PieceType::Q => {
                    BitBoard(between_bb(self.ksq, checker_sq))
                }
                _ => BitBoard::EMPTY,
            };
        }
    }

    /// Our pieces that are the single blocker between an enemy slider and
    /// our king. They may only move along the pinning line.
    fn compute_pinned(&mut self) {
        let board = self.board;
        let snipers = ((BitBoard(rook_attacks(0, self.ksq.0))
            & (board.piece_bb(self.them, PieceType::R) | board.piece_bb(self.them, PieceType::Q)))
            | (BitBoard(bishop_attacks(0, self.ksq.0))
                & (board.piece_bb(self.them, PieceType::B)
                    | board.piece_bb(self.them, PieceType::Q))))
            & self.them_bb;
        for sniper in snipers {
            let blockers = BitBoard(between_bb(self.ksq, sniper)) & self.occ;
            if !blockers.more_than_one() && (blockers & self.us_bb).is_not_empty() {
                self.pinned |= blockers;
            }
        }
    }

    /// A pinned piece may only move on the line through it and the king.
    #[inline]
    fn pin_ok(&self, src: SQ, dst: SQ) -> bool {
        !self.pinned.is_set(src) || aligned(self.ksq, src, dst)
    }

    fn gen_king_moves(&mut self) {
        let moves = BitBoard(king_moves(self.ksq)) & !self.us_bb & !self.danger;
        for dst in moves {
            self.list.push(Move::new(self.ksq, dst));
        }
    }

    fn gen_knight_moves(&mut self) {
        let allowed = self.capture_mask | self.push_mask;
        // a pinned knight can never stay on the pinning line
        for src in self.board.piece_bb(self.us, PieceType::N) & !self.pinned {
            for dst in BitBoard(knight_moves(src)) & allowed {
                self.list.push(Move::new(src, dst));
            }
        }
    }

    fn gen_slider_moves(&mut self) {
        let board = self.board;
        let allowed = self.capture_mask | self.push_mask;
        let occ = self.occ.0;

        let bishops = board.piece_bb(self.us, PieceType::B);
        let rooks = board.piece_bb(self.us, PieceType::R);
        let queens = board.piece_bb(self.us, PieceType::Q);

        for src in bishops {
            for dst in BitBoard(bishop_attacks(occ, src.0)) & allowed {
                if self.pin_ok(src, dst) {
                    self.list.push(Move::new(src, dst));
                }
            }
        }
        for src in rooks {
            for dst in BitBoard(rook_attacks(occ, src.0)) & allowed {
                if self.pin_ok(src, dst) {
                    self.list.push(Move::new(src, dst));
                }
            }
        }
        for src in queens {
            for dst in BitBoard(queen_attacks(occ, src)) & allowed {
                if self.pin_ok(src, dst) {
                    self.list.push(Move::new(src, dst));
                }
            }
        }
    }

    fn gen_pawn_moves(&mut self) {
        let board = self.board;
        let push = self.us.pawn_push();
        let promo_rank = self.us.promotion_rank();
        let empty = !self.occ;

        for src in board.piece_bb(self.us, PieceType::P) {
            // captures, promoting or not
            let attacks = BitBoard(pawn_attacks_from(src, self.us)) & self.capture_mask;
            for dst in attacks {
                if self.pin_ok(src, dst) {
                    self.push_pawn_move(src, dst, dst.rank() == promo_rank);
                }
            }

            // single and double pushes
            let one_up = src.offset(push);
            if !one_up.is_okay() || !empty.is_set(one_up) {
                continue;
            }
            if self.push_mask.is_set(one_up) && self.pin_ok(src, one_up) {
                self.push_pawn_move(src, one_up, one_up.rank() == promo_rank);
            }
            if src.rank() == self.us.pawn_start_rank() {
                let two_up = one_up.offset(push);
                if empty.is_set(two_up)
                    && self.push_mask.is_set(two_up)
                    && self.pin_ok(src, two_up)
                {
                    self.list.push(Move::new(src, two_up));
                }
            }
        }
    }

    fn push_pawn_move(&mut self, src: SQ, dst: SQ, promoting: bool) {
        if promoting {
            self.list.push(Move::new_promotion(src, dst, PieceType::Q));
            self.list.push(Move::new_promotion(src, dst, PieceType::R));
            self.list.push(Move::new_promotion(src, dst, PieceType::B));
            self.list.push(Move::new_promotion(src, dst, PieceType::N));
        } else {
            self.list.push(Move::new(src, dst));
        }
    }

    /// En passant clears two squares at once, so ordinary pin tracking is
    /// not enough. Each candidate capture is checked by simulating the
    /// occupancy after it and probing for a slider hitting our king.
    fn gen_en_passant(&mut self) {
        let ep = self.board.ep_square();
        if ep == NO_SQ {
            return;
        }
        let board = self.board;
        let victim = ep.offset(-self.us.pawn_push());

        // in check, the capture must remove the checker or land on the ray
        if self.checkers.is_not_empty()
            && self.checkers != victim.to_bb()
            && !self.push_mask.is_set(ep)
        {
            return;
        }

        let rq = board.piece_bb(self.them, PieceType::R) | board.piece_bb(self.them, PieceType::Q);
        let bq = board.piece_bb(self.them, PieceType::B) | board.piece_bb(self.them, PieceType::Q);
        let candidates =
            BitBoard(pawn_attacks_from(ep, self.them)) & board.piece_bb(self.us, PieceType::P);
        for src in candidates {
            let occ_sim = ((self.occ ^ src.to_bb() ^ victim.to_bb()) | ep.to_bb()).0;
            if (BitBoard(rook_attacks(occ_sim, self.ksq.0)) & rq).is_empty()
                && (BitBoard(bishop_attacks(occ_sim, self.ksq.0)) & bq).is_empty()
            {
                self.list.push(Move::new_en_passant(src, ep));
            }
        }
    }

    /// Castling needs the rook's path empty and the king's path free of
    /// enemy attacks; being in check is ruled out by the caller.
    fn gen_castling(&mut self) {
        let board = self.board;
        for &side in [CastleType::KingSide, CastleType::QueenSide].iter() {
            if !board.castling().castle_rights(self.us, side) {
                continue;
            }
            let empty_path = BitBoard(CASTLE_EMPTY_BB[self.us as usize][side as usize]);
            let king_path = BitBoard(CASTLE_PATH_BB[self.us as usize][side as usize]);
            if (empty_path & self.occ).is_not_empty() || (king_path & self.danger).is_not_empty() {
                continue;
            }
            let rook_sq = match (self.us, side) {
                (Player::White, CastleType::KingSide) => SQ::H1,
                (Player::White, CastleType::QueenSide) => SQ::A1,
                (Player::Black, CastleType::KingSide) => SQ::H8,
                (Player::Black, CastleType::QueenSide) => SQ::A8,
            };
            if board.piece_at_sq(rook_sq) != Piece::make(self.us, PieceType::R) {
                continue;
            }
            self.list.push(Move::new_castle(self.us, side));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves_of(fen: &str) -> Vec<String> {
        let board = Board::from_fen(fen).unwrap();
        let mut v: Vec<String> = board.generate_moves().iter().map(|m| m.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let board = Board::start_pos();
        let (list, in_check) = generate_legal(&board);
        assert_eq!(list.len(), 20);
        assert!(!in_check);
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        // the e8 rook and the d3 knight both give check
        let board = Board::from_fen("4r2k/8/8/8/8/3n4/8/4K3 w - - 0 1").unwrap();
        let (list, in_check) = generate_legal(&board);
        assert!(in_check);
        let mut moves: Vec<String> = list.iter().map(|m| m.to_string()).collect();
        moves.sort();
        assert_eq!(moves, vec!["e1d1", "e1d2", "e1f1"]);
    }

    #[test]
    fn check_must_be_answered() {
        // the e8 rook checks; the c3 knight may only block on the file
        let moves = moves_of("4r3/8/8/8/8/2N5/8/4K2k w - - 0 1");
        assert!(moves.contains(&"c3e2".to_string()));
        assert!(moves.contains(&"c3e4".to_string()));
        assert!(moves
            .iter()
            .all(|m| m.starts_with("e1") || m == "c3e2" || m == "c3e4"));
    }

    #[test]
    fn pinned_piece_stays_on_the_line() {
        // the e4 knight is pinned by the e8 rook and cannot move at all
        let moves = moves_of("4r2k/8/8/8/4N3/8/8/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| !m.starts_with("e4")));

        // a pinned rook may still slide along the pin
        let moves = moves_of("4r2k/8/8/8/4R3/8/8/4K3 w - - 0 1");
        let rook_moves: Vec<&String> =
            moves.iter().filter(|m| m.starts_with("e4")).collect();
        assert!(!rook_moves.is_empty());
        assert!(rook_moves.iter().all(|m| m.as_bytes()[2] == b'e'));
    }

    #[test]
    fn ep_discovered_check_is_illegal() {
        // taking en passant would expose the king on the fifth rank
        let board =
            Board::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 2").unwrap();
        assert!(board
            .generate_moves()
            .iter()
            .all(|m| !m.is_en_passant()));
    }

    #[test]
    fn castling_through_attack_is_illegal() {
        // the a6 bishop covers f1, so white may only castle long
        let moves = moves_of("r3k2r/8/b7/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(!moves.contains(&"e1g1".to_string()));
        assert!(moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn castling_blocked_by_piece() {
        let moves = moves_of("4k3/8/8/8/8/8/8/R2QK2R w KQ - 0 1");
        assert!(moves.contains(&"e1g1".to_string()));
        assert!(!moves.contains(&"e1c1".to_string()));
    }

    #[test]
    fn promotions_come_in_four_kinds() {
        let moves = moves_of("8/P6k/8/8/8/8/7K/8 w - - 0 1");
        for suffix in ["q", "r", "b", "n"].iter() {
            assert!(moves.contains(&format!("a7a8{}", suffix)));
        }
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        // back-rank mate
        let board = Board::from_fen("R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let (list, in_check) = generate_legal(&board);
        assert!(list.is_empty());
        assert!(in_check);

        // classic king-and-queen stalemate
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let (list, in_check) = generate_legal(&board);
        assert!(list.is_empty());
        assert!(!in_check);
    }
}
