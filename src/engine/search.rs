//! The alpha-beta search.
//!
//! Plain fail-hard negamax with iterative deepening, a quiescence search
//! over captures and promotions at the horizon, killer-move ordering, and
//! draw detection for the fifty-move rule and repetitions. The
//! transposition table is written at every node but only consulted at the
//! root, so within a single iteration the value of a node depends only on
//! its subtree.
//!
//! Scores are from the side to move. Mate scores are offset by the ply
//! they were found at, so a faster mate always scores higher.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::board::movegen::generate_legal;
use crate::board::Board;
use crate::core::piece_move::Move;
use crate::core::Player;
use crate::tools::eval::eval_board;
use crate::tools::tt::{NodeBound, TranspositionTable};

use super::history::PositionHistory;
use super::ordering::{is_noisy, order_moves, order_noisy_moves, KillerTable};

/// Score of delivering checkmate at the root.
pub const MATE: i32 = 32_000;
/// Scores at or beyond this are mates; iterative deepening stops early.
pub const MATE_THRESHOLD: i32 = 31_000;
/// Window bound strictly outside every reachable score.
pub const INF: i32 = 32_500;
pub const DRAW: i32 = 0;
/// Hard cap on the main-search depth.
pub const MAX_PLY: usize = 32;

/// One search's worth of state: the position being searched, the shared
/// table and stop flag, and the per-search heuristics.
pub struct SearchContext {
    board: Board,
    tt: Arc<TranspositionTable>,
    stop: Arc<AtomicBool>,
    killers: KillerTable,
    history: PositionHistory,
    root_best: Move,
    pub nodes: u64,
}

impl SearchContext {
    /// `history` holds the keys of the game positions *before* the one in
    /// `board`; the current key is appended here.
    pub fn new(
        board: Board,
        tt: Arc<TranspositionTable>,
        stop: Arc<AtomicBool>,
        mut history: PositionHistory,
    ) -> SearchContext {
        history.push(board.zobrist());
        SearchContext {
            board,
            tt,
            stop,
            killers: KillerTable::new(),
            history,
            root_best: Move::NULL,
            nodes: 0,
        }
    }

    /// Searches depth 1, 2, ... up to `max_depth`, reporting each finished
    /// iteration, and returns the best move found.
    ///
    /// A cancelled iteration is discarded; the move from the last complete
    /// one stands. If not even depth 1 completed, the first legal move is
    /// returned so the engine never forfeits.
    pub fn iterative_deepening<F>(&mut self, max_depth: u16, mut on_depth: F) -> Move
    where
        F: FnMut(u16, i32, Move),
    {
        let max_depth = max_depth.max(1).min(MAX_PLY as u16);
        let mut best = Move::NULL;
        for depth in 1..=max_depth {
            self.root_best = Move::NULL;
            let eval = self.alpha_beta(depth, 0, -INF, INF);
            if self.stop.load(Ordering::Relaxed) {
                break;
            }
            if !self.root_best.is_null() {
                best = self.root_best;
            }
            on_depth(depth, eval, best);
            if eval.abs() >= MATE_THRESHOLD {
                break;
            }
        }
        if best.is_null() {
            let moves = self.board.generate_moves();
            if !moves.is_empty() {
                best = moves[0];
            }
        }
        best
    }

    fn alpha_beta(&mut self, depth: u16, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        if self.stop.load(Ordering::Relaxed) {
            return 0;
        }
        self.nodes += 1;

        if ply > 0 {
            if self.board.rule_50() >= 100 {
                return DRAW;
            }
            if self.history.repeated(self.board.rule_50()) {
                return DRAW;
            }
        } else if let Some(entry) = self.tt.probe(self.board.zobrist()) {
            if entry.depth as u16 >= depth && !entry.best_move.is_null() {
                let usable = match entry.bound {
                    NodeBound::Exact => true,
                    NodeBound::UpperBound => entry.evaluation <= alpha,
                    NodeBound::LowerBound => entry.evaluation >= beta,
                    NodeBound::Failed => false,
                };
                if usable {
                    self.root_best = entry.best_move;
                    return entry.evaluation;
                }
            }
        }

        if depth == 0 {
            return self.quiescence(ply, alpha, beta);
        }

        let (moves, in_check) = generate_legal(&self.board);
        if moves.is_empty() {
            return if in_check { -(MATE - ply as i32) } else { DRAW };
        }

        let key = self.board.zobrist();
        let ordered = order_moves(&self.board, &moves, &self.killers, ply);
        let mut best_move = Move::NULL;
        let mut bound = NodeBound::UpperBound;

        for scored in ordered.iter() {
            let mv = scored.mv;
            let prior = self.board.make_move(mv);
            self.history.push(self.board.zobrist());
            let score = -self.alpha_beta(depth - 1, ply + 1, -beta, -alpha);
            self.history.pop();
            self.board.unmake_move(mv, prior);

            if self.stop.load(Ordering::Relaxed) {
                return 0;
            }
            if score >= beta {
                if !is_noisy(&self.board, mv) {
                    self.killers.store(ply, mv);
                }
                self.tt.store(key, beta, mv, depth as u8, NodeBound::LowerBound);
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = mv;
                bound = NodeBound::Exact;
                if ply == 0 {
                    self.root_best = mv;
                }
            }
        }

        self.tt.store(key, alpha, best_move, depth as u8, bound);
        alpha
    }

    /// Resolves captures and promotions until the position is quiet, with
    /// the static evaluation as the standing-pat floor.
    fn quiescence(&mut self, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let stand_pat = self.eval();
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if ply >= 2 * MAX_PLY {
            return alpha;
        }

        let moves = self.board.generate_moves();
        for scored in order_noisy_moves(&self.board, &moves).iter() {
            let mv = scored.mv;
            let prior = self.board.make_move(mv);
            let score = -self.quiescence(ply + 1, -beta, -alpha);
            self.board.unmake_move(mv, prior);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    /// Static evaluation from the side to move.
    fn eval(&self) -> i32 {
        let score = eval_board(&self.board);
        if self.board.turn() == Player::Black {
            -score
        } else {
            score
        }
    }
}
