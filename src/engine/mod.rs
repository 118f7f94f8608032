//! The engine: a search running on its own thread, reporting through a
//! channel.
//!
//! A [`Searcher`] owns the transposition table and the stop flag. Each
//! `go` clones the position onto a fresh worker thread; the worker streams
//! one [`SearchReport::Depth`] per finished iteration and ends with a
//! [`SearchReport::BestMove`]. A timer thread, armed only when the limits
//! imply a wall-clock budget, flips the stop flag when time is up; the
//! flag is replaced for every search so a stale timer can never cancel a
//! later one.
//!
//! [`Searcher`]: struct.Searcher.html
//! [`SearchReport::Depth`]: enum.SearchReport.html
//! [`SearchReport::BestMove`]: enum.SearchReport.html

pub mod history;
pub mod ordering;
pub mod search;
pub mod time;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::board::Board;
use crate::core::piece_move::Move;
use crate::tools::tt::TranspositionTable;

use self::history::PositionHistory;
use self::search::{SearchContext, MAX_PLY};
use self::time::{think_time, Limits};

/// Messages a running search sends back to its owner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchReport {
    /// An iteration finished at `depth` with the given score and move.
    Depth {
        depth: u16,
        eval: i32,
        best_move: Move,
    },
    /// The search is over. `ponder` is the expected reply, or null.
    BestMove { best: Move, ponder: Move },
}

/// Owns the searching thread and everything shared with it.
pub struct Searcher {
    tt: Arc<TranspositionTable>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Searcher {
    pub fn new(tt_mb: usize) -> Searcher {
        Searcher {
            tt: Arc::new(TranspositionTable::new(tt_mb)),
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// The shared transposition table, for resizing and clearing between
    /// searches.
    pub fn tt(&self) -> &Arc<TranspositionTable> {
        &self.tt
    }

    /// Launches a search of `board` on a worker thread.
    ///
    /// `history` carries the keys of the game so far, excluding `board`
    /// itself. Any search still running is stopped and joined first, so at
    /// most one search ever touches the table.
    pub fn start_search(
        &mut self,
        board: Board,
        history: PositionHistory,
        limits: Limits,
        reporter: SyncSender<SearchReport>,
    ) {
        self.stop_search();

        let stop = Arc::new(AtomicBool::new(false));
        self.stop = Arc::clone(&stop);

        if let Some(budget) = think_time(&limits, board.turn()) {
            let timer_stop = Arc::clone(&stop);
            thread::spawn(move || {
                thread::sleep(budget);
                timer_stop.store(true, Ordering::Relaxed);
            });
        }

        let tt = Arc::clone(&self.tt);
        let max_depth = limits.depth.unwrap_or(MAX_PLY as u16);
        self.handle = Some(thread::spawn(move || {
            let mut ctx = SearchContext::new(board.clone(), Arc::clone(&tt), stop, history);
            let depth_reporter = reporter.clone();
            let best = ctx.iterative_deepening(max_depth, |depth, eval, best_move| {
                let _ = depth_reporter.send(SearchReport::Depth {
                    depth,
                    eval,
                    best_move,
                });
            });
            let ponder = ponder_move(board, best, &tt);
            let _ = reporter.send(SearchReport::BestMove { best, ponder });
        }));
    }

    /// Tells the current search to stop and waits for it to finish. A
    /// no-op when nothing is running.
    pub fn stop_search(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Searcher {
    fn drop(&mut self) {
        self.stop_search();
    }
}

/// The reply to ponder on: the table's best answer to our move, if it is
/// actually legal there.
fn ponder_move(mut board: Board, best: Move, tt: &TranspositionTable) -> Move {
    if best.is_null() {
        return Move::NULL;
    }
    board.make_move(best);
    if let Some(entry) = tt.probe(board.zobrist()) {
        let reply = entry.best_move;
        if !reply.is_null() && board.generate_moves().iter().any(|m| *m == reply) {
            return reply;
        }
    }
    Move::NULL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn depth_limited_search_reports_and_finishes() {
        let mut searcher = Searcher::new(1);
        let (tx, rx) = mpsc::sync_channel(64);
        searcher.start_search(
            Board::start_pos(),
            PositionHistory::new(),
            Limits::depth(4),
            tx,
        );

        let mut depths = Vec::new();
        let mut final_best = Move::NULL;
        loop {
            match rx.recv_timeout(Duration::from_secs(60)).unwrap() {
                SearchReport::Depth { depth, best_move, .. } => {
                    depths.push(depth);
                    assert!(!best_move.is_null());
                }
                SearchReport::BestMove { best, .. } => {
                    final_best = best;
                    break;
                }
            }
        }
        assert_eq!(depths, vec![1, 2, 3, 4]);
        assert!(Board::start_pos()
            .generate_moves()
            .iter()
            .any(|m| *m == final_best));
        searcher.stop_search();
    }

    #[test]
    fn stop_cuts_an_infinite_search_short() {
        let mut searcher = Searcher::new(1);
        let (tx, rx) = mpsc::sync_channel(64);
        searcher.start_search(
            Board::start_pos(),
            PositionHistory::new(),
            Limits::infinite(),
            tx,
        );
        thread::sleep(Duration::from_millis(100));
        searcher.stop_search();

        let mut saw_best_move = false;
        while let Ok(report) = rx.try_recv() {
            if let SearchReport::BestMove { best, .. } = report {
                saw_best_move = true;
                assert!(!best.is_null());
            }
        }
        assert!(saw_best_move);
    }

    #[test]
    fn movetime_stops_on_its_own() {
        let mut searcher = Searcher::new(1);
        let (tx, rx) = mpsc::sync_channel(64);
        let limits = Limits {
            move_time: Some(200),
            ..Limits::default()
        };
        searcher.start_search(Board::start_pos(), PositionHistory::new(), limits, tx);

        let deadline = Duration::from_secs(30);
        loop {
            match rx.recv_timeout(deadline).unwrap() {
                SearchReport::BestMove { best, .. } => {
                    assert!(!best.is_null());
                    break;
                }
                SearchReport::Depth { .. } => {}
            }
        }
    }

    #[test]
    fn ponder_follows_from_the_table() {
        let mut searcher = Searcher::new(1);
        let (tx, rx) = mpsc::sync_channel(64);
        searcher.start_search(
            Board::start_pos(),
            PositionHistory::new(),
            Limits::depth(5),
            tx,
        );
        let mut ponder = Move::NULL;
        let mut best = Move::NULL;
        while let Ok(report) = rx.recv_timeout(Duration::from_secs(60)) {
            if let SearchReport::BestMove { best: b, ponder: p } = report {
                best = b;
                ponder = p;
                break;
            }
        }
        if !ponder.is_null() {
            let mut board = Board::start_pos();
            board.make_move(best);
            assert!(board.generate_moves().iter().any(|m| *m == ponder));
        }
    }
}
