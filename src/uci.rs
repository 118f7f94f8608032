//! The UCI front end.
//!
//! One thread reads stdin, the search worker reports through the engine
//! channel, and both feed a single event loop here, so a `stop` arriving
//! mid-search is handled the moment it is typed. Every UCI command has a
//! single-letter alias for driving the engine by hand.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, SyncSender};
use std::thread;

use crate::board::Board;
use crate::core::piece_move::Move;
use crate::engine::history::PositionHistory;
use crate::engine::search::{MATE, MATE_THRESHOLD};
use crate::engine::time::Limits;
use crate::engine::{SearchReport, Searcher};
use crate::tools::eval::eval_board;
use crate::tools::tt::{MAX_TT_SIZE_MB, MIN_TT_SIZE_MB};

const DEFAULT_TT_MB: usize = 16;

enum Event {
    Line(String),
    Report(SearchReport),
    Eof,
}

/// Runs the UCI loop until `quit` or end of input.
pub fn run() {
    let (event_tx, event_rx) = mpsc::sync_channel::<Event>(256);

    let stdin_tx = event_tx.clone();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if stdin_tx.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = stdin_tx.send(Event::Eof);
    });

    // search reports funnel into the same event loop
    let (report_tx, report_rx) = mpsc::sync_channel::<SearchReport>(256);
    thread::spawn(move || {
        for report in report_rx {
            if event_tx.send(Event::Report(report)).is_err() {
                return;
            }
        }
    });

    let mut state = UciState::new(report_tx);
    loop {
        match event_rx.recv() {
            Ok(Event::Line(line)) => {
                if !state.handle_line(&line) {
                    break;
                }
            }
            Ok(Event::Report(report)) => print_report(report),
            Ok(Event::Eof) | Err(_) => break,
        }
    }
    state.searcher.stop_search();
}

struct UciState {
    searcher: Searcher,
    board: Board,
    /// Zobrist keys of every game position before the current one.
    game_keys: Vec<u64>,
    report_tx: SyncSender<SearchReport>,
}

impl UciState {
    fn new(report_tx: SyncSender<SearchReport>) -> UciState {
        UciState {
            searcher: Searcher::new(DEFAULT_TT_MB),
            board: Board::start_pos(),
            game_keys: Vec::new(),
            report_tx,
        }
    }

    /// Dispatches one command line; returns false on `quit`.
    fn handle_line(&mut self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = tokens.split_first() else {
            return true;
        };
        match cmd {
            "uci" => self.cmd_uci(),
            "isready" => println_flushed("readyok"),
            "ucinewgame" => self.cmd_new_game(),
            "setoption" => self.cmd_setoption(args),
            "position" | "p" => {
                if let Err(msg) = self.set_position(args) {
                    println_flushed(&format!("info string {}", msg));
                }
            }
            "go" | "g" => self.cmd_go(args),
            "stop" | "s" => self.searcher.stop_search(),
            "eval" | "e" => {
                println_flushed(&format!("eval: {} cp (white)", eval_board(&self.board)))
            }
            "d" => println_flushed(&format!("{}", self.board)),
            "help" | "h" => self.cmd_help(),
            "quit" | "q" => return false,
            _ => println_flushed(&format!("unknown command: {}", cmd)),
        }
        true
    }

    fn cmd_uci(&self) {
        println!("id name Petrel {}", env!("CARGO_PKG_VERSION"));
        println!("id author the Petrel developers");
        println!(
            "option name Hash type spin default {} min {} max {}",
            DEFAULT_TT_MB, MIN_TT_SIZE_MB, MAX_TT_SIZE_MB
        );
        println_flushed("uciok");
    }

    fn cmd_new_game(&mut self) {
        self.searcher.stop_search();
        self.searcher.tt().clear();
        self.board = Board::start_pos();
        self.game_keys.clear();
    }

    fn cmd_setoption(&mut self, args: &[&str]) {
        // setoption name Hash value <mb>
        let mut name = None;
        let mut value = None;
        let mut iter = args.iter();
        while let Some(&token) = iter.next() {
            match token {
                "name" => name = iter.next().copied(),
                "value" => value = iter.next().copied(),
                _ => {}
            }
        }
        if let (Some(name), Some(value)) = (name, value) {
            if name.eq_ignore_ascii_case("hash") {
                if let Ok(mb) = value.parse::<usize>() {
                    // the worker must not be probing the table while its
                    // backing allocation is replaced
                    self.searcher.stop_search();
                    self.searcher.tt().resize(mb);
                }
            }
        }
    }

    fn set_position(&mut self, args: &[&str]) -> Result<(), String> {
        let mut board;
        let moves_at = args.iter().position(|&t| t == "moves");
        let setup = &args[..moves_at.unwrap_or(args.len())];

        match setup.first() {
            Some(&"startpos") => board = Board::start_pos(),
            Some(&"fen") => {
                let fen = setup[1..].join(" ");
                board = Board::from_fen(&fen).map_err(|e| e.to_string())?;
            }
            _ => return Err("position needs startpos or fen".to_owned()),
        }

        let mut keys = Vec::new();
        if let Some(at) = moves_at {
            for text in &args[at + 1..] {
                let mv = find_uci_move(&board, text)
                    .ok_or_else(|| format!("illegal move {}", text))?;
                keys.push(board.zobrist());
                board.make_move(mv);
            }
        }
        self.board = board;
        self.game_keys = keys;
        Ok(())
    }

    fn cmd_go(&mut self, args: &[&str]) {
        let limits = parse_go(args);
        self.searcher.start_search(
            self.board.clone(),
            PositionHistory::seeded(&self.game_keys),
            limits,
            self.report_tx.clone(),
        );
    }

    fn cmd_help(&self) {
        let text = "\
commands (single-letter aliases in parentheses):
  uci                 identify the engine and list options
  isready             handshake; answers readyok
  ucinewgame          reset the table and the position
  position (p)        position [startpos | fen <fen>] [moves <m1> ...]
  go (g)              go [depth N | movetime MS | wtime MS btime MS ...]
  stop (s)            stop the running search and report its best move
  eval (e)            static evaluation of the current position
  d                   draw the current position
  quit (q)            exit";
        println_flushed(text);
    }
}

/// Matches a move in UCI notation against the legal moves of a position.
fn find_uci_move(board: &Board, text: &str) -> Option<Move> {
    board
        .generate_moves()
        .iter()
        .copied()
        .find(|m| m.to_string() == text)
}

fn parse_go(args: &[&str]) -> Limits {
    let mut limits = Limits::default();
    let mut iter = args.iter();
    while let Some(&token) = iter.next() {
        match token {
            "infinite" => limits.infinite = true,
            "depth" | "movetime" | "wtime" | "btime" | "winc" | "binc" => {
                let value: Option<u64> = iter.next().and_then(|v| v.parse().ok());
                match token {
                    "depth" => limits.depth = value.map(|v| v as u16),
                    "movetime" => limits.move_time = value,
                    "wtime" => limits.white_time = value,
                    "btime" => limits.black_time = value,
                    "winc" => limits.white_inc = value,
                    _ => limits.black_inc = value,
                }
            }
            // movestogo, nodes, mate and friends are accepted but unused
            _ => {}
        }
    }
    limits
}

fn print_report(report: SearchReport) {
    match report {
        SearchReport::Depth {
            depth,
            eval,
            best_move,
        } => {
            let score = if eval.abs() >= MATE_THRESHOLD {
                let plies = MATE - eval.abs();
                let moves = (plies + 1) / 2;
                format!("score mate {}", if eval > 0 { moves } else { -moves })
            } else {
                format!("score cp {}", eval)
            };
            println_flushed(&format!("info depth {} {} pv {}", depth, score, best_move));
        }
        SearchReport::BestMove { best, ponder } => {
            if ponder.is_null() {
                println_flushed(&format!("bestmove {}", best));
            } else {
                println_flushed(&format!("bestmove {} ponder {}", best, ponder));
            }
        }
    }
}

fn println_flushed(s: &str) {
    println!("{}", s);
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn state() -> UciState {
        // the receiver is dropped; none of these tests launch a search
        let (tx, _rx) = mpsc::sync_channel(16);
        UciState::new(tx)
    }

    #[test]
    fn position_startpos_with_moves() {
        let mut state = state();
        state
            .set_position(&["startpos", "moves", "e2e4", "e7e5", "g1f3"])
            .unwrap();
        assert_eq!(state.game_keys.len(), 3);
        assert!(state.board.fen().starts_with("rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b"));
    }

    #[test]
    fn position_from_fen() {
        let mut state = state();
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let mut args = vec!["fen"];
        args.extend(fen.split(' '));
        state.set_position(&args).unwrap();
        assert_eq!(state.board.fen(), fen);
        assert!(state.game_keys.is_empty());
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut state = state();
        let err = state
            .set_position(&["startpos", "moves", "e2e5"])
            .unwrap_err();
        assert!(err.contains("e2e5"));
        // the old position survives a failed command
        assert_eq!(state.board.fen(), crate::board::fen::START_FEN);
    }

    #[test]
    fn go_parsing() {
        let limits = parse_go(&["depth", "6"]);
        assert_eq!(limits.depth, Some(6));

        let limits = parse_go(&["movetime", "1500"]);
        assert_eq!(limits.move_time, Some(1_500));

        let limits = parse_go(&["wtime", "60000", "btime", "45000", "winc", "500", "binc", "500"]);
        assert_eq!(limits.white_time, Some(60_000));
        assert_eq!(limits.black_time, Some(45_000));
        assert_eq!(limits.white_inc, Some(500));

        let limits = parse_go(&["infinite"]);
        assert!(limits.infinite);

        assert_eq!(parse_go(&[]), Limits::default());
    }

    #[test]
    fn hash_resize_stops_a_running_search() {
        let (tx, rx) = mpsc::sync_channel(64);
        let mut state = UciState::new(tx);
        state.cmd_go(&["infinite"]);
        std::thread::sleep(std::time::Duration::from_millis(50));

        state.cmd_setoption(&["name", "Hash", "value", "32"]);
        assert_eq!(state.searcher.tt().num_entries(), 32 * 1024 * 1024 / 16);

        // the worker was joined before the reallocation, so its final
        // report is already in the channel
        let mut saw_best_move = false;
        while let Ok(report) = rx.try_recv() {
            if let SearchReport::BestMove { best, .. } = report {
                assert!(!best.is_null());
                saw_best_move = true;
            }
        }
        assert!(saw_best_move);
    }

    #[test]
    fn castling_and_promotion_moves_parse() {
        let mut state = state();
        state
            .set_position(&[
                "fen", "r3k2r/8/8/8/8/8/8/R3K2R", "w", "KQkq", "-", "0", "1", "moves", "e1g1",
            ])
            .unwrap();
        assert!(state.board.fen().starts_with("r3k2r/8/8/8/8/8/8/R4RK1 b"));
    }
}
