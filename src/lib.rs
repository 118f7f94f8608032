//! Petrel, a UCI chess engine library.
//!
//! The crate splits into a board layer and an engine layer. The board
//! layer ([`core`], [`helper`], and [`board`]) provides bitboards,
//! magic-table attack lookups, Zobrist hashing, FEN handling, and strictly
//! legal move generation with reversible make/unmake. The engine layer
//! ([`tools`], [`engine`], and [`uci`]) adds evaluation, a transposition
//! table, an iterative-deepening alpha-beta search on a worker thread, and
//! the UCI protocol front end.
//!
//! ```
//! use petrel::{Board, Player};
//!
//! let mut board = Board::start_pos();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let prior = board.make_move(moves[0]);
//! assert_eq!(board.turn(), Player::Black);
//! board.unmake_move(moves[0], prior);
//! assert_eq!(board.turn(), Player::White);
//! ```
//!
//! [`core`]: core/index.html
//! [`helper`]: helper/index.html
//! [`board`]: board/index.html
//! [`tools`]: tools/index.html
//! [`engine`]: engine/index.html
//! [`uci`]: uci/index.html

#[macro_use]
extern crate bitflags;

pub mod core;

pub mod board;
pub mod engine;
pub mod helper;
pub mod tools;
pub mod uci;

pub use crate::board::fen::FenBuildError;
pub use crate::board::Board;
pub use crate::core::bitboard::BitBoard;
pub use crate::core::move_list::MoveList;
pub use crate::core::piece_move::{Move, MoveKind};
pub use crate::core::sq::{NO_SQ, SQ};
pub use crate::core::{CastleType, File, Piece, PieceType, Player, Rank};
pub use crate::helper::prelude::init_tables;
