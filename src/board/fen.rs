//! FEN parsing and serialization for [`Board`].
//!
//! [`Board`]: ../struct.Board.html

use std::fmt;

use super::Board;
use crate::core::sq::{NO_SQ, SQ};
use crate::core::{Piece, PieceType, Player, ALL_PLAYERS};

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Why a FEN string failed to build a [`Board`].
///
/// [`Board`]: ../struct.Board.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenBuildError {
    /// The string ended before all required fields were seen.
    Incomplete,
    /// The placement field did not describe exactly eight ranks.
    WrongRankCount { count: usize },
    /// A rank described more or fewer than eight squares.
    BadRankWidth { rank: u8 },
    /// A placement character was not a piece letter or a digit.
    UnrecognizedPiece { c: char },
    /// The side-to-move field was not `w` or `b`.
    IllegalSide { s: String },
    /// The castling field held a character other than `KQkq-`.
    BadCastlingChar { c: char },
    /// The en-passant field was not `-` or a square.
    BadEnPassant { s: String },
    /// A move counter failed to parse as a number.
    BadCounter { s: String },
    /// A side had zero or multiple kings.
    WrongKingCount { player: Player, count: u8 },
    /// A pawn stood on its promotion or back rank.
    PawnOnBackRank,
}

impl fmt::Display for FenBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenBuildError::Incomplete => write!(f, "fen ended early"),
            FenBuildError::WrongRankCount { count } => {
                write!(f, "fen placement has {} ranks, expected 8", count)
            }
            FenBuildError::BadRankWidth { rank } => {
                write!(f, "fen rank {} does not cover 8 squares", rank)
            }
            FenBuildError::UnrecognizedPiece { c } => {
                write!(f, "unrecognized piece character {:?}", c)
            }
            FenBuildError::IllegalSide { s } => write!(f, "illegal side to move {:?}", s),
            FenBuildError::BadCastlingChar { c } => {
                write!(f, "illegal castling character {:?}", c)
            }
            FenBuildError::BadEnPassant { s } => write!(f, "bad en-passant square {:?}", s),
            FenBuildError::BadCounter { s } => write!(f, "bad move counter {:?}", s),
            FenBuildError::WrongKingCount { player, count } => {
                write!(f, "{} has {} kings", player, count)
            }
            FenBuildError::PawnOnBackRank => write!(f, "pawn on a back rank"),
        }
    }
}

impl std::error::Error for FenBuildError {}

impl Board {
    /// Builds a board from a FEN string.
    ///
    /// The halfmove and fullmove counters may be omitted and default to
    /// `0` and `1`. The en-passant field is accepted but silently dropped
    /// when no capture on that square is actually possible, so the hash of
    /// the resulting position matches one reached move by move.
    pub fn from_fen(fen: &str) -> Result<Board, FenBuildError> {
        let mut board = Board::blank();
        let mut fields = fen.split_whitespace();

        let placement = fields.next().ok_or(FenBuildError::Incomplete)?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenBuildError::WrongRankCount { count: ranks.len() });
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u8 = 0;
            for c in rank_str.chars() {
                if let Some(d) = c.to_digit(10) {
                    file += d as u8;
                } else {
                    let piece = Piece::from_char(c)
                        .ok_or(FenBuildError::UnrecognizedPiece { c })?;
                    if file >= 8 {
                        return Err(FenBuildError::BadRankWidth { rank: rank + 1 });
                    }
                    board.put_piece(piece, SQ(rank * 8 + file));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenBuildError::BadRankWidth { rank: rank + 1 });
            }
        }

        let side = fields.next().ok_or(FenBuildError::Incomplete)?;
        match side {
            "w" => board.set_turn(Player::White),
            "b" => board.set_turn(Player::Black),
            _ => return Err(FenBuildError::IllegalSide { s: side.to_owned() }),
        }

        let castling = fields.next().ok_or(FenBuildError::Incomplete)?;
        for c in castling.chars() {
            if !board.state_mut().castling.add_castling_char(c) {
                return Err(FenBuildError::BadCastlingChar { c });
            }
        }

        let ep = fields.next().ok_or(FenBuildError::Incomplete)?;
        board.state_mut().ep_square = if ep == "-" {
            NO_SQ
        } else {
            SQ::from_str(ep).ok_or_else(|| FenBuildError::BadEnPassant { s: ep.to_owned() })?
        };

        board.state_mut().rule_50 = match fields.next() {
            Some(s) => s
                .parse()
                .map_err(|_| FenBuildError::BadCounter { s: s.to_owned() })?,
            None => 0,
        };
        board.state_mut().fullmove = match fields.next() {
            Some(s) => s
                .parse()
                .map_err(|_| FenBuildError::BadCounter { s: s.to_owned() })?,
            None => 1,
        };

        for &player in ALL_PLAYERS.iter() {
            let kings = board.count_piece(player, PieceType::K);
            if kings != 1 {
                return Err(FenBuildError::WrongKingCount {
                    player,
                    count: kings,
                });
            }
        }
        let pawns = board.piece_bb_both_players(PieceType::P);
        if ((pawns & crate::core::bitboard::BitBoard::RANK_1)
            | (pawns & crate::core::bitboard::BitBoard::RANK_8))
            .is_not_empty()
        {
            return Err(FenBuildError::PawnOnBackRank);
        }

        board.validate_ep();
        let zobrist = board.compute_zobrist();
        board.state_mut().zobrist = zobrist;
        Ok(board)
    }

    /// Serializes the position back into FEN.
    pub fn fen(&self) -> String {
        let mut s = String::with_capacity(64);
        for rank in (0..8u8).rev() {
            let mut empties = 0;
            for file in 0..8u8 {
                let piece = self.piece_at_sq(SQ(rank * 8 + file));
                if piece == Piece::None {
                    empties += 1;
                } else {
                    if empties > 0 {
                        s.push((b'0' + empties) as char);
                        empties = 0;
                    }
                    s.push(piece.char());
                }
            }
            if empties > 0 {
                s.push((b'0' + empties) as char);
            }
            if rank > 0 {
                s.push('/');
            }
        }
        s.push(' ');
        s.push(if self.turn() == Player::White { 'w' } else { 'b' });
        s.push(' ');
        s.push_str(&self.castling().pretty_string());
        s.push(' ');
        if self.ep_square() == NO_SQ {
            s.push('-');
        } else {
            s.push_str(&self.ep_square().to_string());
        }
        s.push(' ');
        s.push_str(&self.rule_50().to_string());
        s.push(' ');
        s.push_str(&self.state().fullmove.to_string());
        s
    }
}
