//! The position model: piece placement, game metadata, and move
//! make/unmake.
//!
//! A [`Board`] keeps three synchronized views of the placement: one
//! bitboard per (player, piece type) identity, per-player occupancy
//! unions, and a 64-entry mailbox array. Every mutation goes through
//! [`put_piece`]/[`remove_piece`], which keep all three views and the
//! per-piece counts consistent and fold the moved piece into the Zobrist
//! hash.
//!
//! Moves are applied in place. [`make_move`] returns the [`GameState`]
//! snapshot from just before the move, and [`unmake_move`] requires that
//! exact snapshot back; calls must nest like stack frames. Passing a move
//! that is not legal in the current position is a contract violation
//! checked only by debug assertions.
//!
//! [`Board`]: struct.Board.html
//! [`put_piece`]: struct.Board.html#method.put_piece
//! [`remove_piece`]: struct.Board.html#method.remove_piece
//! [`make_move`]: struct.Board.html#method.make_move
//! [`unmake_move`]: struct.Board.html#method.unmake_move
//! [`GameState`]: state/struct.GameState.html

pub mod castle_rights;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod state;

use std::cell::Cell;
use std::fmt;

use crate::core::bitboard::BitBoard;
use crate::core::masks::*;
use crate::core::move_list::MoveList;
use crate::core::piece_move::{Move, MoveKind};
use crate::core::sq::{NO_SQ, SQ};
use crate::core::{CastleType, Piece, PieceType, Player};
use crate::helper::prelude::*;

use self::castle_rights::Castling;
use self::state::GameState;

/// A chess position, mutable in place through strict make/unmake pairing.
#[derive(Clone)]
pub struct Board {
    bbs: [BitBoard; PIECE_CNT],
    bbs_player: [BitBoard; PLAYER_CNT],
    occ: BitBoard,
    mailbox: [Piece; SQ_CNT],
    piece_counts: [u8; PIECE_CNT],
    turn: Player,
    state: GameState,
    // lazily rebuilt per-player attack masks; invalidated, never eagerly
    // recomputed, by every placement change
    attack_cache: Cell<[u64; PLAYER_CNT]>,
    attack_cache_dirty: Cell<bool>,
}

impl Board {
    /// An empty board with no pieces, white to move, and no rights.
    pub fn blank() -> Board {
        init_tables();
        Board {
            bbs: [BitBoard::EMPTY; PIECE_CNT],
            bbs_player: [BitBoard::EMPTY; PLAYER_CNT],
            occ: BitBoard::EMPTY,
            mailbox: [Piece::None; SQ_CNT],
            piece_counts: [0; PIECE_CNT],
            turn: Player::White,
            state: GameState::blank(),
            attack_cache: Cell::new([0; PLAYER_CNT]),
            attack_cache_dirty: Cell::new(true),
        }
    }

    /// The standard chess starting position.
    pub fn start_pos() -> Board {
        Board::from_fen(fen::START_FEN).expect("the start position FEN parses")
    }

    // ------------------------------------------------------------------
    // accessors

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Bitboard of all occupied squares.
    #[inline(always)]
    pub fn occupied(&self) -> BitBoard {
        self.occ
    }

    /// Bitboard of the squares occupied by one player.
    #[inline(always)]
    pub fn get_occupied_player(&self, player: Player) -> BitBoard {
        self.bbs_player[player as usize]
    }

    /// Bitboard of one player's pieces of one type.
    #[inline(always)]
    pub fn piece_bb(&self, player: Player, pt: PieceType) -> BitBoard {
        self.bbs[Piece::make(player, pt) as usize]
    }

    /// Bitboard of a piece type for both players combined.
    #[inline(always)]
    pub fn piece_bb_both_players(&self, pt: PieceType) -> BitBoard {
        self.piece_bb(Player::White, pt) | self.piece_bb(Player::Black, pt)
    }

    /// The piece standing on a square, or `Piece::None`.
    #[inline(always)]
    pub fn piece_at_sq(&self, sq: SQ) -> Piece {
        debug_assert!(sq.is_okay());
        self.mailbox[sq.0 as usize]
    }

    /// Number of pieces of a given identity on the board.
    #[inline(always)]
    pub fn count_piece(&self, player: Player, pt: PieceType) -> u8 {
        self.piece_counts[Piece::make(player, pt) as usize]
    }

    /// The square of a player's king.
    #[inline(always)]
    pub fn king_sq(&self, player: Player) -> SQ {
        self.piece_bb(player, PieceType::K).to_sq()
    }

    /// The current metadata snapshot.
    #[inline(always)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The Zobrist hash of the position.
    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.state.zobrist
    }

    /// The en-passant target square, or `NO_SQ`.
    #[inline(always)]
    pub fn ep_square(&self) -> SQ {
        self.state.ep_square
    }

    /// Plies since the last capture or pawn move.
    #[inline(always)]
    pub fn rule_50(&self) -> u16 {
        self.state.rule_50
    }

    /// The castling rights remaining for both players.
    #[inline(always)]
    pub fn castling(&self) -> Castling {
        self.state.castling
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        (self.attackers_to(self.king_sq(self.turn), self.occ)
            & self.get_occupied_player(!self.turn))
        .is_not_empty()
    }

    /// Bitboard of the pieces of either player attacking a square, given
    /// an occupancy.
    pub fn attackers_to(&self, sq: SQ, occ: BitBoard) -> BitBoard {
        (BitBoard(pawn_attacks_from(sq, Player::Black)) & self.piece_bb(Player::White, PieceType::P))
            | (BitBoard(pawn_attacks_from(sq, Player::White))
                & self.piece_bb(Player::Black, PieceType::P))
            | (BitBoard(knight_moves(sq)) & self.piece_bb_both_players(PieceType::N))
            | (BitBoard(king_moves(sq)) & self.piece_bb_both_players(PieceType::K))
            | (BitBoard(rook_attacks(occ.0, sq.0))
                & (self.piece_bb_both_players(PieceType::R)
                    | self.piece_bb_both_players(PieceType::Q)))
            | (BitBoard(bishop_attacks(occ.0, sq.0))
                & (self.piece_bb_both_players(PieceType::B)
                    | self.piece_bb_both_players(PieceType::Q)))
    }

    /// All squares attacked by one player, rebuilt on demand after a
    /// placement change.
    pub fn attacks_by(&self, player: Player) -> BitBoard {
        if self.attack_cache_dirty.get() {
            self.attack_cache.set([
                self.compute_attacks(Player::White),
                self.compute_attacks(Player::Black),
            ]);
            self.attack_cache_dirty.set(false);
        }
        BitBoard(self.attack_cache.get()[player as usize])
    }

    fn compute_attacks(&self, player: Player) -> u64 {
        let occ = self.occ.0;
        let mut attacks: u64 = 0;
        for sq in self.piece_bb(player, PieceType::P) {
            attacks |= pawn_attacks_from(sq, player);
        }
        for sq in self.piece_bb(player, PieceType::N) {
            attacks |= knight_moves(sq);
        }
        for sq in self.piece_bb(player, PieceType::B) | self.piece_bb(player, PieceType::Q) {
            attacks |= bishop_attacks(occ, sq.0);
        }
        for sq in self.piece_bb(player, PieceType::R) | self.piece_bb(player, PieceType::Q) {
            attacks |= rook_attacks(occ, sq.0);
        }
        attacks |= king_moves(self.king_sq(player));
        attacks
    }

    /// Generates all legal moves for the side to move.
    #[inline]
    pub fn generate_moves(&self) -> MoveList {
        movegen::generate_legal(self).0
    }

    // ------------------------------------------------------------------
    // placement

    /// Places a piece on an empty square, updating every placement view,
    /// the piece counts, and the hash.
    pub fn put_piece(&mut self, piece: Piece, sq: SQ) {
        debug_assert!(sq.is_okay());
        debug_assert_eq!(self.piece_at_sq(sq), Piece::None);
        debug_assert_ne!(piece, Piece::None);

        let bb = sq.to_bb();
        self.bbs[piece as usize] |= bb;
        self.bbs_player[piece.player_lossy() as usize] |= bb;
        self.occ |= bb;
        self.mailbox[sq.0 as usize] = piece;
        self.piece_counts[piece as usize] += 1;
        self.state.zobrist ^= z_square(sq, piece);
        self.attack_cache_dirty.set(true);
    }

    /// Removes and returns the piece on a square.
    pub fn remove_piece(&mut self, sq: SQ) -> Piece {
        debug_assert!(sq.is_okay());
        let piece = self.piece_at_sq(sq);
        debug_assert_ne!(piece, Piece::None);

        let bb = sq.to_bb();
        self.bbs[piece as usize] ^= bb;
        self.bbs_player[piece.player_lossy() as usize] ^= bb;
        self.occ ^= bb;
        self.mailbox[sq.0 as usize] = Piece::None;
        self.piece_counts[piece as usize] -= 1;
        self.state.zobrist ^= z_square(sq, piece);
        self.attack_cache_dirty.set(true);
        piece
    }

    /// Relocates the piece on `src` to the empty square `dst`.
    #[inline]
    fn move_piece(&mut self, src: SQ, dst: SQ) {
        let piece = self.remove_piece(src);
        self.put_piece(piece, dst);
    }

    // ------------------------------------------------------------------
    // make / unmake

    /// Applies a legal move and returns the metadata snapshot from just
    /// before it, to be passed back to [`unmake_move`].
    ///
    /// Applying a move that is not legal for this position is undefined
    /// behavior from the board's perspective; only debug builds assert.
    ///
    /// [`unmake_move`]: struct.Board.html#method.unmake_move
    pub fn make_move(&mut self, mv: Move) -> GameState {
        debug_assert!(mv.is_valid());
        debug_assert_eq!(self.piece_at_sq(mv.src()).player(), Some(self.turn));

        let prior = self.state;
        let us = self.turn;
        let them = !us;
        let src = mv.src();
        let dst = mv.dst();

        // the old en-passant file leaves the hash no matter what follows
        if prior.ep_square != NO_SQ {
            self.state.zobrist ^= z_ep(prior.ep_square);
        }
        self.state.ep_square = NO_SQ;

        let mut captured = PieceType::None;
        let mut ep_candidate = NO_SQ;

        match mv.kind() {
            MoveKind::Normal => {
                let target = self.piece_at_sq(dst);
                if target != Piece::None {
                    debug_assert_eq!(target.player(), Some(them));
                    captured = target.type_of();
                    self.remove_piece(dst);
                }
                let moved = self.piece_at_sq(src).type_of();
                self.move_piece(src, dst);
                if moved == PieceType::P && src.0.abs_diff(dst.0) == 16 {
                    ep_candidate = SQ((src.0 + dst.0) / 2);
                }
            }
            MoveKind::Promotion => {
                let target = self.piece_at_sq(dst);
                if target != Piece::None {
                    captured = target.type_of();
                    self.remove_piece(dst);
                }
                debug_assert_eq!(self.piece_at_sq(src).type_of(), PieceType::P);
                self.remove_piece(src);
                self.put_piece(Piece::make(us, mv.promo_type()), dst);
            }
            MoveKind::EnPassant => {
                debug_assert_eq!(dst, prior.ep_square);
                let victim_sq = SQ::make(dst.file(), src.rank());
                debug_assert_eq!(
                    self.piece_at_sq(victim_sq),
                    Piece::make(them, PieceType::P)
                );
                self.remove_piece(victim_sq);
                self.move_piece(src, dst);
                captured = PieceType::P;
            }
            MoveKind::Castling => {
                let (rook_src, rook_dst) = match (us, mv.castle_side()) {
                    (Player::White, CastleType::KingSide) => (SQ::H1, SQ::F1),
                    (Player::White, CastleType::QueenSide) => (SQ::A1, SQ::D1),
                    (Player::Black, CastleType::KingSide) => (SQ::H8, SQ::F8),
                    (Player::Black, CastleType::QueenSide) => (SQ::A8, SQ::D8),
                };
                self.move_piece(src, dst);
                self.move_piece(rook_src, rook_dst);
            }
        }

        // fullmove advances after the second side of the ply pair
        if us == Player::Black {
            self.state.fullmove += 1;
        }

        let is_pawn_move = mv.kind() == MoveKind::EnPassant
            || mv.kind() == MoveKind::Promotion
            || self.piece_at_sq(dst).type_of() == PieceType::P;
        if is_pawn_move || captured != PieceType::None {
            self.state.rule_50 = 0;
        } else {
            self.state.rule_50 += 1;
        }

        self.state.zobrist ^= z_side();
        self.turn = them;

        let cleared = self.state.castling.update_for_move(src, dst);
        if cleared != 0 {
            self.state.zobrist ^=
                z_castle(prior.castling.bits()) ^ z_castle(self.state.castling.bits());
        }

        if ep_candidate != NO_SQ && self.ep_is_capturable(ep_candidate, them) {
            self.state.ep_square = ep_candidate;
            self.state.zobrist ^= z_ep(ep_candidate);
        }

        self.state.captured = captured;
        self.attack_cache_dirty.set(true);
        prior
    }

    /// Reverses the most recent [`make_move`], given the snapshot that
    /// call returned.
    ///
    /// [`make_move`]: struct.Board.html#method.make_move
    pub fn unmake_move(&mut self, mv: Move, prior: GameState) {
        debug_assert!(mv.is_valid());
        let us = !self.turn; // the player who made the move
        let them = self.turn;
        let src = mv.src();
        let dst = mv.dst();
        let captured = self.state.captured;

        match mv.kind() {
            MoveKind::Normal => {
                self.move_piece(dst, src);
                if captured != PieceType::None {
                    self.put_piece(Piece::make(them, captured), dst);
                }
            }
            MoveKind::Promotion => {
                self.remove_piece(dst);
                self.put_piece(Piece::make(us, PieceType::P), src);
                if captured != PieceType::None {
                    self.put_piece(Piece::make(them, captured), dst);
                }
            }
            MoveKind::EnPassant => {
                self.move_piece(dst, src);
                let victim_sq = SQ::make(dst.file(), src.rank());
                self.put_piece(Piece::make(them, PieceType::P), victim_sq);
            }
            MoveKind::Castling => {
                let (rook_src, rook_dst) = match (us, mv.castle_side()) {
                    (Player::White, CastleType::KingSide) => (SQ::H1, SQ::F1),
                    (Player::White, CastleType::QueenSide) => (SQ::A1, SQ::D1),
                    (Player::Black, CastleType::KingSide) => (SQ::H8, SQ::F8),
                    (Player::Black, CastleType::QueenSide) => (SQ::A8, SQ::D8),
                };
                self.move_piece(rook_dst, rook_src);
                self.move_piece(dst, src);
            }
        }

        self.turn = us;
        self.state = prior;
        self.attack_cache_dirty.set(true);
    }

    /// The full en-passant capturability test: the double-pushed enemy
    /// pawn stands in front of the target, the target and the square
    /// behind it are empty, and a capturer pawn attacks the target.
    fn ep_is_capturable(&self, ep: SQ, capturer: Player) -> bool {
        let pusher = !capturer;
        let front = ep.offset(pusher.pawn_push());
        let behind = ep.offset(-pusher.pawn_push());
        front.is_okay()
            && behind.is_okay()
            && self.piece_at_sq(front) == Piece::make(pusher, PieceType::P)
            && self.piece_at_sq(ep) == Piece::None
            && self.piece_at_sq(behind) == Piece::None
            && (BitBoard(pawn_attacks_from(ep, pusher))
                & self.piece_bb(capturer, PieceType::P))
            .is_not_empty()
    }

    /// Recomputes the Zobrist hash of the current position from scratch.
    /// The incremental hash must always agree with this.
    pub fn compute_zobrist(&self) -> u64 {
        let mut zobrist: u64 = 0;
        for sq in self.occ {
            zobrist ^= z_square(sq, self.piece_at_sq(sq));
        }
        zobrist ^= z_castle(self.state.castling.bits());
        if self.state.ep_square != NO_SQ {
            zobrist ^= z_ep(self.state.ep_square);
        }
        if self.turn == Player::Black {
            zobrist ^= z_side();
        }
        zobrist
    }

    pub(crate) fn set_turn(&mut self, player: Player) {
        self.turn = player;
    }

    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub(crate) fn validate_ep(&mut self) {
        let ep = self.state.ep_square;
        if ep != NO_SQ && !self.ep_is_capturable(ep, self.turn) {
            self.state.ep_square = NO_SQ;
        }
    }
}

impl fmt::Display for Board {
    /// ASCII diagram of the position, rank 8 at the top, plus the FEN.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let piece = self.mailbox[rank * 8 + file];
                let c = if piece == Piece::None { '.' } else { piece.char() };
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        writeln!(f, "fen: {}", self.fen())
    }
}
