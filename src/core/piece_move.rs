//! The 16-bit move representation.
//!
//! A [`Move`] packs everything needed to apply and reverse it (together
//! with the board it applies to) into one `u16`:
//!
//! ```md
//! bits  0-5:  destination square
//! bits  6-11: origin square
//! bits 12-13: promotion piece selector (0 => N, 1 => B, 2 => R, 3 => Q)
//! bits 14-15: move kind (normal / promotion / en passant / castling)
//! ```
//!
//! A move is valid only if origin and destination differ; the all-zero
//! value doubles as the null move. Captures are not flagged in the move
//! itself, as the destination square's occupancy on the board already
//! answers that.
//!
//! [`Move`]: struct.Move.html

use std::fmt;

use super::sq::SQ;
use super::{CastleType, PieceType, Player};

const DST_MASK: u16 = 0x003F;
const SRC_SHIFT: u16 = 6;
const SRC_MASK: u16 = 0x0FC0;
const PROMO_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

/// The kind of a move, stored in the top two bits.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MoveKind {
    Normal = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// A chess move packed into 16 bits.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq)]
pub struct Move(pub u16);

impl Move {
    /// The null move.
    pub const NULL: Move = Move(0);

    /// Builds a normal move.
    #[inline(always)]
    pub fn new(src: SQ, dst: SQ) -> Move {
        debug_assert!(src.is_okay() && dst.is_okay());
        Move(((src.0 as u16) << SRC_SHIFT) | dst.0 as u16)
    }

    /// Builds a promotion move. `promo` must be one of N, B, R, Q.
    #[inline(always)]
    pub fn new_promotion(src: SQ, dst: SQ, promo: PieceType) -> Move {
        Move(
            Move::new(src, dst).0
                | ((promo.promo_bits() as u16) << PROMO_SHIFT)
                | ((MoveKind::Promotion as u16) << KIND_SHIFT),
        )
    }

    /// Builds an en-passant capture.
    #[inline(always)]
    pub fn new_en_passant(src: SQ, dst: SQ) -> Move {
        Move(Move::new(src, dst).0 | ((MoveKind::EnPassant as u16) << KIND_SHIFT))
    }

    /// Builds one of the four castling moves, encoded as the king's
    /// two-square step.
    #[inline(always)]
    pub fn new_castle(player: Player, side: CastleType) -> Move {
        let (src, dst) = match (player, side) {
            (Player::White, CastleType::KingSide) => (SQ::E1, SQ::G1),
            (Player::White, CastleType::QueenSide) => (SQ::E1, SQ::C1),
            (Player::Black, CastleType::KingSide) => (SQ::E8, SQ::G8),
            (Player::Black, CastleType::QueenSide) => (SQ::E8, SQ::C8),
        };
        Move(Move::new(src, dst).0 | ((MoveKind::Castling as u16) << KIND_SHIFT))
    }

    /// The origin square.
    #[inline(always)]
    pub fn src(self) -> SQ {
        SQ(((self.0 & SRC_MASK) >> SRC_SHIFT) as u8)
    }

    /// The destination square.
    #[inline(always)]
    pub fn dst(self) -> SQ {
        SQ((self.0 & DST_MASK) as u8)
    }

    /// The kind of the move.
    #[inline(always)]
    pub fn kind(self) -> MoveKind {
        unsafe { std::mem::transmute((self.0 >> KIND_SHIFT) as u8) }
    }

    /// The promotion piece type. Meaningful only for promotion moves.
    #[inline(always)]
    pub fn promo_type(self) -> PieceType {
        PieceType::from_promo_bits(((self.0 >> PROMO_SHIFT) & 0b11) as u8)
    }

    /// Returns true if this is the null move.
    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// A move is valid only if its origin and destination differ.
    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self.src() != self.dst()
    }

    #[inline(always)]
    pub fn is_promotion(self) -> bool {
        self.kind() == MoveKind::Promotion
    }

    #[inline(always)]
    pub fn is_en_passant(self) -> bool {
        self.kind() == MoveKind::EnPassant
    }

    #[inline(always)]
    pub fn is_castle(self) -> bool {
        self.kind() == MoveKind::Castling
    }

    /// For a castling move, the side being castled to.
    #[inline(always)]
    pub fn castle_side(self) -> CastleType {
        debug_assert!(self.is_castle());
        if self.dst().file_idx() > self.src().file_idx() {
            CastleType::KingSide
        } else {
            CastleType::QueenSide
        }
    }
}

impl fmt::Display for Move {
    /// Long algebraic notation, e.g. `e2e4`, `e7e8q`, `e1g1`. The null
    /// move prints as `0000`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.src(), self.dst())?;
        if self.is_promotion() {
            write!(f, "{}", self.promo_type().char_lower())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Move({}, {:?})", self, self.kind())
    }
}
