//! Castling-rights bookkeeping.
//!
//! A [`Castling`] is a 4-bit flag set, one bit per (player, side)
//! combination. A set bit means the relevant king and rook have not moved
//! yet; it does not mean castling is legal right now.
//!
//! [`Castling`]: struct.Castling.html

use std::fmt;

use crate::core::masks::*;
use crate::core::sq::SQ;
use crate::core::{CastleType, Player};

bitflags! {
    /// The castling rights remaining for both players.
    pub struct Castling: u8 {
        const WHITE_K = C_WHITE_K_MASK;
        const WHITE_Q = C_WHITE_Q_MASK;
        const BLACK_K = C_BLACK_K_MASK;
        const BLACK_Q = C_BLACK_Q_MASK;
        const WHITE_ALL = Self::WHITE_K.bits | Self::WHITE_Q.bits;
        const BLACK_ALL = Self::BLACK_K.bits | Self::BLACK_Q.bits;
    }
}

impl Castling {
    #[inline]
    pub const fn all_rights() -> Castling {
        Castling { bits: 0b0000_1111 }
    }

    #[inline]
    pub const fn no_rights() -> Castling {
        Castling { bits: 0 }
    }

    /// Returns whether the player still has rights for the given side.
    #[inline]
    pub fn castle_rights(self, player: Player, side: CastleType) -> bool {
        let bit = match (player, side) {
            (Player::White, CastleType::KingSide) => Castling::WHITE_K,
            (Player::White, CastleType::QueenSide) => Castling::WHITE_Q,
            (Player::Black, CastleType::KingSide) => Castling::BLACK_K,
            (Player::Black, CastleType::QueenSide) => Castling::BLACK_Q,
        };
        self.contains(bit)
    }

    /// Removes the rights invalidated by a move between two squares and
    /// returns the bits that were cleared.
    ///
    /// A move touching e1/h1/a1 (or the black mirrors) clears the matching
    /// rights whether the piece is moving away, capturing the rook, or the
    /// king itself moving; squares elsewhere clear nothing.
    #[inline]
    pub fn update_for_move(&mut self, src: SQ, dst: SQ) -> u8 {
        let mask_change: u8 = src.castle_rights_mask() | dst.castle_rights_mask();
        let cleared: u8 = self.bits & mask_change;
        self.bits &= !mask_change;
        cleared
    }

    /// Adds a right from its FEN character; `-` adds nothing.
    pub fn add_castling_char(&mut self, c: char) -> bool {
        self.bits |= match c {
            'K' => Castling::WHITE_K.bits,
            'Q' => Castling::WHITE_Q.bits,
            'k' => Castling::BLACK_K.bits,
            'q' => Castling::BLACK_Q.bits,
            '-' => 0,
            _ => return false,
        };
        true
    }

    /// FEN representation: `KQkq` subset, or `-` when no rights remain.
    pub fn pretty_string(self) -> String {
        if self.is_empty() {
            "-".to_owned()
        } else {
            let mut s = String::with_capacity(4);
            if self.contains(Castling::WHITE_K) {
                s.push('K');
            }
            if self.contains(Castling::WHITE_Q) {
                s.push('Q');
            }
            if self.contains(Castling::BLACK_K) {
                s.push('k');
            }
            if self.contains(Castling::BLACK_Q) {
                s.push('q');
            }
            s
        }
    }
}

impl fmt::Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_move_clears_both_sides() {
        let mut rights = Castling::all_rights();
        let cleared = rights.update_for_move(SQ::E1, SQ::E2);
        assert_eq!(cleared, C_WHITE_K_MASK | C_WHITE_Q_MASK);
        assert!(!rights.castle_rights(Player::White, CastleType::KingSide));
        assert!(!rights.castle_rights(Player::White, CastleType::QueenSide));
        assert!(rights.castle_rights(Player::Black, CastleType::KingSide));
    }

    #[test]
    fn rook_capture_clears_one_side() {
        let mut rights = Castling::all_rights();
        // white rook on a1 captured by something landing there
        let cleared = rights.update_for_move(SQ::B3, SQ::A1);
        assert_eq!(cleared, C_WHITE_Q_MASK);
        assert!(rights.castle_rights(Player::White, CastleType::KingSide));
    }

    #[test]
    fn unrelated_move_clears_nothing() {
        let mut rights = Castling::all_rights();
        assert_eq!(rights.update_for_move(SQ::E4, SQ::E5), 0);
        assert_eq!(rights, Castling::all_rights());
    }

    #[test]
    fn fen_round_trip() {
        let mut rights = Castling::no_rights();
        for c in "KQkq".chars() {
            assert!(rights.add_castling_char(c));
        }
        assert_eq!(rights.pretty_string(), "KQkq");
        assert_eq!(Castling::no_rights().pretty_string(), "-");
        assert!(!Castling::no_rights().add_castling_char('x'));
    }
}
