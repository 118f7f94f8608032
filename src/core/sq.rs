//! A square of the chessboard.
//!
//! Squares are indexed 0 through 63, file-major from a1: `sq = rank * 8 +
//! file`. Index 64 is the [`NO_SQ`] sentinel, used wherever a square may be
//! absent (such as the en-passant target).
//!
//! [`NO_SQ`]: constant.NO_SQ.html

use std::fmt;
use std::ops::*;

use super::bit_twiddles::sq_distance;
use super::bitboard::BitBoard;
use super::masks::*;
use super::{File, Rank};

/// A square index, 0 to 63, or the invalid sentinel 64.
#[derive(Copy, Clone, Default, Hash, PartialEq, PartialOrd, Eq, Debug)]
pub struct SQ(pub u8);

/// The invalid square.
pub const NO_SQ: SQ = SQ(64);

impl_bit_ops!(SQ, u8);

impl SQ {
    /// `SQ::NONE` mirrors [`NO_SQ`] for associated-constant callers.
    pub const NONE: SQ = NO_SQ;

    /// Builds a square from a file and a rank.
    #[inline(always)]
    pub fn make(file: File, rank: Rank) -> SQ {
        SQ(((rank as u8) << 3) | file as u8)
    }

    /// Returns true if the square is on the board.
    #[inline(always)]
    pub fn is_okay(self) -> bool {
        self.0 < 64
    }

    /// Returns the bitboard with only this square's bit set.
    #[inline(always)]
    pub fn to_bb(self) -> BitBoard {
        debug_assert!(self.is_okay());
        BitBoard(1u64 << self.0)
    }

    /// Returns the rank of this square.
    #[inline(always)]
    pub fn rank(self) -> Rank {
        Rank::from_index(self.0 >> 3)
    }

    /// Returns the rank index (0..8) of this square.
    #[inline(always)]
    pub fn rank_idx(self) -> u8 {
        self.0 >> 3
    }

    /// Returns the file of this square.
    #[inline(always)]
    pub fn file(self) -> File {
        File::from_index(self.0 & 0b111)
    }

    /// Returns the file index (0..8) of this square.
    #[inline(always)]
    pub fn file_idx(self) -> u8 {
        self.0 & 0b111
    }

    /// The bitboard of this square's file.
    #[inline(always)]
    pub fn file_bb(self) -> BitBoard {
        BitBoard(FILE_BB[self.file_idx() as usize])
    }

    /// The bitboard of this square's rank.
    #[inline(always)]
    pub fn rank_bb(self) -> BitBoard {
        BitBoard(RANK_BB[self.rank_idx() as usize])
    }

    /// Chebyshev distance to another square.
    #[inline(always)]
    pub fn distance(self, other: SQ) -> u8 {
        sq_distance(self.0, other.0)
    }

    /// Offsets the square by a signed direction, without bounds checking
    /// beyond wrapping.
    #[inline(always)]
    pub fn offset(self, dir: i8) -> SQ {
        SQ((self.0 as i8).wrapping_add(dir) as u8)
    }

    /// Returns the castling-rights bits invalidated when a piece moves to
    /// or from this square.
    ///
    /// Non-zero only for the initial king and rook squares: a move touching
    /// one of them permanently removes the corresponding rights.
    #[inline(always)]
    pub fn castle_rights_mask(self) -> u8 {
        match self {
            SQ::A1 => C_WHITE_Q_MASK,
            SQ::E1 => C_WHITE_K_MASK | C_WHITE_Q_MASK,
            SQ::H1 => C_WHITE_K_MASK,
            SQ::A8 => C_BLACK_Q_MASK,
            SQ::E8 => C_BLACK_K_MASK | C_BLACK_Q_MASK,
            SQ::H8 => C_BLACK_K_MASK,
            _ => 0,
        }
    }

    /// Parses algebraic notation such as `"e4"`.
    pub fn from_str(s: &str) -> Option<SQ> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(SQ((rank as u8 - b'1') * 8 + (file as u8 - b'a')))
    }
}

impl fmt::Display for SQ {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_okay() {
            write!(
                f,
                "{}{}",
                (b'a' + self.file_idx()) as char,
                (b'1' + self.rank_idx()) as char
            )
        } else {
            write!(f, "--")
        }
    }
}

// Square constants.
#[doc(hidden)]
impl SQ {
    pub const A1: SQ = SQ(0);
    pub const B1: SQ = SQ(1);
    pub const C1: SQ = SQ(2);
    pub const D1: SQ = SQ(3);
    pub const E1: SQ = SQ(4);
    pub const F1: SQ = SQ(5);
    pub const G1: SQ = SQ(6);
    pub const H1: SQ = SQ(7);
    pub const A2: SQ = SQ(8);
    pub const B2: SQ = SQ(9);
    pub const C2: SQ = SQ(10);
    pub const D2: SQ = SQ(11);
    pub const E2: SQ = SQ(12);
    pub const F2: SQ = SQ(13);
    pub const G2: SQ = SQ(14);
    pub const H2: SQ = SQ(15);
    pub const A3: SQ = SQ(16);
    pub const B3: SQ = SQ(17);
    pub const C3: SQ = SQ(18);
    pub const D3: SQ = SQ(19);
    pub const E3: SQ = SQ(20);
    pub const F3: SQ = SQ(21);
    pub const G3: SQ = SQ(22);
    pub const H3: SQ = SQ(23);
    pub const A4: SQ = SQ(24);
    pub const B4: SQ = SQ(25);
    pub const C4: SQ = SQ(26);
    pub const D4: SQ = SQ(27);
    pub const E4: SQ = SQ(28);
    pub const F4: SQ = SQ(29);
    pub const G4: SQ = SQ(30);
    pub const H4: SQ = SQ(31);
    pub const A5: SQ = SQ(32);
    pub const B5: SQ = SQ(33);
    pub const C5: SQ = SQ(34);
    pub const D5: SQ = SQ(35);
    pub const E5: SQ = SQ(36);
    pub const F5: SQ = SQ(37);
    pub const G5: SQ = SQ(38);
    pub const H5: SQ = SQ(39);
    pub const A6: SQ = SQ(40);
    pub const B6: SQ = SQ(41);
    pub const C6: SQ = SQ(42);
    pub const D6: SQ = SQ(43);
    pub const E6: SQ = SQ(44);
    pub const F6: SQ = SQ(45);
    pub const G6: SQ = SQ(46);
    pub const H6: SQ = SQ(47);
    pub const A7: SQ = SQ(48);
    pub const B7: SQ = SQ(49);
    pub const C7: SQ = SQ(50);
    pub const D7: SQ = SQ(51);
    pub const E7: SQ = SQ(52);
    pub const F7: SQ = SQ(53);
    pub const G7: SQ = SQ(54);
    pub const H7: SQ = SQ(55);
    pub const A8: SQ = SQ(56);
    pub const B8: SQ = SQ(57);
    pub const C8: SQ = SQ(58);
    pub const D8: SQ = SQ(59);
    pub const E8: SQ = SQ(60);
    pub const F8: SQ = SQ(61);
    pub const G8: SQ = SQ(62);
    pub const H8: SQ = SQ(63);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_and_split() {
        for idx in 0..64u8 {
            let sq = SQ(idx);
            assert!(sq.is_okay());
            assert_eq!(SQ::make(sq.file(), sq.rank()), sq);
        }
        assert!(!NO_SQ.is_okay());
    }

    #[test]
    fn parse_display_round_trip() {
        for idx in 0..64u8 {
            let sq = SQ(idx);
            assert_eq!(SQ::from_str(&sq.to_string()), Some(sq));
        }
        assert_eq!(SQ::from_str("e4"), Some(SQ::E4));
        assert_eq!(SQ::from_str("i4"), None);
        assert_eq!(SQ::from_str("e9"), None);
        assert_eq!(SQ::from_str("e"), None);
    }

    #[test]
    fn rights_masks() {
        assert_eq!(SQ::E1.castle_rights_mask(), C_WHITE_K_MASK | C_WHITE_Q_MASK);
        assert_eq!(SQ::H8.castle_rights_mask(), C_BLACK_K_MASK);
        assert_eq!(SQ::E4.castle_rights_mask(), 0);
    }
}
