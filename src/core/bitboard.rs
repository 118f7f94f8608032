//! The `BitBoard`: a 64-bit mask with one bit per square of the chessboard.

use std::fmt;
use std::ops::*;

use super::bit_twiddles::*;
use super::masks::*;
use super::sq::SQ;

/// A set of squares represented as a 64-bit mask, bit `n` standing for
/// square index `n`.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq)]
pub struct BitBoard(pub u64);

impl_bit_ops!(BitBoard, u64);

impl BitBoard {
    /// An empty bitboard.
    pub const EMPTY: BitBoard = BitBoard(0);
    /// A full bitboard.
    pub const ALL: BitBoard = BitBoard(u64::MAX);

    pub const FILE_A: BitBoard = BitBoard(FILE_A);
    pub const FILE_B: BitBoard = BitBoard(FILE_B);
    pub const FILE_G: BitBoard = BitBoard(FILE_G);
    pub const FILE_H: BitBoard = BitBoard(FILE_H);

    pub const RANK_1: BitBoard = BitBoard(RANK_1);
    pub const RANK_2: BitBoard = BitBoard(RANK_2);
    pub const RANK_3: BitBoard = BitBoard(RANK_3);
    pub const RANK_4: BitBoard = BitBoard(RANK_4);
    pub const RANK_5: BitBoard = BitBoard(RANK_5);
    pub const RANK_6: BitBoard = BitBoard(RANK_6);
    pub const RANK_7: BitBoard = BitBoard(RANK_7);
    pub const RANK_8: BitBoard = BitBoard(RANK_8);

    /// Returns true if no bits are set.
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if at least one bit is set.
    #[inline(always)]
    pub fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Counts the set bits.
    #[inline(always)]
    pub fn count_bits(self) -> u8 {
        popcount64(self.0)
    }

    /// Returns true if more than one bit is set.
    #[inline(always)]
    pub fn more_than_one(self) -> bool {
        more_than_one(self.0)
    }

    /// Returns true if the given square's bit is set.
    #[inline(always)]
    pub fn is_set(self, sq: SQ) -> bool {
        debug_assert!(sq.is_okay());
        self.0 & (1u64 << sq.0) != 0
    }

    /// Returns the least significant set bit as a bitboard.
    #[inline(always)]
    pub fn lsb(self) -> BitBoard {
        BitBoard(lsb(self.0))
    }

    /// Converts the bitboard to the square of its least significant bit.
    ///
    /// The bitboard must be non-empty.
    #[inline(always)]
    pub fn to_sq(self) -> SQ {
        debug_assert!(self.is_not_empty());
        SQ(bit_scan_forward(self.0))
    }

    /// Removes and returns the least significant set square.
    ///
    /// The bitboard must be non-empty.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> SQ {
        debug_assert!(self.is_not_empty());
        let sq = self.to_sq();
        self.0 &= self.0.wrapping_sub(1);
        sq
    }

    /// Removes and returns the least significant set square, or `None` if
    /// the bitboard is empty.
    #[inline(always)]
    pub fn pop_some_lsb(&mut self) -> Option<SQ> {
        if self.is_empty() {
            None
        } else {
            Some(self.pop_lsb())
        }
    }

    /// Removes the least significant set square and returns it together
    /// with its single-bit mask.
    #[inline(always)]
    pub fn pop_some_lsb_and_bit(&mut self) -> Option<(SQ, BitBoard)> {
        if self.is_empty() {
            None
        } else {
            let bit = self.lsb();
            Some((self.pop_lsb(), bit))
        }
    }
}

impl Iterator for BitBoard {
    type Item = SQ;

    #[inline(always)]
    fn next(&mut self) -> Option<SQ> {
        self.pop_some_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let bits = self.count_bits() as usize;
        (bits, Some(bits))
    }
}

impl fmt::Display for BitBoard {
    /// Renders the bitboard as an 8x8 grid, rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::with_capacity(144);
        for rank in (0..8).rev() {
            for file in 0..8 {
                let bit = 1u64 << (rank * 8 + file);
                s.push(if self.0 & bit != 0 { '1' } else { '.' });
                s.push(' ');
            }
            s.push('\n');
        }
        f.write_str(&s)
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BitBoard({:#018x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_and_iterate() {
        let mut bb = BitBoard(0b1011);
        assert_eq!(bb.pop_lsb(), SQ(0));
        assert_eq!(bb.pop_lsb(), SQ(1));
        assert_eq!(bb.pop_some_lsb(), Some(SQ(3)));
        assert_eq!(bb.pop_some_lsb(), None);

        let squares: Vec<SQ> = BitBoard(0x8100_0000_0000_0081).collect();
        assert_eq!(squares, vec![SQ::A1, SQ::H1, SQ::A8, SQ::H8]);
    }

    #[test]
    fn set_membership() {
        let bb = SQ::E4.to_bb() | SQ::D5.to_bb();
        assert!(bb.is_set(SQ::E4));
        assert!(bb.is_set(SQ::D5));
        assert!(!bb.is_set(SQ::E5));
        assert_eq!(bb.count_bits(), 2);
        assert!(bb.more_than_one());
        assert!(!SQ::E4.to_bb().more_than_one());
    }
}
