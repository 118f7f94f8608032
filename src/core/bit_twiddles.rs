//! Bit manipulation primitives operating on raw `u64` masks.
//!
//! Everything else in the crate goes through [`BitBoard`] and [`SQ`], but the
//! functions here are the layer those types are built on.
//!
//! [`BitBoard`]: ../bitboard/struct.BitBoard.html
//! [`SQ`]: ../sq/struct.SQ.html

/// Counts the number of set bits.
#[inline(always)]
pub fn popcount64(x: u64) -> u8 {
    x.count_ones() as u8
}

/// Returns the index of the least significant set bit.
///
/// # Safety
///
/// `bits` must be non-zero; a zero input returns 64, which is not a valid
/// square index.
#[inline(always)]
pub fn bit_scan_forward(bits: u64) -> u8 {
    debug_assert_ne!(bits, 0);
    bits.trailing_zeros() as u8
}

/// Returns the index of the most significant set bit.
#[inline(always)]
pub fn bit_scan_reverse(bits: u64) -> u8 {
    debug_assert_ne!(bits, 0);
    63 - bits.leading_zeros() as u8
}

/// Returns the least significant set bit as a mask, or zero for a zero input.
#[inline(always)]
pub fn lsb(bits: u64) -> u64 {
    bits & bits.wrapping_neg()
}

/// Returns the most significant set bit as a mask, or zero for a zero input.
#[inline(always)]
pub fn msb(bits: u64) -> u64 {
    if bits == 0 {
        0
    } else {
        1u64 << bit_scan_reverse(bits)
    }
}

/// Clears the least significant set bit.
#[inline(always)]
pub fn reset_lsb(bits: u64) -> u64 {
    bits & bits.wrapping_sub(1)
}

/// Returns true if more than one bit is set.
#[inline(always)]
pub fn more_than_one(bits: u64) -> bool {
    reset_lsb(bits) != 0
}

/// Returns the difference in rank (rows) between two square indices.
#[inline(always)]
pub fn rank_distance(sq_a: u8, sq_b: u8) -> u8 {
    let a = sq_a >> 3;
    let b = sq_b >> 3;
    a.max(b) - a.min(b)
}

/// Returns the difference in file (columns) between two square indices.
#[inline(always)]
pub fn file_distance(sq_a: u8, sq_b: u8) -> u8 {
    let a = sq_a & 7;
    let b = sq_b & 7;
    a.max(b) - a.min(b)
}

/// Chebyshev distance between two square indices.
#[inline(always)]
pub fn sq_distance(sq_a: u8, sq_b: u8) -> u8 {
    rank_distance(sq_a, sq_b).max(file_distance(sq_a, sq_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popcount() {
        assert_eq!(popcount64(0), 0);
        assert_eq!(popcount64(1), 1);
        assert_eq!(popcount64(0xFF00), 8);
        assert_eq!(popcount64(u64::MAX), 64);
    }

    #[test]
    fn scans() {
        assert_eq!(bit_scan_forward(0b1000), 3);
        assert_eq!(bit_scan_forward(u64::MAX), 0);
        assert_eq!(bit_scan_reverse(0b1000), 3);
        assert_eq!(bit_scan_reverse(u64::MAX), 63);
        assert_eq!(bit_scan_forward(1u64 << 63), 63);
    }

    #[test]
    fn lsb_msb() {
        assert_eq!(lsb(0b10100), 0b100);
        assert_eq!(msb(0b10100), 0b10000);
        assert_eq!(lsb(0), 0);
        assert_eq!(msb(0), 0);
        assert_eq!(reset_lsb(0b10100), 0b10000);
        assert!(more_than_one(0b101));
        assert!(!more_than_one(0b100));
        assert!(!more_than_one(0));
    }

    #[test]
    fn distances() {
        // a1 to h8
        assert_eq!(rank_distance(0, 63), 7);
        assert_eq!(file_distance(0, 63), 7);
        assert_eq!(sq_distance(0, 63), 7);
        // e4 to e5
        assert_eq!(sq_distance(28, 36), 1);
    }
}
