//! Magic-bitboard attack tables for the sliding pieces.
//!
//! For each square and piece (rook / bishop) a "relevant occupancy" mask is
//! computed: the squares whose contents can shorten the piece's rays,
//! excluding board edges (an edge square never blocks anything beyond it).
//! Every subset of that mask is enumerated and its true attack set stored in
//! a flat table. The lookup index is a perfect hash:
//!
//! ```md
//! index = ((occupancy & mask) * magic) >> (64 - popcount(mask))
//! ```
//!
//! where the magic constant is found by trial with sparse random numbers.
//! Rooks need 4096 entries per square at most, bishops 512; the flat tables
//! total 102,400 and 5,248 entries. The tables are built once by
//! [`init_magics`] and read-only afterwards.
//!
//! [`init_magics`]: fn.init_magics.html

use std::ptr;

use crate::core::bit_twiddles::popcount64;
use crate::core::masks::*;
use crate::core::sq::SQ;
use crate::tools::prng::PRNG;

/// Size of the flattened rook attack table.
const ROOK_M_SIZE: usize = 102_400;
/// Size of the flattened bishop attack table.
const BISHOP_M_SIZE: usize = 5_248;

static mut ROOK_MAGICS: [SMagic; SQ_CNT] = [SMagic::init(); SQ_CNT];
static mut ROOK_TABLE: [u64; ROOK_M_SIZE] = [0; ROOK_M_SIZE];

static mut BISHOP_MAGICS: [SMagic; SQ_CNT] = [SMagic::init(); SQ_CNT];
static mut BISHOP_TABLE: [u64; BISHOP_M_SIZE] = [0; BISHOP_M_SIZE];

pub(crate) const B_DELTAS: [i8; 4] = [NORTH_WEST, NORTH_EAST, SOUTH_WEST, SOUTH_EAST];
pub(crate) const R_DELTAS: [i8; 4] = [NORTH, EAST, SOUTH, WEST];

// Per-rank PRNG seeds known to find magics quickly.
const SEEDS: [u64; 8] = [728, 10_316, 55_013, 32_803, 12_281, 15_100, 16_645, 255];

/// Per-square magic lookup data: the relevant-occupancy mask, the magic
/// multiplier, the shift, and the square's offset into the flat table.
#[derive(Copy, Clone)]
struct SMagic {
    offset: usize,
    mask: u64,
    magic: u64,
    shift: u32,
}

impl SMagic {
    const fn init() -> SMagic {
        SMagic {
            offset: 0,
            mask: 0,
            magic: 0,
            shift: 0,
        }
    }

    #[inline(always)]
    fn index(&self, occupied: u64) -> usize {
        self.offset
            + ((occupied & self.mask).wrapping_mul(self.magic)).wrapping_shr(self.shift) as usize
    }
}

/// Builds the rook and bishop tables. Must run exactly once, before any
/// lookup; [`init_tables`](../prelude/fn.init_tables.html) guards this.
#[cold]
pub fn init_magics() {
    unsafe {
        gen_magic_table(
            BISHOP_M_SIZE,
            &B_DELTAS,
            ptr::addr_of_mut!(BISHOP_MAGICS) as *mut SMagic,
            ptr::addr_of_mut!(BISHOP_TABLE) as *mut u64,
        );
        gen_magic_table(
            ROOK_M_SIZE,
            &R_DELTAS,
            ptr::addr_of_mut!(ROOK_MAGICS) as *mut SMagic,
            ptr::addr_of_mut!(ROOK_TABLE) as *mut u64,
        );
    }
}

/// Returns the bishop attack mask for the given occupancy.
#[inline]
pub fn bishop_attacks(occupied: u64, sq: u8) -> u64 {
    debug_assert!(sq < 64);
    unsafe {
        let entry = &*(ptr::addr_of!(BISHOP_MAGICS) as *const SMagic).add(sq as usize);
        *(ptr::addr_of!(BISHOP_TABLE) as *const u64).add(entry.index(occupied))
    }
}

/// Returns the rook attack mask for the given occupancy.
#[inline]
pub fn rook_attacks(occupied: u64, sq: u8) -> u64 {
    debug_assert!(sq < 64);
    unsafe {
        let entry = &*(ptr::addr_of!(ROOK_MAGICS) as *const SMagic).add(sq as usize);
        *(ptr::addr_of!(ROOK_TABLE) as *const u64).add(entry.index(occupied))
    }
}

/// Finds a magic number per square and fills the flat attack table.
///
/// The trial loop follows the classic scheme: pick a sparse random
/// candidate, map every occupancy subset through it, and reject the
/// candidate on the first destructive collision (two subsets with different
/// attack sets landing on one index). The `age` array lets each trial reuse
/// the scratch table without clearing it.
#[cold]
unsafe fn gen_magic_table(
    table_size: usize,
    deltas: &[i8; 4],
    magics: *mut SMagic,
    attacks: *mut u64,
) {
    let mut occupancy: [u64; 4096] = [0; 4096];
    let mut reference: [u64; 4096] = [0; 4096];
    let mut age: [i32; 4096] = [0; 4096];
    let mut current: i32 = 0;

    let mut offset: usize = 0;

    for s in 0..SQ_CNT as u8 {
        let sq = SQ(s);
        let edges: u64 = ((RANK_1 | RANK_8) & !sq.rank_bb().0) | ((FILE_A | FILE_H) & !sq.file_bb().0);
        let mask: u64 = sliding_attack(deltas, s, 0) & !edges;
        let shift: u32 = (64 - popcount64(mask)) as u32;

        // Enumerate every subset of the mask with the ripple-carry trick.
        let mut size: usize = 0;
        let mut b: u64 = 0;
        loop {
            occupancy[size] = b;
            reference[size] = sliding_attack(deltas, s, b);
            size += 1;
            b = b.wrapping_sub(mask) & mask;
            if b == 0 {
                break;
            }
        }

        let mut rng = PRNG::init(SEEDS[sq.rank_idx() as usize]);
        let mut magic: u64;

        'trial: loop {
            // Candidates need a well-mixed top byte after multiplication.
            loop {
                magic = rng.sparse_rand();
                if popcount64(magic.wrapping_mul(mask).wrapping_shr(56)) >= 6 {
                    break;
                }
            }
            current += 1;

            let mut i: usize = 0;
            while i < size {
                let index: usize =
                    (occupancy[i] & mask).wrapping_mul(magic).wrapping_shr(shift) as usize;
                if age[index] < current {
                    age[index] = current;
                    *attacks.add(offset + index) = reference[i];
                } else if *attacks.add(offset + index) != reference[i] {
                    break;
                }
                i += 1;
            }
            if i >= size {
                break 'trial;
            }
        }

        *magics.add(s as usize) = SMagic {
            offset,
            mask,
            magic,
            shift,
        };
        offset += size;
    }

    assert_eq!(offset, table_size);
}

/// Ray-casts from `sq` in each delta direction, stopping at (and including)
/// the first occupied square or the board edge. The origin square is never
/// included.
pub fn sliding_attack(deltas: &[i8; 4], sq: u8, occupied: u64) -> u64 {
    debug_assert!(sq < 64);
    let mut attack: u64 = 0;
    for &delta in deltas.iter() {
        let mut s: i16 = sq as i16 + delta as i16;
        let mut prev: i16 = sq as i16;
        while (0..64).contains(&s) && SQ(s as u8).distance(SQ(prev as u8)) == 1 {
            attack |= 1u64 << s;
            if occupied & (1u64 << s) != 0 {
                break;
            }
            prev = s;
            s += delta as i16;
        }
    }
    attack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::prelude::init_tables;

    #[test]
    fn rook_on_empty_board() {
        init_tables();
        // a rook on e4 with nothing in the way sees its full file and rank
        let attacks = rook_attacks(0, SQ::E4.0);
        assert_eq!(attacks, (FILE_E | RANK_4) & !SQ::E4.to_bb().0);
    }

    #[test]
    fn rook_blocked() {
        init_tables();
        let occ = SQ::E6.to_bb().0 | SQ::G4.to_bb().0;
        let attacks = rook_attacks(occ, SQ::E4.0);
        // blockers are included, squares beyond them are not
        assert_ne!(attacks & SQ::E6.to_bb().0, 0);
        assert_eq!(attacks & SQ::E7.to_bb().0, 0);
        assert_ne!(attacks & SQ::G4.to_bb().0, 0);
        assert_eq!(attacks & SQ::H4.to_bb().0, 0);
    }

    #[test]
    fn bishop_corner() {
        init_tables();
        let attacks = bishop_attacks(0, SQ::A1.0);
        // the long diagonal a1-h8, minus a1 itself
        assert_eq!(attacks, 0x8040_2010_0804_0200);
    }

    #[test]
    fn magic_matches_ray_cast() {
        init_tables();
        let occs = [
            0u64,
            0x0000_00FF_0000_0000,
            0x8142_2418_1824_4281,
            0x00FF_0000_0000_FF00,
        ];
        for s in 0..64u8 {
            for &occ in occs.iter() {
                assert_eq!(rook_attacks(occ, s), sliding_attack(&R_DELTAS, s, occ));
                assert_eq!(bishop_attacks(occ, s), sliding_attack(&B_DELTAS, s, occ));
            }
        }
    }
}
