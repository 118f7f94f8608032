//! Zobrist seed tables.
//!
//! Every hashable feature of a position gets a fixed pseudo-random 64-bit
//! key: one per (piece, square) pair, one per en-passant file, one per
//! castling-rights combination, and one for the side to move. A position's
//! hash is the XOR of the keys of its features, so any make/unmake updates
//! it incrementally by XOR-ing the keys of the features that changed.

use std::ptr;

use crate::core::masks::*;
use crate::core::sq::SQ;
use crate::core::Piece;
use crate::tools::prng::PRNG;

const ZOBRIST_SEED: u64 = 23_081;

struct Zobrist {
    sq_piece: [[u64; PIECE_CNT]; SQ_CNT],
    en_passant: [u64; FILE_CNT],
    castle: [u64; ALL_CASTLING_RIGHTS],
    side: u64,
}

static mut ZOBRIST: Zobrist = Zobrist {
    sq_piece: [[0; PIECE_CNT]; SQ_CNT],
    en_passant: [0; FILE_CNT],
    castle: [0; ALL_CASTLING_RIGHTS],
    side: 0,
};

/// The key for a piece standing on a square.
#[inline(always)]
pub fn z_square(sq: SQ, piece: Piece) -> u64 {
    debug_assert!(sq.is_okay());
    unsafe {
        *(ptr::addr_of!(ZOBRIST.sq_piece) as *const u64)
            .add(sq.0 as usize * PIECE_CNT + piece as usize)
    }
}

/// The key for an en-passant target on the given square's file.
#[inline(always)]
pub fn z_ep(sq: SQ) -> u64 {
    debug_assert!(sq.is_okay());
    unsafe { *(ptr::addr_of!(ZOBRIST.en_passant) as *const u64).add(sq.file_idx() as usize) }
}

/// The key for a castling-rights combination (4 bits).
#[inline(always)]
pub fn z_castle(rights: u8) -> u64 {
    debug_assert!((rights as usize) < ALL_CASTLING_RIGHTS);
    unsafe { *(ptr::addr_of!(ZOBRIST.castle) as *const u64).add(rights as usize) }
}

/// The key toggled when the side to move is black.
#[inline(always)]
pub fn z_side() -> u64 {
    unsafe { ptr::addr_of!(ZOBRIST.side).read() }
}

#[cold]
pub fn init_zobrist() {
    let mut rng = PRNG::init(ZOBRIST_SEED);
    unsafe {
        let z = ptr::addr_of_mut!(ZOBRIST);
        for sq in 0..SQ_CNT {
            for piece in 0..PIECE_CNT {
                (*z).sq_piece[sq][piece] = rng.rand();
            }
        }
        for file in 0..FILE_CNT {
            (*z).en_passant[file] = rng.rand();
        }

        // each rights combination hashes as the XOR of its single-right keys,
        // so flipping one right toggles exactly one base key
        let bases: [u64; 4] = [rng.rand(), rng.rand(), rng.rand(), rng.rand()];
        for rights in 0..ALL_CASTLING_RIGHTS {
            let mut key = 0;
            for (bit, base) in bases.iter().enumerate() {
                if rights & (1 << bit) != 0 {
                    key ^= base;
                }
            }
            (*z).castle[rights] = key;
        }
        (*z).side = rng.rand();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::prelude::init_tables;

    #[test]
    fn castle_keys_compose() {
        init_tables();
        assert_eq!(z_castle(0), 0);
        assert_eq!(z_castle(0b0011), z_castle(0b0001) ^ z_castle(0b0010));
        assert_eq!(
            z_castle(0b1111),
            z_castle(0b0001) ^ z_castle(0b0010) ^ z_castle(0b0100) ^ z_castle(0b1000)
        );
    }

    #[test]
    fn keys_are_distinct() {
        init_tables();
        let a = z_square(SQ::E4, Piece::WhiteP);
        let b = z_square(SQ::E4, Piece::BlackP);
        let c = z_square(SQ::E5, Piece::WhiteP);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(z_side(), 0);
        assert_ne!(z_ep(SQ::E6), z_ep(SQ::D6));
    }
}
