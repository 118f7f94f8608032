//! One-time initialization of the global lookup tables, plus re-exports of
//! the lookup functions.
//!
//! The attack and Zobrist tables are immutable after construction, but they
//! are built at runtime. [`init_tables`] performs that construction exactly
//! once, no matter how many threads race to call it; every `Board`
//! constructor calls it, so user code normally never needs to.
//!
//! [`init_tables`]: fn.init_tables.html

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

pub use super::boards::{
    aligned, between_bb, king_moves, knight_moves, line_bb, pawn_attacks_from,
};
pub use super::magic::{bishop_attacks, rook_attacks};
pub use super::zobrist::{z_castle, z_ep, z_side, z_square};

use crate::core::sq::SQ;

static INITIALIZED: AtomicBool = AtomicBool::new(false);
static DONE: AtomicBool = AtomicBool::new(false);

/// Builds all global lookup tables on first call; afterwards a cheap no-op.
pub fn init_tables() {
    if INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        super::magic::init_magics();
        super::boards::init_boards();
        super::zobrist::init_zobrist();
        DONE.store(true, Ordering::SeqCst);
    } else {
        // another thread won the race; wait until its build completes
        while !DONE.load(Ordering::SeqCst) {
            thread::yield_now();
        }
    }
}

/// Queen attack mask: the union of the rook and bishop lookups.
#[inline(always)]
pub fn queen_attacks(occupied: u64, sq: SQ) -> u64 {
    rook_attacks(occupied, sq.0) | bishop_attacks(occupied, sq.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tables();
        let first = knight_moves(SQ::E4);
        init_tables();
        assert_eq!(knight_moves(SQ::E4), first);
    }

    #[test]
    fn queen_is_rook_or_bishop() {
        init_tables();
        let occ = 0x0000_1200_0450_0000u64;
        for s in 0..64u8 {
            assert_eq!(
                queen_attacks(occ, SQ(s)),
                rook_attacks(occ, s) | bishop_attacks(occ, s)
            );
        }
    }
}
