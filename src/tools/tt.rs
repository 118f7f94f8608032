//! The shared transposition table.
//!
//! A fixed, power-of-two number of 16-byte entries indexed by the low bits
//! of the Zobrist key. Replacement is unconditional: whoever stores last
//! wins the slot. The table is written through `&self` so one allocation
//! can be shared between the search thread and its owner; this is sound
//! only under the engine's rule that a single search runs at a time, which
//! is why the unsynchronized access stays private to this crate's users.

use std::cell::UnsafeCell;

use crate::core::piece_move::Move;

/// Smallest and largest accepted table sizes, in megabytes.
pub const MIN_TT_SIZE_MB: usize = 1;
pub const MAX_TT_SIZE_MB: usize = 16 * 1024;

/// What the stored evaluation means relative to the search window that
/// produced it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum NodeBound {
    /// Slot never written.
    Failed = 0,
    /// Exact score: the search completed inside the window.
    Exact,
    /// The score is a lower bound: the node failed high.
    LowerBound,
    /// The score is an upper bound: the node failed low.
    UpperBound,
}

/// One transposition-table slot.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Entry {
    /// Full Zobrist key of the stored position.
    pub key: u64,
    /// Score from the point of view of the side to move.
    pub evaluation: i32,
    /// The move the search preferred here, possibly null for fail-lows.
    pub best_move: Move,
    /// Remaining depth the score was computed with.
    pub depth: u8,
    pub bound: NodeBound,
}

impl Entry {
    const fn blank() -> Entry {
        Entry {
            key: 0,
            evaluation: 0,
            best_move: Move::NULL,
            depth: 0,
            bound: NodeBound::Failed,
        }
    }
}

/// Hash table of search results, keyed by position.
pub struct TranspositionTable {
    entries: UnsafeCell<Box<[Entry]>>,
}

// Writes race benignly under the single-search rule; see the module docs.
unsafe impl Sync for TranspositionTable {}

impl TranspositionTable {
    /// Allocates a table of roughly `mb` megabytes, rounded up to a power
    /// of two within the accepted range.
    pub fn new(mb: usize) -> TranspositionTable {
        let mb = mb
            .next_power_of_two()
            .clamp(MIN_TT_SIZE_MB, MAX_TT_SIZE_MB);
        TranspositionTable {
            entries: UnsafeCell::new(Self::alloc(mb)),
        }
    }

    fn alloc(mb: usize) -> Box<[Entry]> {
        let count = mb * 1024 * 1024 / std::mem::size_of::<Entry>();
        debug_assert!(count.is_power_of_two());
        vec![Entry::blank(); count].into_boxed_slice()
    }

    /// Number of slots in the table.
    pub fn num_entries(&self) -> usize {
        unsafe { (&(*self.entries.get())).len() }
    }

    /// Re-allocates to `mb` megabytes. A size that is zero, not a power of
    /// two, or out of range leaves the table untouched.
    ///
    /// Must not be called while a search is running.
    pub fn resize(&self, mb: usize) {
        if !mb.is_power_of_two() || !(MIN_TT_SIZE_MB..=MAX_TT_SIZE_MB).contains(&mb) {
            return;
        }
        unsafe {
            *self.entries.get() = Self::alloc(mb);
        }
    }

    /// Wipes every slot, keeping the allocation.
    pub fn clear(&self) {
        unsafe {
            for slot in (*self.entries.get()).iter_mut() {
                *slot = Entry::blank();
            }
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & (self.num_entries() - 1)
    }

    /// Looks up the entry stored for a position, if any.
    pub fn probe(&self, key: u64) -> Option<Entry> {
        let entry = unsafe { (*self.entries.get())[self.index(key)] };
        if entry.bound != NodeBound::Failed && entry.key == key {
            Some(entry)
        } else {
            None
        }
    }

    /// Stores a search result, unconditionally replacing whatever occupied
    /// the slot.
    pub fn store(&self, key: u64, evaluation: i32, best_move: Move, depth: u8, bound: NodeBound) {
        debug_assert_ne!(bound, NodeBound::Failed);
        let idx = self.index(key);
        unsafe {
            (*self.entries.get())[idx] = Entry {
                key,
                evaluation,
                best_move,
                depth,
                bound,
            };
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sq::SQ;

    #[test]
    fn entry_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Entry>(), 16);
    }

    #[test]
    fn store_then_probe() {
        let tt = TranspositionTable::new(1);
        let mv = Move::new(SQ::E2, SQ::E4);
        tt.store(0xDEAD_BEEF, 42, mv, 5, NodeBound::Exact);
        let entry = tt.probe(0xDEAD_BEEF).unwrap();
        assert_eq!(entry.evaluation, 42);
        assert_eq!(entry.best_move, mv);
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.bound, NodeBound::Exact);
        assert!(tt.probe(0xCAFE).is_none());
    }

    #[test]
    fn always_replaces() {
        let tt = TranspositionTable::new(1);
        let entries = tt.num_entries() as u64;
        let key_a = 7u64;
        let key_b = 7u64 + entries; // same slot, different key
        tt.store(key_a, 1, Move::NULL, 9, NodeBound::Exact);
        tt.store(key_b, 2, Move::NULL, 1, NodeBound::LowerBound);
        assert!(tt.probe(key_a).is_none());
        assert_eq!(tt.probe(key_b).unwrap().evaluation, 2);
    }

    #[test]
    fn clear_wipes() {
        let tt = TranspositionTable::new(1);
        tt.store(99, 3, Move::NULL, 2, NodeBound::UpperBound);
        tt.clear();
        assert!(tt.probe(99).is_none());
    }

    #[test]
    fn invalid_resize_is_a_no_op() {
        let tt = TranspositionTable::new(1);
        let before = tt.num_entries();
        tt.resize(0);
        tt.resize(3);
        tt.resize(MAX_TT_SIZE_MB * 2);
        assert_eq!(tt.num_entries(), before);
        tt.resize(2);
        assert_eq!(tt.num_entries(), before * 2);
    }

    #[test]
    fn sizes_round_up_to_powers_of_two() {
        assert_eq!(
            TranspositionTable::new(3).num_entries(),
            TranspositionTable::new(4).num_entries()
        );
        assert_eq!(
            TranspositionTable::new(0).num_entries(),
            TranspositionTable::new(1).num_entries()
        );
    }
}
