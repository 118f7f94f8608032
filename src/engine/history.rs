//! Position-key history for repetition detection.
//!
//! The search pushes the Zobrist key of every position it enters and pops
//! on unmake; the keys of the actual game (fed in over UCI) seed the ring
//! so repetitions spanning the root are caught too. The buffer is a small
//! power-of-two ring: positions further back than its capacity can no
//! longer repeat anyway once the fifty-move clock is taken into account.

/// Ring capacity, in plies. Must stay a power of two.
pub const HISTORY_CAP: usize = 64;

const MASK: usize = HISTORY_CAP - 1;

/// Ring buffer of the Zobrist keys leading up to the current position.
#[derive(Clone)]
pub struct PositionHistory {
    keys: [u64; HISTORY_CAP],
    len: usize,
}

impl PositionHistory {
    pub fn new() -> PositionHistory {
        PositionHistory {
            keys: [0; HISTORY_CAP],
            len: 0,
        }
    }

    /// Builds a history holding the given keys, oldest first.
    pub fn seeded(keys: &[u64]) -> PositionHistory {
        let mut history = PositionHistory::new();
        for &key in keys {
            history.push(key);
        }
        history
    }

    #[inline]
    pub fn push(&mut self, key: u64) {
        self.keys[self.len & MASK] = key;
        self.len += 1;
    }

    #[inline]
    pub fn pop(&mut self) {
        debug_assert!(self.len > 0);
        self.len -= 1;
    }

    /// Returns true if the most recently pushed position already occurred.
    ///
    /// Only positions an even number of plies back can match, and none
    /// beyond the fifty-move clock: a capture or pawn move resets the
    /// clock and makes every earlier position unreachable.
    pub fn repeated(&self, rule_50: u16) -> bool {
        if self.len == 0 || rule_50 < 4 {
            return false;
        }
        let newest = self.keys[(self.len - 1) & MASK];
        let mut step = 4;
        while step <= rule_50 as usize && step < self.len && step < HISTORY_CAP {
            if self.keys[(self.len - 1 - step) & MASK] == newest {
                return true;
            }
            step += 2;
        }
        false
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for PositionHistory {
    fn default() -> Self {
        PositionHistory::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_a_four_ply_cycle() {
        let mut history = PositionHistory::new();
        for &key in &[10, 20, 30, 40, 10] {
            history.push(key);
        }
        assert!(history.repeated(50));
    }

    #[test]
    fn clock_bounds_the_scan() {
        let mut history = PositionHistory::new();
        for &key in &[10, 20, 30, 40, 10] {
            history.push(key);
        }
        // the repetition lies 4 plies back but the clock says 3
        assert!(!history.repeated(3));
        assert!(history.repeated(4));
    }

    #[test]
    fn odd_distances_never_match() {
        let mut history = PositionHistory::new();
        for &key in &[10, 20, 10, 30, 40, 30] {
            history.push(key);
        }
        // 30 sits 2 plies back, too close to be a repetition
        assert!(!history.repeated(50));
    }

    #[test]
    fn pop_unwinds() {
        let mut history = PositionHistory::new();
        for &key in &[10, 20, 30, 40, 10] {
            history.push(key);
        }
        assert!(history.repeated(50));
        history.pop();
        history.push(99);
        assert!(!history.repeated(50));
    }

    #[test]
    fn wraps_without_false_positives() {
        let mut history = PositionHistory::new();
        for i in 0..(HISTORY_CAP as u64 * 2) {
            history.push(i + 1000);
        }
        history.push(1000 + HISTORY_CAP as u64 * 2 - 4);
        assert!(history.repeated(100));
    }
}
