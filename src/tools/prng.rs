//! A xorshift pseudo-random number generator.
//!
//! Used for generating Zobrist keys and candidate magic numbers. The
//! generator is deterministic for a given seed, which keeps both table sets
//! reproducible from run to run.

/// Pseudo-random number generator based on 64-bit xorshift.
pub struct PRNG {
    seed: u64,
}

impl PRNG {
    /// Creates a PRNG from a non-zero seed.
    #[inline]
    pub fn init(seed: u64) -> PRNG {
        debug_assert_ne!(seed, 0);
        PRNG { seed }
    }

    /// Returns the next pseudo-random `u64`.
    #[inline]
    pub fn rand(&mut self) -> u64 {
        self.rand_change()
    }

    /// Returns a `u64` with, on average, few bits set. Good magic number
    /// candidates are sparse.
    #[inline]
    pub fn sparse_rand(&mut self) -> u64 {
        self.rand_change() & self.rand_change() & self.rand_change()
    }

    fn rand_change(&mut self) -> u64 {
        self.seed ^= self.seed >> 12;
        self.seed ^= self.seed << 25;
        self.seed ^= self.seed >> 27;
        self.seed.wrapping_mul(2_685_821_657_736_338_717)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = PRNG::init(70_026);
        let mut b = PRNG::init(70_026);
        for _ in 0..64 {
            assert_eq!(a.rand(), b.rand());
        }
    }

    #[test]
    fn sparse_is_sparser() {
        let mut prng = PRNG::init(94_062);
        let dense: u32 = (0..256).map(|_| prng.rand().count_ones()).sum();
        let sparse: u32 = (0..256).map(|_| prng.sparse_rand().count_ones()).sum();
        assert!(sparse < dense);
    }
}
