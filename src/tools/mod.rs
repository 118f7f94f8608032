//! Supporting machinery: evaluation, the transposition table, and the
//! pseudo-random generator behind the Zobrist and magic tables.

pub mod eval;
pub mod prng;
pub mod tt;
