//! Global lookup tables: magic sliding-piece attacks, fixed attack boards,
//! and Zobrist seeds. Built once via [`prelude::init_tables`].

pub mod boards;
pub mod magic;
pub mod prelude;
pub mod zobrist;
