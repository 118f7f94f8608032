//! Search limits and the time-allocation tiers.
//!
//! Allocation is deliberately coarse: a fixed budget per move chosen from
//! the remaining clock, plus half the increment. `movetime` is obeyed as
//! given, minus a small margin so the reply leaves the process before the
//! GUI's clock runs down.

use std::time::Duration;

use crate::core::Player;

/// Safety margin shaved off an explicit `movetime`, in milliseconds.
const MOVE_TIME_MARGIN_MS: u64 = 50;

/// Everything a `go` command may constrain the search by.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub infinite: bool,
    /// Fixed search depth in plies.
    pub depth: Option<u16>,
    /// Exact time for this move, in milliseconds.
    pub move_time: Option<u64>,
    /// Remaining clock per side, in milliseconds.
    pub white_time: Option<u64>,
    pub black_time: Option<u64>,
    /// Increment per move per side, in milliseconds.
    pub white_inc: Option<u64>,
    pub black_inc: Option<u64>,
}

impl Limits {
    pub fn infinite() -> Limits {
        Limits {
            infinite: true,
            ..Limits::default()
        }
    }

    pub fn depth(depth: u16) -> Limits {
        Limits {
            depth: Some(depth),
            ..Limits::default()
        }
    }
}

/// Picks the wall-clock budget for one move, or `None` when the search
/// should run until told to stop.
pub fn think_time(limits: &Limits, turn: Player) -> Option<Duration> {
    if limits.infinite || limits.depth.is_some() {
        return None;
    }
    if let Some(move_time) = limits.move_time {
        return Some(Duration::from_millis(
            move_time.saturating_sub(MOVE_TIME_MARGIN_MS).max(1),
        ));
    }
    let (remaining, inc) = match turn {
        Player::White => (limits.white_time, limits.white_inc),
        Player::Black => (limits.black_time, limits.black_inc),
    };
    let remaining = remaining?;
    let base: u64 = if remaining >= 600_000 {
        10_000
    } else if remaining >= 180_000 {
        5_000
    } else if remaining >= 60_000 {
        2_000
    } else if remaining >= 10_000 {
        500
    } else {
        100
    };
    Some(Duration::from_millis(base + inc.unwrap_or(0) / 2))
}
