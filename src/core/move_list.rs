//! Fixed-capacity move containers.
//!
//! Move generation never allocates: moves are written into a stack-resident
//! array of [`MAX_MOVES`] entries, which is more than any legal chess
//! position can produce.
//!
//! [`MAX_MOVES`]: ../masks/constant.MAX_MOVES.html

use std::ops::{Deref, DerefMut};
use std::slice;

use super::masks::MAX_MOVES;
use super::piece_move::Move;

/// A list of moves with a fixed maximum capacity.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl Default for MoveList {
    #[inline]
    fn default() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }
}

impl MoveList {
    /// Appends a move to the list.
    #[inline(always)]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    /// The number of moves in the list.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no moves.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies the moves into a `Vec`.
    pub fn to_vec(&self) -> Vec<Move> {
        self.as_slice().to_vec()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }
}

impl Deref for MoveList {
    type Target = [Move];

    #[inline(always)]
    fn deref(&self) -> &[Move] {
        self.as_slice()
    }
}

impl DerefMut for MoveList {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [Move] {
        self.as_mut_slice()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// By-value iteration, copying each `Move` out of the list.
pub struct MoveIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveIntoIter {
    type Item = Move;

    #[inline(always)]
    fn next(&mut self) -> Option<Move> {
        if self.idx < self.list.len {
            let mv = self.list.moves[self.idx];
            self.idx += 1;
            Some(mv)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.list.len - self.idx;
        (rem, Some(rem))
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveIntoIter;

    #[inline(always)]
    fn into_iter(self) -> MoveIntoIter {
        MoveIntoIter { list: self, idx: 0 }
    }
}

/// A move paired with an ordering score.
#[derive(Copy, Clone, Default, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i16,
}

/// A fixed-capacity list of scored moves, used by the move orderer.
pub struct ScoredMoveList {
    moves: [ScoredMove; MAX_MOVES],
    len: usize,
}

impl Default for ScoredMoveList {
    #[inline]
    fn default() -> Self {
        ScoredMoveList {
            moves: [ScoredMove::default(); MAX_MOVES],
            len: 0,
        }
    }
}

impl ScoredMoveList {
    #[inline(always)]
    pub fn push(&mut self, mv: Move, score: i16) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = ScoredMove { mv, score };
        self.len += 1;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [ScoredMove] {
        &mut self.moves[..self.len]
    }
}

impl Deref for ScoredMoveList {
    type Target = [ScoredMove];

    #[inline(always)]
    fn deref(&self) -> &[ScoredMove] {
        &self.moves[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sq::SQ;

    #[test]
    fn push_and_iterate() {
        let mut list = MoveList::default();
        assert!(list.is_empty());
        list.push(Move::new(SQ::E2, SQ::E4));
        list.push(Move::new(SQ::D2, SQ::D4));
        assert_eq!(list.len(), 2);

        let collected: Vec<Move> = list.clone().into_iter().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0], Move::new(SQ::E2, SQ::E4));
        assert!(list.contains(&Move::new(SQ::D2, SQ::D4)));
    }

    #[test]
    fn scored_sorting() {
        let mut list = ScoredMoveList::default();
        list.push(Move::new(SQ::A2, SQ::A3), 1);
        list.push(Move::new(SQ::B2, SQ::B3), 9);
        list.push(Move::new(SQ::C2, SQ::C3), 5);
        list.as_mut_slice().sort_by_key(|sm| -sm.score);
        assert_eq!(list[0].score, 9);
        assert_eq!(list[2].score, 1);
    }
}
