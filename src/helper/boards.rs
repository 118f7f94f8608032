//! Fixed per-square attack tables for the non-sliding pieces, plus the
//! between-squares and line tables used for pin and check reasoning.

use std::ptr;

use crate::core::masks::*;
use crate::core::sq::SQ;
use crate::core::Player;

use super::magic::{sliding_attack, B_DELTAS, R_DELTAS};

static mut KNIGHT_TABLE: [u64; SQ_CNT] = [0; SQ_CNT];
static mut KING_TABLE: [u64; SQ_CNT] = [0; SQ_CNT];
static mut PAWN_ATTACKS_FROM: [[u64; SQ_CNT]; PLAYER_CNT] = [[0; SQ_CNT]; PLAYER_CNT];
static mut BETWEEN_TABLE: [[u64; SQ_CNT]; SQ_CNT] = [[0; SQ_CNT]; SQ_CNT];
static mut LINE_TABLE: [[u64; SQ_CNT]; SQ_CNT] = [[0; SQ_CNT]; SQ_CNT];

const KNIGHT_DELTAS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_DELTAS: [i8; 8] = [
    NORTH, SOUTH, EAST, WEST, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST,
];

/// Knight attack mask for a square.
#[inline(always)]
pub fn knight_moves(sq: SQ) -> u64 {
    debug_assert!(sq.is_okay());
    unsafe { *(ptr::addr_of!(KNIGHT_TABLE) as *const u64).add(sq.0 as usize) }
}

/// King attack mask for a square.
#[inline(always)]
pub fn king_moves(sq: SQ) -> u64 {
    debug_assert!(sq.is_okay());
    unsafe { *(ptr::addr_of!(KING_TABLE) as *const u64).add(sq.0 as usize) }
}

/// Squares a pawn of `player` standing on `sq` attacks.
#[inline(always)]
pub fn pawn_attacks_from(sq: SQ, player: Player) -> u64 {
    debug_assert!(sq.is_okay());
    unsafe {
        *(ptr::addr_of!(PAWN_ATTACKS_FROM) as *const u64)
            .add(player as usize * SQ_CNT + sq.0 as usize)
    }
}

/// The squares strictly between two squares on a shared rank, file, or
/// diagonal, or the empty mask if they share none.
#[inline(always)]
pub fn between_bb(a: SQ, b: SQ) -> u64 {
    debug_assert!(a.is_okay() && b.is_okay());
    unsafe {
        *(ptr::addr_of!(BETWEEN_TABLE) as *const u64).add(a.0 as usize * SQ_CNT + b.0 as usize)
    }
}

/// The full line (edge to edge) through two aligned squares, including
/// both, or the empty mask if they are not aligned.
#[inline(always)]
pub fn line_bb(a: SQ, b: SQ) -> u64 {
    debug_assert!(a.is_okay() && b.is_okay());
    unsafe { *(ptr::addr_of!(LINE_TABLE) as *const u64).add(a.0 as usize * SQ_CNT + b.0 as usize) }
}

/// Returns true if three squares lie on one rank, file, or diagonal.
#[inline(always)]
pub fn aligned(a: SQ, b: SQ, c: SQ) -> bool {
    line_bb(a, b) & (1u64 << c.0) != 0
}

#[cold]
pub fn init_boards() {
    unsafe {
        gen_knight_table();
        gen_king_table();
        gen_pawn_attacks();
        gen_between_and_line();
    }
}

#[cold]
unsafe fn gen_knight_table() {
    let table = ptr::addr_of_mut!(KNIGHT_TABLE) as *mut u64;
    for s in 0..SQ_CNT as u8 {
        let mut mask: u64 = 0;
        for &delta in KNIGHT_DELTAS.iter() {
            let t = s as i16 + delta as i16;
            if (0..64).contains(&t) && SQ(s).distance(SQ(t as u8)) <= 2 {
                mask |= 1u64 << t;
            }
        }
        *table.add(s as usize) = mask;
    }
}

#[cold]
unsafe fn gen_king_table() {
    let table = ptr::addr_of_mut!(KING_TABLE) as *mut u64;
    for s in 0..SQ_CNT as u8 {
        let mut mask: u64 = 0;
        for &delta in KING_DELTAS.iter() {
            let t = s as i16 + delta as i16;
            if (0..64).contains(&t) && SQ(s).distance(SQ(t as u8)) == 1 {
                mask |= 1u64 << t;
            }
        }
        *table.add(s as usize) = mask;
    }
}

#[cold]
unsafe fn gen_pawn_attacks() {
    let table = ptr::addr_of_mut!(PAWN_ATTACKS_FROM) as *mut u64;
    for s in 0..SQ_CNT as u8 {
        let bb = 1u64 << s;
        let white = ((bb << 9) & !FILE_A) | ((bb << 7) & !FILE_H);
        let black = ((bb >> 7) & !FILE_A) | ((bb >> 9) & !FILE_H);
        *table.add(s as usize) = white;
        *table.add(SQ_CNT + s as usize) = black;
    }
}

#[cold]
unsafe fn gen_between_and_line() {
    let between = ptr::addr_of_mut!(BETWEEN_TABLE) as *mut u64;
    let line = ptr::addr_of_mut!(LINE_TABLE) as *mut u64;
    for a in 0..SQ_CNT as u8 {
        for b in 0..SQ_CNT as u8 {
            let idx = a as usize * SQ_CNT + b as usize;
            for deltas in [&R_DELTAS, &B_DELTAS] {
                if sliding_attack(deltas, a, 0) & (1u64 << b) != 0 {
                    *between.add(idx) =
                        sliding_attack(deltas, a, 1u64 << b) & sliding_attack(deltas, b, 1u64 << a);
                    *line.add(idx) = (sliding_attack(deltas, a, 0) & sliding_attack(deltas, b, 0))
                        | (1u64 << a)
                        | (1u64 << b);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::prelude::init_tables;

    #[test]
    fn knight_counts() {
        init_tables();
        assert_eq!(knight_moves(SQ::A1).count_ones(), 2);
        assert_eq!(knight_moves(SQ::E4).count_ones(), 8);
        assert_eq!(knight_moves(SQ::G1), SQ::E2.to_bb().0 | SQ::F3.to_bb().0 | SQ::H3.to_bb().0);
    }

    #[test]
    fn king_counts() {
        init_tables();
        assert_eq!(king_moves(SQ::A1).count_ones(), 3);
        assert_eq!(king_moves(SQ::A4).count_ones(), 5);
        assert_eq!(king_moves(SQ::E4).count_ones(), 8);
    }

    #[test]
    fn pawn_attack_edges() {
        init_tables();
        assert_eq!(
            pawn_attacks_from(SQ::E2, Player::White),
            SQ::D3.to_bb().0 | SQ::F3.to_bb().0
        );
        assert_eq!(pawn_attacks_from(SQ::A2, Player::White), SQ::B3.to_bb().0);
        assert_eq!(pawn_attacks_from(SQ::H7, Player::Black), SQ::G6.to_bb().0);
    }

    #[test]
    fn between_and_line() {
        init_tables();
        assert_eq!(between_bb(SQ::A1, SQ::A4), SQ::A2.to_bb().0 | SQ::A3.to_bb().0);
        assert_eq!(between_bb(SQ::A1, SQ::C3), SQ::B2.to_bb().0);
        assert_eq!(between_bb(SQ::A1, SQ::B3), 0);
        assert!(aligned(SQ::A1, SQ::H8, SQ::D4));
        assert!(!aligned(SQ::A1, SQ::H8, SQ::D5));
        // adjacent aligned squares have an empty between mask but a full line
        assert_eq!(between_bb(SQ::E4, SQ::E5), 0);
        assert_ne!(line_bb(SQ::E4, SQ::E5), 0);
    }
}
