//! Bit masks and table-size constants used throughout the crate.

/// The total number of players on a chessboard.
pub const PLAYER_CNT: usize = 2;
/// The total number of piece types, including the empty type.
pub const PIECE_TYPE_CNT: usize = 7;
/// The total number of (player, piece type) identities; indexed sparsely,
/// see [`Piece`](../enum.Piece.html).
pub const PIECE_CNT: usize = 16;
/// The total number of squares on a chessboard.
pub const SQ_CNT: usize = 64;
/// The total number of files on a chessboard.
pub const FILE_CNT: usize = 8;
/// The total number of ranks on a chessboard.
pub const RANK_CNT: usize = 8;
/// The number of castling sides per player: king side and queen side.
pub const CASTLING_SIDES: usize = 2;
/// The number of distinct castling-rights combinations for both players.
pub const ALL_CASTLING_RIGHTS: usize = 16;
/// Maximum number of legal moves reachable from any position.
pub const MAX_MOVES: usize = 256;

/// Bit representation of file A.
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
/// Bit representation of file B.
pub const FILE_B: u64 = FILE_A << 1;
/// Bit representation of file C.
pub const FILE_C: u64 = FILE_A << 2;
/// Bit representation of file D.
pub const FILE_D: u64 = FILE_A << 3;
/// Bit representation of file E.
pub const FILE_E: u64 = FILE_A << 4;
/// Bit representation of file F.
pub const FILE_F: u64 = FILE_A << 5;
/// Bit representation of file G.
pub const FILE_G: u64 = FILE_A << 6;
/// Bit representation of file H.
pub const FILE_H: u64 = FILE_A << 7;

/// Bit representation of rank 1.
pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
/// Bit representation of rank 2.
pub const RANK_2: u64 = RANK_1 << 8;
/// Bit representation of rank 3.
pub const RANK_3: u64 = RANK_1 << 16;
/// Bit representation of rank 4.
pub const RANK_4: u64 = RANK_1 << 24;
/// Bit representation of rank 5.
pub const RANK_5: u64 = RANK_1 << 32;
/// Bit representation of rank 6.
pub const RANK_6: u64 = RANK_1 << 40;
/// Bit representation of rank 7.
pub const RANK_7: u64 = RANK_1 << 48;
/// Bit representation of rank 8.
pub const RANK_8: u64 = RANK_1 << 56;

/// All files, indexed file A through file H.
pub static FILE_BB: [u64; FILE_CNT] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];

/// All ranks, indexed rank 1 through rank 8.
pub static RANK_BB: [u64; RANK_CNT] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
];

/// Direction of going north on a chessboard.
pub const NORTH: i8 = 8;
/// Direction of going south on a chessboard.
pub const SOUTH: i8 = -8;
/// Direction of going east on a chessboard.
pub const EAST: i8 = 1;
/// Direction of going west on a chessboard.
pub const WEST: i8 = -1;
/// Direction of going northeast on a chessboard.
pub const NORTH_EAST: i8 = 9;
/// Direction of going northwest on a chessboard.
pub const NORTH_WEST: i8 = 7;
/// Direction of going southeast on a chessboard.
pub const SOUTH_EAST: i8 = -7;
/// Direction of going southwest on a chessboard.
pub const SOUTH_WEST: i8 = -9;

/// Castling-rights bit for white king side.
pub const C_WHITE_K_MASK: u8 = 0b0000_0001;
/// Castling-rights bit for white queen side.
pub const C_WHITE_Q_MASK: u8 = 0b0000_0010;
/// Castling-rights bit for black king side.
pub const C_BLACK_K_MASK: u8 = 0b0000_0100;
/// Castling-rights bit for black queen side.
pub const C_BLACK_Q_MASK: u8 = 0b0000_1000;

// Squares between king and rook that must be empty for castling,
// indexed [player][side] with side 0 = king side.
pub static CASTLE_EMPTY_BB: [[u64; CASTLING_SIDES]; PLAYER_CNT] = [
    [0x0000_0000_0000_0060, 0x0000_0000_0000_000E], // f1 g1 | b1 c1 d1
    [0x6000_0000_0000_0000, 0x0E00_0000_0000_0000], // f8 g8 | b8 c8 d8
];

// Squares the king occupies or passes through while castling; none of them
// may be attacked. Indexed [player][side] with side 0 = king side.
pub static CASTLE_PATH_BB: [[u64; CASTLING_SIDES]; PLAYER_CNT] = [
    [0x0000_0000_0000_0070, 0x0000_0000_0000_001C], // e1 f1 g1 | c1 d1 e1
    [0x7000_0000_0000_0000, 0x1C00_0000_0000_0000], // e8 f8 g8 | c8 d8 e8
];

/// Starting occupancy for the white player.
pub const START_WHITE_OCC: u64 = 0x0000_0000_0000_FFFF;
/// Starting occupancy for the black player.
pub const START_BLACK_OCC: u64 = 0xFFFF_0000_0000_0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_and_ranks_partition_the_board() {
        assert_eq!(FILE_BB.iter().fold(0, |acc, f| acc | f), u64::MAX);
        assert_eq!(RANK_BB.iter().fold(0, |acc, r| acc | r), u64::MAX);
        for (i, f) in FILE_BB.iter().enumerate() {
            for g in FILE_BB.iter().skip(i + 1) {
                assert_eq!(f & g, 0);
            }
        }
    }

    #[test]
    fn castle_masks() {
        for p in 0..PLAYER_CNT {
            for s in 0..CASTLING_SIDES {
                // the empty-squares mask never includes the king square
                let king_bb = if p == 0 { 1u64 << 4 } else { 1u64 << 60 };
                assert_eq!(CASTLE_EMPTY_BB[p][s] & king_bb, 0);
                assert_ne!(CASTLE_PATH_BB[p][s] & king_bb, 0);
            }
        }
    }
}
