//! Board-independent primitives: players, pieces, squares, bitboards,
//! moves, and move lists.

#[macro_use]
pub mod macros;

pub mod bit_twiddles;
pub mod bitboard;
pub mod masks;
pub mod move_list;
pub mod piece_move;
pub mod sq;

use std::fmt;
use std::mem;
use std::ops::Not;

/// Either side of a chess game.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    /// Returns the opposing player.
    #[inline(always)]
    pub fn other_player(self) -> Player {
        unsafe { mem::transmute(self as u8 ^ 1) }
    }

    /// Returns the rank a pawn of this player promotes on.
    #[inline(always)]
    pub fn promotion_rank(self) -> Rank {
        match self {
            Player::White => Rank::R8,
            Player::Black => Rank::R1,
        }
    }

    /// Returns the rank this player's pawns double-push from.
    #[inline(always)]
    pub fn pawn_start_rank(self) -> Rank {
        match self {
            Player::White => Rank::R2,
            Player::Black => Rank::R7,
        }
    }

    /// The direction this player's pawns advance, in square-index offset.
    #[inline(always)]
    pub fn pawn_push(self) -> i8 {
        match self {
            Player::White => masks::NORTH,
            Player::Black => masks::SOUTH,
        }
    }
}

impl Not for Player {
    type Output = Player;

    #[inline(always)]
    fn not(self) -> Player {
        self.other_player()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Player::White => "White",
            Player::Black => "Black",
        })
    }
}

/// All players, for iteration.
pub static ALL_PLAYERS: [Player; 2] = [Player::White, Player::Black];

/// The type of a piece, without the owning player.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum PieceType {
    None = 0,
    P = 1,
    N = 2,
    B = 3,
    R = 4,
    Q = 5,
    K = 6,
}

impl PieceType {
    /// Returns the promotion piece for a 2-bit selector, `0 => N .. 3 => Q`.
    #[inline(always)]
    pub fn from_promo_bits(bits: u8) -> PieceType {
        debug_assert!(bits < 4);
        unsafe { mem::transmute(bits + 2) }
    }

    /// Returns the 2-bit promotion selector for this piece type.
    ///
    /// Only valid for `N`, `B`, `R`, and `Q`.
    #[inline(always)]
    pub fn promo_bits(self) -> u8 {
        debug_assert!(self >= PieceType::N && self <= PieceType::Q);
        self as u8 - 2
    }

    /// Lowercase character for this piece type, as used in FEN and UCI.
    pub fn char_lower(self) -> char {
        match self {
            PieceType::None => ' ',
            PieceType::P => 'p',
            PieceType::N => 'n',
            PieceType::B => 'b',
            PieceType::R => 'r',
            PieceType::Q => 'q',
            PieceType::K => 'k',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.char_lower())
    }
}

/// All real piece types, for iteration.
pub static ALL_PIECE_TYPES: [PieceType; 6] = [
    PieceType::P,
    PieceType::N,
    PieceType::B,
    PieceType::R,
    PieceType::Q,
    PieceType::K,
];

/// A piece together with its owning player.
///
/// The discriminant packs the player into bit 3 and the [`PieceType`] into
/// bits 0-2, so a piece's color is derivable from its numeric range and
/// conversion in either direction is a mask.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Piece {
    None = 0,
    WhiteP = 1,
    WhiteN = 2,
    WhiteB = 3,
    WhiteR = 4,
    WhiteQ = 5,
    WhiteK = 6,
    BlackP = 9,
    BlackN = 10,
    BlackB = 11,
    BlackR = 12,
    BlackQ = 13,
    BlackK = 14,
}

impl Piece {
    /// Builds a `Piece` from a player and a non-`None` piece type.
    #[inline(always)]
    pub fn make(player: Player, pt: PieceType) -> Piece {
        debug_assert_ne!(pt, PieceType::None);
        unsafe { mem::transmute(((player as u8) << 3) | pt as u8) }
    }

    /// Returns the type of this piece, discarding the player.
    #[inline(always)]
    pub fn type_of(self) -> PieceType {
        unsafe { mem::transmute(self as u8 & 0b111) }
    }

    /// Returns the owning player, or `None` for the empty piece.
    #[inline(always)]
    pub fn player(self) -> Option<Player> {
        if self == Piece::None {
            None
        } else {
            Some(self.player_lossy())
        }
    }

    /// Returns the owning player without checking for the empty piece.
    #[inline(always)]
    pub fn player_lossy(self) -> Player {
        debug_assert_ne!(self, Piece::None);
        unsafe { mem::transmute((self as u8) >> 3) }
    }

    /// FEN character: uppercase for white, lowercase for black.
    pub fn char(self) -> char {
        let c = self.type_of().char_lower();
        match self.player() {
            Some(Player::White) => c.to_ascii_uppercase(),
            _ => c,
        }
    }

    /// Parses a FEN piece character.
    pub fn from_char(c: char) -> Option<Piece> {
        let pt = match c.to_ascii_lowercase() {
            'p' => PieceType::P,
            'n' => PieceType::N,
            'b' => PieceType::B,
            'r' => PieceType::R,
            'q' => PieceType::Q,
            'k' => PieceType::K,
            _ => return None,
        };
        let player = if c.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Some(Piece::make(player, pt))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A file (column) of the board, file A through file H.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    #[inline(always)]
    pub fn from_index(idx: u8) -> File {
        debug_assert!(idx < 8);
        unsafe { mem::transmute(idx) }
    }

    /// The bitboard mask of this file.
    #[inline(always)]
    pub fn bb(self) -> u64 {
        masks::FILE_BB[self as usize]
    }
}

/// A rank (row) of the board, rank 1 through rank 8.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    #[inline(always)]
    pub fn from_index(idx: u8) -> Rank {
        debug_assert!(idx < 8);
        unsafe { mem::transmute(idx) }
    }

    /// The bitboard mask of this rank.
    #[inline(always)]
    pub fn bb(self) -> u64 {
        masks::RANK_BB[self as usize]
    }
}

/// The two sides a player may castle towards.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CastleType {
    KingSide = 0,
    QueenSide = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_flip() {
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(Player::Black.other_player(), Player::White);
    }

    #[test]
    fn piece_packing() {
        for &player in ALL_PLAYERS.iter() {
            for &pt in ALL_PIECE_TYPES.iter() {
                let piece = Piece::make(player, pt);
                assert_eq!(piece.type_of(), pt);
                assert_eq!(piece.player(), Some(player));
                assert_eq!(Piece::from_char(piece.char()), Some(piece));
            }
        }
        assert_eq!(Piece::None.type_of(), PieceType::None);
        assert_eq!(Piece::None.player(), None);
    }

    #[test]
    fn promo_bits_round_trip() {
        for bits in 0..4 {
            assert_eq!(PieceType::from_promo_bits(bits).promo_bits(), bits);
        }
        assert_eq!(PieceType::from_promo_bits(3), PieceType::Q);
    }
}
