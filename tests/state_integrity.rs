//! Walks real game trees verifying that every piece of incremental state
//! (hash, occupancy, counts, FEN round-trips) stays consistent with a
//! from-scratch recomputation.

use petrel::board::movegen::generate_legal;
use petrel::core::{ALL_PIECE_TYPES, ALL_PLAYERS};
use petrel::Board;

const FENS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
];

fn assert_consistent(board: &Board) {
    assert_eq!(board.zobrist(), board.compute_zobrist());
    let mut occupied = 0u8;
    for &player in ALL_PLAYERS.iter() {
        let mut player_occ = 0u8;
        for &pt in ALL_PIECE_TYPES.iter() {
            let bb = board.piece_bb(player, pt);
            assert_eq!(board.count_piece(player, pt), bb.count_bits());
            player_occ += bb.count_bits();
        }
        assert_eq!(board.get_occupied_player(player).count_bits(), player_occ);
        occupied += player_occ;
    }
    assert_eq!(board.occupied().count_bits(), occupied);
}

fn walk(board: &mut Board, depth: u16) {
    assert_consistent(board);
    if depth == 0 {
        return;
    }
    let fen_before = board.fen();
    let (moves, _) = generate_legal(board);
    for mv in &moves {
        let prior = board.make_move(*mv);
        walk(board, depth - 1);
        board.unmake_move(*mv, prior);
        assert_eq!(board.fen(), fen_before, "unmake of {} drifted", mv);
    }
}

#[test]
fn incremental_state_survives_a_tree_walk() {
    for fen in FENS.iter() {
        let mut board = Board::from_fen(fen).unwrap();
        walk(&mut board, 2);
        assert_eq!(board.fen(), *fen);
    }
}

#[test]
fn full_game_unwinds_to_the_start() {
    // a complete miniature: the Légal trap
    let script = [
        "e2e4", "e7e5", "g1f3", "d7d6", "f1c4", "c8g4", "b1c3", "g7g6", "f3e5",
        "g4d1", "c4f7", "e8e7", "c3d5",
    ];
    let mut board = Board::start_pos();
    let mut trail = Vec::new();
    for text in script.iter() {
        let mv = *board
            .generate_moves()
            .iter()
            .find(|m| m.to_string() == *text)
            .unwrap_or_else(|| panic!("{} should be legal", text));
        trail.push((mv, board.make_move(mv)));
        assert_consistent(&board);
    }

    // 13. Nd5 is mate
    let (moves, in_check) = generate_legal(&board);
    assert!(moves.is_empty());
    assert!(in_check);

    while let Some((mv, prior)) = trail.pop() {
        board.unmake_move(mv, prior);
    }
    assert_eq!(board.fen(), petrel::board::fen::START_FEN);
}

#[test]
fn repeated_positions_share_a_hash() {
    let mut board = Board::start_pos();
    let script = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for text in script.iter() {
        let mv = *board
            .generate_moves()
            .iter()
            .find(|m| m.to_string() == *text)
            .unwrap();
        board.make_move(mv);
    }
    // same placement, side, rights; the clocks differ but are unhashed
    assert_eq!(board.zobrist(), Board::start_pos().zobrist());
    assert_ne!(board.fen(), Board::start_pos().fen());
}
