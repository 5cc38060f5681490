//! Randomised playouts that check the board's invariants after every ply.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use draughts_core::{Board, Move, Player, Square, Variant};

const PLAYOUTS_PER_VARIANT: u64 = 24;
const MAX_PLIES: u32 = 200;

fn check_index(board: &Board) {
    let index = board.index();
    let uncaptured = board.pieces().iter().filter(|p| !p.is_captured()).count();
    assert_eq!(index.filled_positions().len(), uncaptured);
    assert_eq!(index.uncaptured_pieces().len(), uncaptured);
    assert_eq!(
        index.filled_positions().len() + index.open_positions().len(),
        board.position_count()
    );
    for &sq in index.filled_positions() {
        let slot = index.get_piece_by_position(sq).expect("filled square has a piece");
        assert_eq!(board.pieces()[slot].position(), Some(sq));
    }
    for &sq in index.open_positions() {
        assert!(index.get_piece_by_position(sq).is_none());
        assert!(board.position_is_open(sq));
    }
    for player in [Player::Black, Player::White] {
        for &slot in index.get_pieces_by_player(player) {
            assert_eq!(board.pieces()[slot].player(), player);
        }
    }
    assert!(board.pieces().iter().all(|p| p.board_id() == board.id()));
}

fn check_mandatory_capture(board: &Board, captures: &[Square]) -> Vec<Move> {
    let moves = board.get_possible_moves(captures);
    let capture_moves = board.get_possible_capture_moves(captures);
    if !capture_moves.is_empty() {
        assert_eq!(moves, capture_moves);
    }
    if board.piece_requiring_further_capture_moves().is_some() {
        assert_eq!(moves, capture_moves);
    }
    moves
}

fn playout(variant: Variant, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::startpos(variant);
    let mut captures: Vec<Square> = Vec::new();

    for move_number in 1..=MAX_PLIES {
        check_index(&board);
        let moves = check_mandatory_capture(&board, &captures);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];

        let before = board.to_descriptor();
        let turn = board.player_turn();
        let (next, captured) = board
            .create_new_board_and_capture(mv, move_number, &captures)
            .unwrap_or_else(|err| panic!("{variant} seed {seed}: {mv} rejected: {err}"));
        assert_eq!(board.to_descriptor(), before, "parent changed by {mv}");

        match next.piece_requiring_further_capture_moves() {
            Some(pinned) => {
                let captured = captured.expect("only a capture can pin a piece");
                assert_eq!(next.player_turn(), turn);
                assert_eq!(pinned.position(), Some(mv.to));
                captures.push(captured);
            }
            None => {
                assert_eq!(next.player_turn(), turn.other());
                captures.clear();
            }
        }
        board = next;
    }
}

#[test]
fn random_playouts_keep_the_invariants() {
    let jobs: Vec<(Variant, u64)> = Variant::ALL
        .iter()
        .flat_map(|&variant| (0..PLAYOUTS_PER_VARIANT).map(move |seed| (variant, seed)))
        .collect();
    jobs.par_iter().for_each(|&(variant, seed)| playout(variant, seed));
}

#[test]
fn sibling_boards_are_isolated() {
    let board = Board::startpos(Variant::Standard);
    let moves = board.get_possible_moves(&[]);
    let children: Vec<Board> = moves
        .par_iter()
        .map(|&mv| board.create_new_board_from_move(mv, 1, &[]).expect("legal move"))
        .collect();

    for (mv, child) in moves.iter().zip(&children) {
        assert!(child.position_is_open(mv.from));
        assert!(!child.position_is_open(mv.to));
        for (other_mv, other) in moves.iter().zip(&children) {
            if other_mv == mv {
                continue;
            }
            assert_ne!(other.id(), child.id());
            if other_mv.from != mv.from {
                assert!(!other.position_is_open(mv.from));
            }
        }
    }
    assert_eq!(board.index().open_positions().len(), 10);
}
