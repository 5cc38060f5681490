use std::time::Instant;

use rayon::prelude::*;

use draughts_core::{Board, Variant, perft, perft_divide};

/// Opening node counts. The home blocks are two rows apart, so nothing can
/// be captured before the third ply.
const OPENING_COUNTS: &[(Variant, &[(u8, u64)])] = &[
    (Variant::Standard, &[(1, 9), (2, 81)]),
    (Variant::Frysk, &[(1, 9), (2, 81)]),
    (Variant::Antidraughts, &[(1, 9), (2, 81)]),
    (Variant::Breakthrough, &[(1, 9), (2, 81)]),
    (Variant::Brazilian, &[(1, 7), (2, 49)]),
    (Variant::Russian, &[(1, 7), (2, 49)]),
];

#[test]
fn perft_opening_counts() {
    OPENING_COUNTS.par_iter().for_each(|(variant, depths)| {
        let board = Board::startpos(*variant);
        let start = Instant::now();
        for &(depth, expected) in depths.iter() {
            let got = perft(&board, depth);
            assert!(
                got == expected,
                "Perft mismatch for {} at depth {}: expected {}, got {}",
                variant,
                depth,
                expected,
                got
            );
        }
        println!("{variant} done in {:.3?}", start.elapsed());
    });
}

#[test]
fn perft_depth_zero_is_one_node() {
    let board = Board::startpos(Variant::Standard);
    assert_eq!(perft(&board, 0), 1);
    assert!(perft_divide(&board, 0).is_empty());
}

#[test]
fn divide_matches_perft_where_captures_appear() {
    Variant::ALL.par_iter().for_each(|variant| {
        let board = Board::startpos(*variant);
        let divided = perft_divide(&board, 4);
        assert_eq!(divided.len(), board.get_possible_moves(&[]).len());
        let total: u64 = divided.iter().map(|(_, nodes)| nodes).sum();
        assert_eq!(total, perft(&board, 4), "{variant}");
    });
}

#[test]
fn perft_leaves_the_root_untouched() {
    let board = Board::startpos(Variant::Russian);
    let before = board.to_descriptor();
    perft(&board, 4);
    assert_eq!(board.to_descriptor(), before);
    assert_eq!(board.pieces().iter().filter(|p| p.is_captured()).count(), 0);
}
