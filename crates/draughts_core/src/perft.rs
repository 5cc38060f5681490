use crate::{
    board::Board,
    types::{Move, Square},
};

/// Pure perft node count.
/// Counts the boards reached `depth` plies below `board`. Each jump of a
/// capture chain is its own ply.
pub fn perft(board: &Board, depth: u8) -> u64 {
    inner(board, depth, &mut Vec::new(), 1)
}

/// Perft split by root move, in move order.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut out: Vec<(Move, u64)> = board
        .get_possible_moves(&[])
        .into_iter()
        .map(|mv| (mv, child_nodes(board, mv, depth, &mut Vec::new(), 1)))
        .collect();
    out.sort_by_key(|(mv, _)| *mv);
    out
}

fn inner(board: &Board, depth: u8, captures: &mut Vec<Square>, move_number: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    board
        .get_possible_moves(captures)
        .into_iter()
        .map(|mv| child_nodes(board, mv, depth, captures, move_number))
        .sum()
}

/// Plays `mv` on a fresh board and counts below it, extending the chain
/// accumulator while the same piece keeps capturing.
fn child_nodes(
    board: &Board,
    mv: Move,
    depth: u8,
    captures: &mut Vec<Square>,
    move_number: u32,
) -> u64 {
    // Moves come from `get_possible_moves`, so they are always accepted.
    let Ok((child, captured)) = board.create_new_board_and_capture(mv, move_number, captures)
    else {
        return 0;
    };
    match captured {
        Some(sq) if child.piece_requiring_further_capture_moves().is_some() => {
            captures.push(sq);
            let nodes = inner(&child, depth - 1, captures, move_number + 1);
            captures.pop();
            nodes
        }
        _ => inner(&child, depth - 1, &mut Vec::new(), move_number + 1),
    }
}
