use super::*;
use crate::error::BoardError;

fn descriptor(variant: Variant, turn: char, placements: &[(Square, char)]) -> String {
    let mut body = vec!['e'; variant.rules().position_count()];
    for &(sq, ch) in placements {
        body[sq as usize - 1] = ch;
    }
    std::iter::once(turn).chain(body).collect()
}

#[test]
fn test_new_game_starts_with_white() {
    let game = Game::startpos(Variant::Standard);
    assert_eq!(game.whose_turn(), Player::White);
    assert_eq!(game.legal_moves().len(), 9);
    assert!(!game.is_over());
    assert_eq!(game.winner(), None);
}

#[test]
fn test_push_move_tracks_the_chain() {
    let setup = descriptor(
        Variant::Standard,
        'W',
        &[(33, 'w'), (46, 'w'), (28, 'b'), (17, 'b'), (29, 'b'), (20, 'b')],
    );
    let mut game = Game::new(Variant::Standard, &setup).unwrap();

    assert_eq!(game.push_move(Move::new(33, 22)), Ok(Some(28)));
    assert_eq!(game.chain_captures(), &[28]);
    assert_eq!(game.whose_turn(), Player::White);
    assert_eq!(game.legal_moves(), vec![Move::new(22, 11)]);

    assert_eq!(
        game.push_move(Move::new(46, 41)),
        Err(MoveError::ChainPending { pinned: 22 })
    );
    assert_eq!(game.moves().len(), 1);

    assert_eq!(game.push_move(Move::new(22, 11)), Ok(Some(17)));
    assert!(game.chain_captures().is_empty());
    assert_eq!(game.whose_turn(), Player::Black);
}

#[test]
fn test_replay_reports_the_failing_ply() {
    let moves = [Move::new(32, 28), Move::new(32, 27)];
    match Game::replay(Variant::Standard, STARTPOS, moves) {
        Err(GameError::Replay { ply, mv, source }) => {
            assert_eq!(ply, 1);
            assert_eq!(mv, Move::new(32, 27));
            assert_eq!(source, MoveError::EmptySquare(32));
        }
        other => panic!("expected a replay error, got {other:?}"),
    }

    assert!(matches!(
        Game::replay(Variant::Standard, "W", Vec::new()),
        Err(GameError::Board(BoardError::DescriptorLength { .. }))
    ));
}

#[test]
fn test_side_without_moves_loses_or_wins() {
    let setup = descriptor(Variant::Standard, 'W', &[(33, 'w'), (28, 'b')]);
    let mut game = Game::new(Variant::Standard, &setup).unwrap();
    game.push_move(Move::new(33, 22)).unwrap();
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Player::White));

    let setup = descriptor(Variant::Antidraughts, 'W', &[(33, 'w'), (28, 'b')]);
    let mut game = Game::new(Variant::Antidraughts, &setup).unwrap();
    game.push_move(Move::new(33, 22)).unwrap();
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Player::Black));
}

#[test]
fn test_first_king_wins_breakthrough() {
    let setup = descriptor(Variant::Breakthrough, 'W', &[(13, 'w'), (8, 'b'), (30, 'b')]);
    let mut game = Game::new(Variant::Breakthrough, &setup).unwrap();
    assert!(!game.is_over());

    game.push_move(Move::new(13, 2)).unwrap();
    assert!(!game.legal_moves().is_empty());
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Player::White));
}

#[test]
fn test_record_survives_json() {
    let mut game = Game::startpos(Variant::Standard);
    game.push_move(Move::new(32, 28)).unwrap();
    game.push_move(Move::new(19, 23)).unwrap();
    assert_eq!(game.push_move(Move::new(28, 19)), Ok(Some(23)));

    let json = serde_json::to_string(&game.record()).unwrap();
    let record: GameRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(record, game.record());

    let replayed = Game::from_record(&record).unwrap();
    assert_eq!(replayed.to_descriptor(), game.to_descriptor());
    assert_eq!(replayed.whose_turn(), Player::Black);
}
