//! End-to-end game scenarios played through the public API.

use chess_core::{Color, PieceKind, Square};
use chess_engine::{Board, Game, GameError, GameResult, GameStatus};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(game: &mut Game, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        if let Err(e) = game.make_move(from, to) {
            panic!("{from}-{to} rejected: {e}");
        }
    }
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")]);

    let state = game.state();
    assert_eq!(state.result, Some(GameResult::Checkmate));
    assert_eq!(state.winner, Some(Color::Black));
    assert!(state.is_game_over);
    assert_eq!(game.history_string(), "1. f3\n1. e5\n2. g4\n2. Qh4#");
}

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
            ("h5", "f7"),
        ],
    );

    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
    let last = game.move_history().last().unwrap();
    assert_eq!(last.notation(), "Qxf7#");
    assert_eq!(last.number(), 4);
    assert_eq!(game.state().captured_pieces.len(), 1);
}

#[test]
fn illegal_long_pawn_move() {
    let mut game = Game::new();
    assert!(matches!(
        game.make_move("e2", "e6"),
        Err(GameError::IllegalMove { .. })
    ));
}

#[test]
fn pawn_pushes_from_start() {
    for (to, legal) in [("e3", true), ("e4", true), ("e5", false), ("e6", false), ("d3", false), ("f3", false)] {
        let mut game = Game::new();
        assert_eq!(game.make_move("e2", to).is_ok(), legal, "e2-{to}");
    }
}

#[test]
fn pawn_double_step_only_once() {
    let mut game = Game::new();
    play(&mut game, &[("e2", "e3"), ("a7", "a6")]);
    assert!(game.make_move("e3", "e5").is_err());
    game.make_move("e3", "e4").unwrap();
}

#[test]
fn capture_bookkeeping() {
    let mut game = Game::new();
    play(
        &mut game,
        &[("e2", "e4"), ("e7", "e5"), ("d2", "d4"), ("d7", "d5"), ("e4", "d5")],
    );

    let state = game.state();
    assert_eq!(state.captured_pieces.len(), 1);
    assert_eq!(state.captured_pieces[0].kind, PieceKind::Pawn);
    assert_eq!(state.captured_pieces[0].color, Color::Black);
    assert!(state.move_history[4].is_capture());
    assert_eq!(state.move_history[4].notation(), "xd5");
}

#[test]
fn no_capture_no_bookkeeping() {
    let mut game = Game::new();
    play(&mut game, &[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]);
    assert!(game.state().captured_pieces.is_empty());
}

#[test]
fn pieces_move_as_expected() {
    let cases: &[&[(&str, &str)]] = &[
        &[("g1", "f3")],
        &[("e2", "e4"), ("e7", "e5"), ("f1", "c4")],
        &[("h2", "h4"), ("e7", "e5"), ("h1", "h3")],
        &[("e2", "e4"), ("e7", "e5"), ("d1", "h5")],
        &[("d2", "d4"), ("e7", "e5"), ("d1", "d3")],
        &[("e2", "e4"), ("e7", "e5"), ("e1", "e2")],
    ];
    for moves in cases {
        let mut game = Game::new();
        play(&mut game, moves);
        assert_eq!(game.ply_count(), moves.len());
    }
}

#[test]
fn pinned_piece_cannot_move() {
    let mut game = Game::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(game.legal_moves_from(sq("e2")).is_empty());
    assert!(matches!(
        game.make_move("e2", "c3"),
        Err(GameError::IllegalMove { .. })
    ));
    game.make_move("e1", "d1").unwrap();
}

#[test]
fn must_answer_check() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/3PP3/r3K3 w - - 0 1").unwrap();
    assert!(game.is_check());
    assert!(!game.is_game_over());

    let replies: Vec<String> = game.legal_moves().iter().map(|m| m.to_coordinate()).collect();
    assert_eq!(replies, vec!["e1f2"]);
    assert!(matches!(
        game.make_move("d2", "d3"),
        Err(GameError::IllegalMove { .. })
    ));
}

#[test]
fn back_rank_mate() {
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    game.make_move("a1", "a8").unwrap();
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
    assert_eq!(game.move_history()[0].notation(), "Ra8#");
}

#[test]
fn stalemate() {
    let mut game = Game::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
    game.make_move("f1", "f7").unwrap();
    let state = game.state();
    assert_eq!(state.result, Some(GameResult::Stalemate));
    assert_eq!(state.winner, None);
    assert_eq!(game.make_move("g6", "g5").unwrap_err(), GameError::GameOver);
}

#[test]
fn undo_all_the_way_back() {
    let mut game = Game::new();
    play(
        &mut game,
        &[("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("d8", "d5"), ("b1", "c3")],
    );
    while game.undo() {}
    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.current_player(), Color::White);
    assert!(game.move_history().is_empty());
}

#[test]
fn state_serializes() {
    let mut game = Game::new();
    play(&mut game, &[("e2", "e4")]);
    let json = serde_json::to_value(game.state()).unwrap();
    assert_eq!(json["current_player"], "black");
    assert_eq!(json["is_game_over"], false);
    assert_eq!(json["move_history"][0]["from"], "e2");
    assert_eq!(json["move_history"][0]["notation"], "e4");
    assert_eq!(json["move_history"][0]["piece"]["kind"], "pawn");
}
