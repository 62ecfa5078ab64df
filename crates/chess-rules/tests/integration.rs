//! Integration tests for the chess-rules crate.
//!
//! These drive full games through the public API: notation in, outcomes
//! and FEN out.

use chess_core::Color;
use chess_rules::{replay_movetext, DrawReason, Game, Outcome};

#[test]
fn scholars_mate() {
    let mut game = Game::new();
    for san in ["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"] {
        assert!(game.make_move_san(san).unwrap(), "move {san} should apply");
    }
    assert_eq!(game.result(), Outcome::Win(Color::White));
    assert!(game.is_over());
    assert_eq!(
        game.to_fen(),
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
    );
}

#[test]
fn fools_mate_via_coordinates() {
    let mut game = Game::new();
    for coord in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        assert!(game.make_move_coord(coord).unwrap());
    }
    assert_eq!(game.result(), Outcome::Win(Color::Black));
}

#[test]
fn italian_opening_replay_matches_manual_play() {
    let replayed =
        replay_movetext("1. e4 e5 2. Nf3 {develop} Nc6 3. Bc4 Bc5 (3... Nf6) 4. c3").unwrap();

    let mut manual = Game::new();
    for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "c3"] {
        manual.make_move_san(san).unwrap();
    }
    assert_eq!(replayed.to_fen(), manual.to_fen());
}

#[test]
fn undo_all_restores_starting_fen() {
    let mut game = Game::new();
    let start = game.to_fen();
    for san in ["d4", "d5", "c4", "e6", "Nc3", "Nf6", "Bg5", "Be7"] {
        game.make_move_san(san).unwrap();
    }
    for _ in 0..8 {
        assert!(game.undo());
    }
    assert!(!game.undo());
    assert_eq!(game.to_fen(), start);
    assert_eq!(game.ply_count(), 0);
}

#[test]
fn redo_replays_the_whole_game() {
    let mut game = Game::new();
    for san in ["e4", "c5", "Nf3", "d6", "d4", "cxd4", "Nxd4"] {
        game.make_move_san(san).unwrap();
    }
    let final_fen = game.to_fen();

    for _ in 0..7 {
        assert!(game.undo());
    }
    for _ in 0..7 {
        assert!(game.redo());
    }
    assert!(!game.redo());
    assert_eq!(game.to_fen(), final_fen);
    assert_eq!(game.ply_count(), 7);
}

#[test]
fn en_passant_capture_in_play() {
    let mut game = Game::new();
    for san in ["e4", "a6", "e5", "d5"] {
        game.make_move_san(san).unwrap();
    }
    // The double push just played makes exd6 available for one move.
    assert!(game.make_move_san("exd6").unwrap());
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
    );
}

#[test]
fn promotion_in_play() {
    let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(game.make_move_san("a8=Q").unwrap());
    assert_eq!(game.to_fen(), "Q3k3/8/8/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn threefold_repetition_over_a_real_game() {
    let mut game = Game::new();
    // The starting position counts as the first occurrence, so two full
    // knight shuffles produce the third one.
    for san in ["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1"] {
        game.make_move_san(san).unwrap();
        assert_eq!(game.result(), Outcome::Ongoing);
    }
    game.make_move_san("Ng8").unwrap();
    assert_eq!(
        game.result(),
        Outcome::Draw(DrawReason::ThreefoldRepetition)
    );
}

#[test]
fn fifty_move_draw_over_the_board() {
    let mut game = Game::from_fen("5k2/8/8/8/8/8/8/3QK3 w - - 98 80").unwrap();
    game.make_move_san("Qd2").unwrap();
    assert_eq!(game.result(), Outcome::Ongoing);
    game.make_move_san("Kf7").unwrap();
    assert_eq!(game.result(), Outcome::Draw(DrawReason::FiftyMoveRule));
}

#[test]
fn capture_down_to_bare_kings_is_a_draw() {
    let mut game = Game::from_fen("3qk3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
    assert!(game.make_move_san("Qxd8+").unwrap());
    assert_eq!(game.result(), Outcome::Ongoing);
    assert!(game.make_move_san("Kxd8").unwrap());
    assert_eq!(
        game.result(),
        Outcome::Draw(DrawReason::InsufficientMaterial)
    );
}

#[test]
fn session_survives_fen_round_trip() {
    let mut game = Game::new();
    for san in ["e4", "e5", "Nf3"] {
        game.make_move_san(san).unwrap();
    }
    let resumed = Game::from_fen(&game.to_fen()).unwrap();
    assert_eq!(resumed.to_fen(), game.to_fen());
    assert_eq!(resumed.legal_moves().len(), game.legal_moves().len());
}
