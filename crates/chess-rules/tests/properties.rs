//! Property-based tests over randomly played games.
//!
//! A game is driven from the starting position by a list of indices into
//! the legal-move list, which makes every generated sequence legal by
//! construction.

use chess_rules::{
    is_king_in_check, legal_moves, make_move, parse_fen, render_fen, Board, Game, GameState,
};
use proptest::prelude::*;

/// Plays the index sequence out from the starting position, stopping at
/// game end. Returns the game with its full history.
fn play_random_game(picks: &[usize]) -> Game {
    let mut game = Game::new();
    for &pick in picks {
        let moves = game.legal_moves();
        if moves.is_empty() || game.is_over() {
            break;
        }
        let mv = moves[pick % moves.len()];
        assert!(game.make_move(&mv));
    }
    game
}

proptest! {
    #[test]
    fn legal_moves_never_leave_own_king_attacked(picks in prop::collection::vec(0usize..256, 0..40)) {
        let game = play_random_game(&picks);
        let board = game.board();
        let state = game.state();
        for mv in legal_moves(board, state) {
            let (next_board, _) = make_move(board, state, &mv);
            prop_assert!(
                !is_king_in_check(state.active_color, &next_board),
                "{mv} leaves the {} king attacked",
                state.active_color
            );
        }
    }

    #[test]
    fn undoing_everything_restores_the_start(picks in prop::collection::vec(0usize..256, 0..40)) {
        let mut game = play_random_game(&picks);
        let plies = game.ply_count();
        for _ in 0..plies {
            prop_assert!(game.undo());
        }
        prop_assert_eq!(game.board(), &Board::standard());
        prop_assert_eq!(game.state(), &GameState::initial());
    }

    #[test]
    fn fen_round_trips_along_random_games(picks in prop::collection::vec(0usize..256, 0..40)) {
        let game = play_random_game(&picks);
        let fen = render_fen(game.board(), game.state());
        let (board, state) = parse_fen(&fen).unwrap();
        prop_assert_eq!(&board, game.board());
        prop_assert_eq!(&state, game.state());
        prop_assert_eq!(render_fen(&board, &state), fen);
    }

    #[test]
    fn san_round_trips_in_reached_positions(picks in prop::collection::vec(0usize..256, 0..12)) {
        let game = play_random_game(&picks);
        for mv in game.legal_moves() {
            let san = game.move_to_san(&mv);
            let resolved = game.san_to_move(&san);
            prop_assert_eq!(resolved, Ok(mv), "SAN {} did not round-trip", san);
        }
    }

    #[test]
    fn clocks_and_colors_stay_consistent(picks in prop::collection::vec(0usize..256, 0..40)) {
        let game = play_random_game(&picks);
        let state = game.state();
        // One color flip per ply from White's start.
        let expected_color = if game.ply_count() % 2 == 0 {
            chess_core::Color::White
        } else {
            chess_core::Color::Black
        };
        prop_assert_eq!(state.active_color, expected_color);
        prop_assert_eq!(
            state.fullmove_number as usize,
            1 + game.ply_count() / 2
        );
        prop_assert!((state.halfmove_clock as usize) <= game.ply_count());
    }
}
