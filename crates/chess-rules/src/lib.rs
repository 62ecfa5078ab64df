//! Complete chess rules: board state, move generation, and game outcomes.
//!
//! This crate provides:
//! - [`Board`] - 64-square piece placement with copy-on-write move application
//! - [`GameState`] - The non-placement half of a position (side to move,
//!   castling rights, en-passant target, clocks)
//! - [`Game`] - Complete game management with undo/redo and repetition tracking
//! - Legal move generation, check detection, and outcome classification
//! - FEN parsing/rendering, SAN and coordinate notation, PGN movetext replay
//! - Perft for move generator validation
//!
//! # Architecture
//!
//! The board is a plain 64-slot array of optional pieces. Position-changing
//! operations never mutate in place: [`Board::apply_move`] and [`make_move`]
//! return fresh values, which keeps history tracking in [`Game`] a matter of
//! stacking snapshots.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Board, Game, GameState, legal_moves};
//!
//! // Stateless: query a position directly.
//! let moves = legal_moves(&Board::standard(), &GameState::initial());
//! println!("Legal moves from the starting position: {}", moves.len());
//!
//! // Stateful: play a game.
//! let mut game = Game::new();
//! game.make_move_san("e4").unwrap();
//! game.make_move_san("e5").unwrap();
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//! ```

mod apply;
mod attacks;
mod board;
mod fen;
mod game;
mod movegen;
pub mod perft;
pub mod pgn;
pub mod san;
mod state;

pub use apply::make_move;
pub use attacks::{has_insufficient_material, is_king_in_check, is_square_attacked_by};
pub use board::Board;
pub use fen::{parse_fen, render_fen, render_placement};
pub use game::{outcome, DrawReason, Game, GameMove, Outcome, PositionKey};
pub use movegen::{legal_moves, pseudo_legal_moves};
pub use perft::{perft, perft_divide};
pub use pgn::{render_movetext, replay_movetext, replay_movetext_from, tokenize_movetext, PgnError};
pub use san::{coord_to_move, move_to_san, san_to_move, SanError};
pub use state::{CastlingAvailability, CastlingRights, GameState};
