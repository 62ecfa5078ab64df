//! Move application and game-state transition.

use crate::board::Board;
use crate::state::GameState;
use chess_core::{Color, File, Move, Offset, PieceKind, Square};

/// Applies a move to a position, returning the new board and state.
///
/// The transition is purely mechanical; legality is the move generator's
/// concern. When no piece occupies `mv.from` the inputs are returned
/// unchanged (a defensive no-op for callers that bypassed validation).
pub fn make_move(board: &Board, state: &GameState, mv: &Move) -> (Board, GameState) {
    let piece = match board.piece_at(mv.from) {
        Some(p) => p,
        None => return (board.clone(), *state),
    };
    let us = state.active_color;

    let is_pawn_move = piece.kind == PieceKind::Pawn;
    let is_capture = board.piece_at(mv.to).is_some() || mv.is_en_passant;
    let captured_kind = board.piece_at(mv.to).map(|p| p.kind);

    let next_board = board.apply_move(mv);

    // Castling rights only ever shrink.
    let mut castling = state.castling;
    match piece.kind {
        PieceKind::King => castling = castling.without_color(us),
        PieceKind::Rook => {
            if mv.from == Square::new(File::H, us.back_rank()) {
                castling = castling.without_kingside(us);
            } else if mv.from == Square::new(File::A, us.back_rank()) {
                castling = castling.without_queenside(us);
            }
        }
        _ => {}
    }
    // Capturing a rook on its own starting corner revokes the captured
    // side's right, no matter what made the capture.
    if captured_kind == Some(PieceKind::Rook) {
        let them = us.opposite();
        if mv.to == Square::new(File::H, them.back_rank()) {
            castling = castling.without_kingside(them);
        } else if mv.to == Square::new(File::A, them.back_rank()) {
            castling = castling.without_queenside(them);
        }
    }

    // En passant target appears only after a pawn double advance.
    let double_push = is_pawn_move
        && (mv.to.rank().index() as i8 - mv.from.rank().index() as i8).abs() == 2;
    let en_passant = if double_push {
        mv.to.offset(Offset::new(0, -us.pawn_direction()))
    } else {
        None
    };

    let halfmove_clock = if is_pawn_move || is_capture {
        0
    } else {
        state.halfmove_clock + 1
    };

    let fullmove_number = match us {
        Color::White => state.fullmove_number,
        Color::Black => state.fullmove_number + 1,
    };

    let next_state = GameState {
        active_color: us.opposite(),
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    };

    (next_board, next_state)
}
