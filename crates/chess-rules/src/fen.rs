//! FEN conversion between text and (board, state) pairs.
//!
//! Field-level validation lives in [`chess_core::FenFields`]; this module
//! turns validated fields into a [`Board`] and [`GameState`] and renders
//! them back. Render after parse reproduces the input text exactly.

use crate::board::Board;
use crate::state::{CastlingAvailability, CastlingRights, GameState};
use chess_core::{Color, FenError, FenFields, File, Piece, Rank, Square};

/// Parses a FEN string into a board and game state.
pub fn parse_fen(fen: &str) -> Result<(Board, GameState), FenError> {
    let fields = FenFields::parse(fen)?;

    let mut board = Board::empty();
    for (rank_idx, rank_str) in fields.piece_placement.split('/').enumerate() {
        // FEN lists ranks from 8 down to 1.
        let rank = Rank::from_index(7 - rank_idx as u8)
            .ok_or_else(|| FenError::InvalidPiecePlacement(rank_str.to_string()))?;
        let mut file_idx = 0u8;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                file_idx += digit as u8;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                let file = File::from_index(file_idx)
                    .ok_or_else(|| FenError::InvalidPiecePlacement(rank_str.to_string()))?;
                board.set(Square::new(file, rank), piece);
                file_idx += 1;
            }
        }
    }

    let active_color = match fields.active_color {
        'b' => Color::Black,
        _ => Color::White,
    };

    let mut white = CastlingAvailability::NONE;
    let mut black = CastlingAvailability::NONE;
    for c in fields.castling.chars() {
        match c {
            'K' => white.kingside = true,
            'Q' => white.queenside = true,
            'k' => black.kingside = true,
            'q' => black.queenside = true,
            _ => {}
        }
    }

    let en_passant = if fields.en_passant == "-" {
        None
    } else {
        Some(
            Square::from_algebraic(&fields.en_passant)
                .map_err(|_| FenError::InvalidEnPassantSquare(fields.en_passant.clone()))?,
        )
    };

    let state = GameState {
        active_color,
        castling: CastlingRights::new(white, black),
        en_passant,
        halfmove_clock: fields.halfmove_clock,
        fullmove_number: fields.fullmove_number,
    };

    Ok((board, state))
}

/// Renders a board and game state as a FEN string.
pub fn render_fen(board: &Board, state: &GameState) -> String {
    format!(
        "{} {} {} {} {} {}",
        render_placement(board),
        match state.active_color {
            Color::White => 'w',
            Color::Black => 'b',
        },
        render_castling(state.castling),
        state
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic()),
        state.halfmove_clock,
        state.fullmove_number
    )
}

/// Renders only the piece-placement field.
pub fn render_placement(board: &Board) -> String {
    let mut placement = String::new();
    for (i, rank) in Rank::ALL.iter().rev().enumerate() {
        if i > 0 {
            placement.push('/');
        }
        let mut empty_run = 0;
        for file in File::ALL {
            match board.piece_at(Square::new(file, *rank)) {
                Some(piece) => {
                    if empty_run > 0 {
                        placement.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    placement.push(piece.to_fen_char());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            placement.push_str(&empty_run.to_string());
        }
    }
    placement
}

fn render_castling(castling: CastlingRights) -> String {
    let mut s = String::new();
    if castling.kingside(Color::White) {
        s.push('K');
    }
    if castling.queenside(Color::White) {
        s.push('Q');
    }
    if castling.kingside(Color::Black) {
        s.push('k');
    }
    if castling.queenside(Color::Black) {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}
