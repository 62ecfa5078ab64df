//! Pseudo-legal and legal move generation.
//!
//! One generator per piece kind produces candidate moves that ignore king
//! safety; [`legal_moves`] filters them by simulating each candidate and
//! rejecting those that leave the mover's own king in check.

use crate::attacks::{
    is_king_in_check, is_square_attacked_by, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS,
};
use crate::board::Board;
use crate::state::GameState;
use chess_core::{Color, File, Move, Offset, PieceKind, Square};

/// Generates every pseudo-legal move for the side to move.
pub fn pseudo_legal_moves(board: &Board, state: &GameState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for (from, piece) in board.pieces_of(state.active_color) {
        // The piece set is closed; dispatch is a plain exhaustive match.
        match piece.kind {
            PieceKind::Pawn => pawn_moves(from, piece.color, board, state, &mut moves),
            PieceKind::Knight => knight_moves(from, piece.color, board, &mut moves),
            PieceKind::Bishop => slide_moves(from, piece.color, board, &BISHOP_DIRS, &mut moves),
            PieceKind::Rook => slide_moves(from, piece.color, board, &ROOK_DIRS, &mut moves),
            PieceKind::Queen => {
                slide_moves(from, piece.color, board, &BISHOP_DIRS, &mut moves);
                slide_moves(from, piece.color, board, &ROOK_DIRS, &mut moves);
            }
            PieceKind::King => king_moves(from, piece.color, board, state, &mut moves),
        }
    }
    moves
}

/// Generates every legal move for the side to move.
///
/// Starts from the pseudo-legal set, then discards moves after which the
/// mover's king would be attacked. Castling carries two extra preconditions
/// checked against the pre-move board: the king is not currently in check
/// and no square on its transit path is attacked.
pub fn legal_moves(board: &Board, state: &GameState) -> Vec<Move> {
    let us = state.active_color;
    let them = us.opposite();

    pseudo_legal_moves(board, state)
        .into_iter()
        .filter(|mv| {
            if mv.is_castle() {
                if is_king_in_check(us, board) {
                    return false;
                }
                if castle_path(mv)
                    .iter()
                    .any(|&sq| is_square_attacked_by(sq, them, board))
                {
                    return false;
                }
            }
            let after = board.apply_move(mv);
            !is_king_in_check(us, &after)
        })
        .collect()
}

/// The three squares the king touches while castling: start, intermediate,
/// and destination.
fn castle_path(mv: &Move) -> [Square; 3] {
    let rank = mv.from.rank();
    if mv.is_castle_kingside {
        [
            mv.from,
            Square::new(File::F, rank),
            Square::new(File::G, rank),
        ]
    } else {
        [
            mv.from,
            Square::new(File::D, rank),
            Square::new(File::C, rank),
        ]
    }
}

/// Shared walker for bishops, rooks, and queens.
///
/// Steps outward one square per direction: stops at the board edge, adds a
/// quiet move and continues on empty squares, and on the first occupied
/// square adds a capture only for an enemy piece, then stops.
fn slide_moves(from: Square, us: Color, board: &Board, dirs: &[Offset], moves: &mut Vec<Move>) {
    for &dir in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dir) {
            current = next;
            match board.piece_at(current) {
                None => moves.push(Move::quiet(from, current)),
                Some(p) => {
                    if p.color != us {
                        moves.push(Move::capture(from, current));
                    }
                    break;
                }
            }
        }
    }
}

/// Emits moves for a fixed offset table (knight jumps or king steps).
fn offset_moves(from: Square, us: Color, board: &Board, offsets: &[Offset], moves: &mut Vec<Move>) {
    for &offset in offsets {
        if let Some(to) = from.offset(offset) {
            match board.piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(p) if p.color != us => moves.push(Move::capture(from, to)),
                Some(_) => {}
            }
        }
    }
}

fn knight_moves(from: Square, us: Color, board: &Board, moves: &mut Vec<Move>) {
    offset_moves(from, us, board, &KNIGHT_OFFSETS, moves);
}

/// King steps plus castling candidates.
///
/// Castling is only considered with the king on its original square and the
/// matching right intact; it further requires the squares between king and
/// corner to be empty and the corner to hold the side's own rook. Transit
/// attack-safety is checked later by [`legal_moves`].
fn king_moves(from: Square, us: Color, board: &Board, state: &GameState, moves: &mut Vec<Move>) {
    offset_moves(from, us, board, &KING_OFFSETS, moves);

    let home = Square::new(File::E, us.back_rank());
    if from != home {
        return;
    }
    let rank = us.back_rank();

    if state.castling.kingside(us) {
        let between = [Square::new(File::F, rank), Square::new(File::G, rank)];
        if between.iter().all(|&sq| board.piece_at(sq).is_none())
            && own_rook_at(Square::new(File::H, rank), us, board)
        {
            moves.push(Move::castle_kingside(from, Square::new(File::G, rank)));
        }
    }

    if state.castling.queenside(us) {
        let between = [
            Square::new(File::B, rank),
            Square::new(File::C, rank),
            Square::new(File::D, rank),
        ];
        if between.iter().all(|&sq| board.piece_at(sq).is_none())
            && own_rook_at(Square::new(File::A, rank), us, board)
        {
            moves.push(Move::castle_queenside(from, Square::new(File::C, rank)));
        }
    }
}

fn own_rook_at(sq: Square, us: Color, board: &Board) -> bool {
    board
        .piece_at(sq)
        .is_some_and(|p| p.kind == PieceKind::Rook && p.color == us)
}

/// Pawn pushes, captures, en passant, and promotion expansion.
fn pawn_moves(from: Square, us: Color, board: &Board, state: &GameState, moves: &mut Vec<Move>) {
    let dir = us.pawn_direction();

    // Forward pushes.
    if let Some(one_ahead) = from.offset(Offset::new(0, dir)) {
        if board.piece_at(one_ahead).is_none() {
            push_pawn_move(from, one_ahead, us, false, moves);

            if from.rank() == us.pawn_start_rank() {
                if let Some(two_ahead) = one_ahead.offset(Offset::new(0, dir)) {
                    if board.piece_at(two_ahead).is_none() {
                        moves.push(Move::quiet(from, two_ahead));
                    }
                }
            }
        }
    }

    // Diagonal captures.
    for df in [-1, 1] {
        if let Some(to) = from.offset(Offset::new(df, dir)) {
            if board.piece_at(to).is_some_and(|p| p.color != us) {
                push_pawn_move(from, to, us, true, moves);
            }
        }
    }

    // En passant.
    if let (Some(target), true) = (state.en_passant, from.rank() == us.en_passant_rank()) {
        for df in [-1, 1] {
            if from.offset(Offset::new(df, dir)) == Some(target) {
                moves.push(Move::en_passant(from, target));
            }
        }
    }
}

/// Adds a pawn move, expanding into the four promotion moves when the
/// destination is the promotion rank.
fn push_pawn_move(from: Square, to: Square, us: Color, is_capture: bool, moves: &mut Vec<Move>) {
    if to.rank() == us.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promotion(from, to, kind, is_capture));
        }
    } else if is_capture {
        moves.push(Move::capture(from, to));
    } else {
        moves.push(Move::quiet(from, to));
    }
}
