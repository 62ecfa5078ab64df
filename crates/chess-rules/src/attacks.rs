//! Attack detection and material evaluation.
//!
//! Attack tests are computed directly from piece geometry rather than by
//! reusing the pseudo-legal generator, so they can never manufacture
//! castling or en-passant moves and pawn pushes never count as attacks.

use crate::board::Board;
use chess_core::{Color, Offset, PieceKind, Square};

/// The four orthogonal directions (rook rays).
pub(crate) const ROOK_DIRS: [Offset; 4] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];

/// The four diagonal directions (bishop rays).
pub(crate) const BISHOP_DIRS: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

/// The eight knight jumps.
pub(crate) const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(-1, 2),
];

/// The eight king steps.
pub(crate) const KING_OFFSETS: [Offset; 8] = [
    Offset::new(1, 0),
    Offset::new(1, 1),
    Offset::new(0, 1),
    Offset::new(-1, 1),
    Offset::new(-1, 0),
    Offset::new(-1, -1),
    Offset::new(0, -1),
    Offset::new(1, -1),
];

/// Returns true if any piece of `attacker` attacks `sq`.
pub fn is_square_attacked_by(sq: Square, attacker: Color, board: &Board) -> bool {
    // Pawns: an attacker pawn one rank behind sq (from the attacker's point
    // of view) on an adjacent file captures onto sq.
    let behind = -attacker.pawn_direction();
    for df in [-1, 1] {
        if let Some(origin) = sq.offset(Offset::new(df, behind)) {
            if let Some(p) = board.piece_at(origin) {
                if p.kind == PieceKind::Pawn && p.color == attacker {
                    return true;
                }
            }
        }
    }

    // Knights.
    for offset in KNIGHT_OFFSETS {
        if let Some(origin) = sq.offset(offset) {
            if let Some(p) = board.piece_at(origin) {
                if p.kind == PieceKind::Knight && p.color == attacker {
                    return true;
                }
            }
        }
    }

    // The enemy king.
    for offset in KING_OFFSETS {
        if let Some(origin) = sq.offset(offset) {
            if let Some(p) = board.piece_at(origin) {
                if p.kind == PieceKind::King && p.color == attacker {
                    return true;
                }
            }
        }
    }

    // Sliders: walk each ray outward and inspect the first piece hit.
    ray_attack(sq, attacker, board, &ROOK_DIRS, PieceKind::Rook)
        || ray_attack(sq, attacker, board, &BISHOP_DIRS, PieceKind::Bishop)
}

fn ray_attack(
    sq: Square,
    attacker: Color,
    board: &Board,
    dirs: &[Offset],
    slider: PieceKind,
) -> bool {
    for &dir in dirs {
        let mut current = sq;
        while let Some(next) = current.offset(dir) {
            current = next;
            if let Some(p) = board.piece_at(current) {
                if p.color == attacker && (p.kind == slider || p.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
        }
    }
    false
}

/// Returns true if the given color's king is attacked.
///
/// A missing king yields false; valid positions always have one.
pub fn is_king_in_check(color: Color, board: &Board) -> bool {
    match board.king_square(color) {
        Some(sq) => is_square_attacked_by(sq, color.opposite(), board),
        None => false,
    }
}

/// Returns true if neither side can possibly deliver checkmate.
///
/// Covers bare kings, a lone minor piece, and any number of bishops that
/// all stand on squares of the same color.
pub fn has_insufficient_material(board: &Board) -> bool {
    let non_kings: Vec<(Square, PieceKind)> = board
        .pieces()
        .filter(|(_, p)| p.kind != PieceKind::King)
        .map(|(sq, p)| (sq, p.kind))
        .collect();

    match non_kings.as_slice() {
        [] => true,
        [(_, kind)] => matches!(kind, PieceKind::Bishop | PieceKind::Knight),
        rest => {
            rest.iter().all(|(_, kind)| *kind == PieceKind::Bishop) && {
                let first_light = rest[0].0.is_light();
                rest.iter().all(|(sq, _)| sq.is_light() == first_light)
            }
        }
    }
}
