//! Move representation.

use crate::{PieceKind, Square};
use std::fmt;

/// A chess move.
///
/// Equality is structural over all fields, so a promotion to a queen and a
/// promotion to a rook from the same pair of squares are distinct moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Promotion piece, if this move promotes a pawn.
    pub promotion: Option<PieceKind>,
    /// True if the move captures a piece (including en passant).
    pub is_capture: bool,
    /// True for kingside castling (O-O).
    pub is_castle_kingside: bool,
    /// True for queenside castling (O-O-O).
    pub is_castle_queenside: bool,
    /// True for en passant captures.
    pub is_en_passant: bool,
}

impl Move {
    /// Creates a non-capturing move with no special flags.
    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            is_capture: false,
            is_castle_kingside: false,
            is_castle_queenside: false,
            is_en_passant: false,
        }
    }

    /// Creates a capturing move.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move {
            is_capture: true,
            ..Move::quiet(from, to)
        }
    }

    /// Creates a kingside castling move.
    #[inline]
    pub const fn castle_kingside(from: Square, to: Square) -> Self {
        Move {
            is_castle_kingside: true,
            ..Move::quiet(from, to)
        }
    }

    /// Creates a queenside castling move.
    #[inline]
    pub const fn castle_queenside(from: Square, to: Square) -> Self {
        Move {
            is_castle_queenside: true,
            ..Move::quiet(from, to)
        }
    }

    /// Creates an en passant capture.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move {
            is_capture: true,
            is_en_passant: true,
            ..Move::quiet(from, to)
        }
    }

    /// Creates a promotion move, capturing or not.
    #[inline]
    pub const fn promotion(from: Square, to: Square, kind: PieceKind, is_capture: bool) -> Self {
        Move {
            promotion: Some(kind),
            is_capture,
            ..Move::quiet(from, to)
        }
    }

    /// Returns true if this is a castling move of either side.
    #[inline]
    pub const fn is_castle(&self) -> bool {
        self.is_castle_kingside || self.is_castle_queenside
    }

    /// Returns the coordinate notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_coord(&self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.to_promotion_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_coord())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}
