//! Auxiliary game state: castling rights, en passant, clocks.

use chess_core::{Color, Square};

/// Castling availability for one color.
///
/// Rights are only ever revoked over the course of a game, never granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingAvailability {
    pub kingside: bool,
    pub queenside: bool,
}

impl CastlingAvailability {
    pub const BOTH: CastlingAvailability = CastlingAvailability {
        kingside: true,
        queenside: true,
    };

    pub const NONE: CastlingAvailability = CastlingAvailability {
        kingside: false,
        queenside: false,
    };
}

/// Castling availability for both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    sides: [CastlingAvailability; 2],
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        sides: [CastlingAvailability::BOTH; 2],
    };

    pub const NONE: CastlingRights = CastlingRights {
        sides: [CastlingAvailability::NONE; 2],
    };

    /// Returns the availability for one color.
    #[inline]
    pub const fn of(self, color: Color) -> CastlingAvailability {
        self.sides[color.index()]
    }

    /// Returns true if the given side can still castle kingside.
    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        self.sides[color.index()].kingside
    }

    /// Returns true if the given side can still castle queenside.
    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        self.sides[color.index()].queenside
    }

    /// Returns a copy with both rights revoked for a color.
    #[must_use]
    pub fn without_color(mut self, color: Color) -> Self {
        self.sides[color.index()] = CastlingAvailability::NONE;
        self
    }

    /// Returns a copy with the kingside right revoked for a color.
    #[must_use]
    pub fn without_kingside(mut self, color: Color) -> Self {
        self.sides[color.index()].kingside = false;
        self
    }

    /// Returns a copy with the queenside right revoked for a color.
    #[must_use]
    pub fn without_queenside(mut self, color: Color) -> Self {
        self.sides[color.index()].queenside = false;
        self
    }

    /// Builds rights from per-side flags, White first.
    pub const fn new(white: CastlingAvailability, black: CastlingAvailability) -> Self {
        CastlingRights {
            sides: [white, black],
        }
    }
}

/// The non-board half of a chess position.
///
/// Immutable: move application produces a fresh value (see
/// [`make_move`](crate::make_move)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    /// The side to move.
    pub active_color: Color,
    /// Castling availability for both sides.
    pub castling: CastlingRights,
    /// En passant target square, if the last move was a double pawn push.
    pub en_passant: Option<Square>,
    /// Half-moves since the last pawn move or capture (50-move rule).
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1 and incrementing after Black's move.
    pub fullmove_number: u32,
}

impl GameState {
    /// The state at the start of a standard game.
    pub const fn initial() -> Self {
        GameState {
            active_color: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let state = GameState::initial();
        assert_eq!(state.active_color, Color::White);
        assert!(state.castling.kingside(Color::White));
        assert!(state.castling.queenside(Color::Black));
        assert_eq!(state.en_passant, None);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
    }

    #[test]
    fn rights_revocation() {
        let rights = CastlingRights::ALL;

        let after = rights.without_kingside(Color::White);
        assert!(!after.kingside(Color::White));
        assert!(after.queenside(Color::White));
        assert!(after.kingside(Color::Black));

        let after = rights.without_color(Color::Black);
        assert!(!after.kingside(Color::Black));
        assert!(!after.queenside(Color::Black));
        assert!(after.kingside(Color::White));

        let after = rights.without_queenside(Color::White);
        assert!(after.kingside(Color::White));
        assert!(!after.queenside(Color::White));
    }

    #[test]
    fn rights_none() {
        let rights = CastlingRights::NONE;
        for color in [Color::White, Color::Black] {
            assert!(!rights.kingside(color));
            assert!(!rights.queenside(color));
            assert_eq!(rights.of(color), CastlingAvailability::NONE);
        }
    }
}
