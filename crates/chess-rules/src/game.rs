//! Full game session: move application, history, and outcome tracking.
//!
//! [`Game`] layers history on top of the stateless rules functions:
//! an undo stack and a redo stack of (board, state) snapshots, plus a
//! position-key log for repetition detection.

use crate::apply::make_move;
use crate::attacks::{has_insufficient_material, is_king_in_check};
use crate::board::Board;
use crate::fen::{parse_fen, render_fen, render_placement};
use crate::movegen::legal_moves;
use crate::san::{coord_to_move, move_to_san, san_to_move, SanError};
use crate::state::{CastlingRights, GameState};
use chess_core::{Color, FenError, Move, Square};

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves while not in check.
    Stalemate,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// 100 half-moves without a pawn move or capture.
    FiftyMoveRule,
    /// Neither side can possibly checkmate.
    InsufficientMaterial,
}

/// The status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The game continues.
    Ongoing,
    /// The given color delivered checkmate.
    Win(Color),
    /// Drawn for the given reason.
    Draw(DrawReason),
}

impl Outcome {
    /// Returns true unless the game is still ongoing.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// The repetition signature of a position: piece placement, active color,
/// castling rights, and en-passant availability. Clocks are excluded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    placement: String,
    active_color: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl PositionKey {
    /// Computes the key for a position.
    pub fn of(board: &Board, state: &GameState) -> Self {
        PositionKey {
            placement: render_placement(board),
            active_color: state.active_color,
            castling: state.castling,
            en_passant: state.en_passant,
        }
    }
}

/// Classifies the outcome of a position given the full position-key log
/// (which includes the key of the position itself and of the start).
///
/// Tie-break order when several conditions hold: checkmate/stalemate,
/// then the fifty-move rule, then threefold repetition, then
/// insufficient material.
pub fn outcome(board: &Board, state: &GameState, history: &[PositionKey]) -> Outcome {
    if legal_moves(board, state).is_empty() {
        return if is_king_in_check(state.active_color, board) {
            Outcome::Win(state.active_color.opposite())
        } else {
            Outcome::Draw(DrawReason::Stalemate)
        };
    }

    if state.halfmove_clock >= 100 {
        return Outcome::Draw(DrawReason::FiftyMoveRule);
    }

    let key = PositionKey::of(board, state);
    if history.iter().filter(|&k| *k == key).count() >= 3 {
        return Outcome::Draw(DrawReason::ThreefoldRepetition);
    }

    if has_insufficient_material(board) {
        return Outcome::Draw(DrawReason::InsufficientMaterial);
    }

    Outcome::Ongoing
}

/// A recorded move in game history.
#[derive(Debug, Clone)]
pub struct GameMove {
    /// The applied move.
    pub mv: Move,
    /// Its SAN rendering in the position it was played in.
    pub san: String,
}

/// A complete chess game with undo/redo history and repetition tracking.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: GameState,
    /// Pre-move snapshots, one per applied move.
    undo_stack: Vec<(Board, GameState)>,
    /// Undone snapshots together with the move that left them.
    redo_stack: Vec<(Board, GameState, GameMove)>,
    /// Keys of every position reached, the initial one included.
    keys: Vec<PositionKey>,
    moves: Vec<GameMove>,
    result: Outcome,
}

impl Game {
    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Board::standard(), GameState::initial())
    }

    /// Creates a game from an arbitrary position.
    pub fn from_position(board: Board, state: GameState) -> Self {
        let keys = vec![PositionKey::of(&board, &state)];
        let result = outcome(&board, &state, &keys);
        Game {
            board,
            state,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            keys,
            moves: Vec::new(),
            result,
        }
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, state) = parse_fen(fen)?;
        Ok(Self::from_position(board, state))
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns all legal moves in the current position.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, &self.state)
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_king_in_check(self.state.active_color, &self.board)
    }

    /// Returns the current outcome.
    pub fn result(&self) -> Outcome {
        self.result
    }

    /// Returns true if the game has ended.
    pub fn is_over(&self) -> bool {
        self.result.is_over()
    }

    /// Returns the move history up to the current position.
    pub fn move_history(&self) -> &[GameMove] {
        &self.moves
    }

    /// Returns the number of half-moves (plies) played.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        render_fen(&self.board, &self.state)
    }

    /// Applies a move if it is legal in the current position.
    ///
    /// Returns false, leaving the game untouched, when the move is illegal
    /// or the game is already over.
    pub fn make_move(&mut self, mv: &Move) -> bool {
        if self.result.is_over() {
            return false;
        }
        if !self.legal_moves().contains(mv) {
            return false;
        }
        self.apply_vetted(*mv);
        true
    }

    /// Applies a move given in SAN ("Nf3", "O-O", "exd5", "e8=Q").
    ///
    /// `Err` is reserved for malformed text; well-formed text that does not
    /// resolve to exactly one legal move yields `Ok(false)`.
    pub fn make_move_san(&mut self, san: &str) -> Result<bool, SanError> {
        if self.result.is_over() {
            return Ok(false);
        }
        match san_to_move(&self.board, &self.state, san) {
            Ok(mv) => {
                self.apply_vetted(mv);
                Ok(true)
            }
            Err(SanError::NoMatchingMove(_)) | Err(SanError::AmbiguousMove(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Applies a move given in coordinate form ("e2e4", "e7e8q").
    ///
    /// Same error contract as [`Game::make_move_san`].
    pub fn make_move_coord(&mut self, text: &str) -> Result<bool, SanError> {
        if self.result.is_over() {
            return Ok(false);
        }
        match coord_to_move(&self.board, &self.state, text) {
            Ok(mv) => {
                self.apply_vetted(mv);
                Ok(true)
            }
            Err(SanError::NoMatchingMove(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Takes back the last move. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let (board, state) = match self.undo_stack.pop() {
            Some(pair) => pair,
            None => return false,
        };
        let undone = self.moves.pop().expect("one history move per undo entry");
        self.redo_stack.push((
            std::mem::replace(&mut self.board, board),
            std::mem::replace(&mut self.state, state),
            undone,
        ));
        self.keys.pop();
        self.result = outcome(&self.board, &self.state, &self.keys);
        true
    }

    /// Replays the last undone move. Returns false if there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let (board, state, replayed) = match self.redo_stack.pop() {
            Some(entry) => entry,
            None => return false,
        };
        self.undo_stack.push((
            std::mem::replace(&mut self.board, board),
            std::mem::replace(&mut self.state, state),
        ));
        self.moves.push(replayed);
        self.keys.push(PositionKey::of(&self.board, &self.state));
        self.result = outcome(&self.board, &self.state, &self.keys);
        true
    }

    /// Counts how often the current position has occurred.
    pub fn position_count(&self) -> usize {
        let key = PositionKey::of(&self.board, &self.state);
        self.keys.iter().filter(|&k| *k == key).count()
    }

    /// Renders a legal move as SAN in the current position.
    pub fn move_to_san(&self, mv: &Move) -> String {
        move_to_san(&self.board, &self.state, mv)
    }

    /// Resolves SAN text against the current position.
    pub fn san_to_move(&self, san: &str) -> Result<Move, SanError> {
        san_to_move(&self.board, &self.state, san)
    }

    /// Applies a move that is known to be legal. New moves discard any
    /// diverging redo history.
    fn apply_vetted(&mut self, mv: Move) {
        let san = move_to_san(&self.board, &self.state, &mv);
        let (board, state) = make_move(&self.board, &self.state, &mv);

        self.undo_stack.push((
            std::mem::replace(&mut self.board, board),
            std::mem::replace(&mut self.state, state),
        ));
        self.redo_stack.clear();
        self.moves.push(GameMove { mv, san });
        self.keys.push(PositionKey::of(&self.board, &self.state));
        self.result = outcome(&self.board, &self.state, &self.keys);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
