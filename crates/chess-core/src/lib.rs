//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceKind`], and [`Color`] for piece representation
//! - [`Square`], [`File`], [`Rank`], and [`Offset`] for board coordinates
//! - [`Move`] for move representation
//! - FEN field validation

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenFields};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, Offset, Rank, Square, SquareError};
