//! Mailbox board representation.

use chess_core::{Color, File, Move, Piece, PieceKind, Rank, Square};

/// A chess board: a total mapping from all 64 squares to an optional piece.
///
/// Realized as a fixed array indexed by [`Square::index`]. Every mutation
/// goes through [`Board::apply_move`], which returns a new board and never
/// touches the receiver, so boards held in history stacks stay valid.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates a board with the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in File::ALL.iter().zip(back_rank.iter()) {
            board.set(
                Square::new(*file, Rank::R1),
                Piece::new(kind, Color::White),
            );
            board.set(
                Square::new(*file, Rank::R2),
                Piece::new(PieceKind::Pawn, Color::White),
            );
            board.set(
                Square::new(*file, Rank::R7),
                Piece::new(PieceKind::Pawn, Color::Black),
            );
            board.set(
                Square::new(*file, Rank::R8),
                Piece::new(kind, Color::Black),
            );
        }
        board
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Places a piece on a square, replacing any occupant.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    /// Removes the piece from a square.
    #[inline]
    pub(crate) fn clear(&mut self, sq: Square) {
        self.squares[sq.index()] = None;
    }

    /// Iterates over all occupied squares as (square, piece) pairs.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(idx, piece)| {
            piece.map(|p| {
                let sq = Square::from_index(idx as u8).expect("index below 64");
                (sq, p)
            })
        })
    }

    /// Iterates over the occupied squares of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// Returns the number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|p| p.is_some()).count()
    }

    /// Returns the square of the given color's king.
    ///
    /// `None` only in malformed positions, which FEN validation prevents.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Applies a move mechanically, returning the resulting board.
    ///
    /// Performs no legality checking: the caller supplies moves vetted by
    /// the move generator. Handles promotion, en passant removal, and rook
    /// relocation for castling.
    ///
    /// # Panics
    ///
    /// Panics if no piece occupies `mv.from`; that indicates a caller
    /// bypassed the legal-move contract.
    pub fn apply_move(&self, mv: &Move) -> Board {
        let mut next = self.clone();
        let piece = match self.piece_at(mv.from) {
            Some(p) => p,
            None => panic!("apply_move: no piece on {}", mv.from),
        };

        next.clear(mv.from);
        let placed = match mv.promotion {
            Some(kind) if piece.kind == PieceKind::Pawn => Piece::new(kind, piece.color),
            _ => piece,
        };
        next.set(mv.to, placed);

        if mv.is_en_passant {
            // The captured pawn sits behind the destination, on the mover's
            // originating rank.
            let captured = Square::new(mv.to.file(), mv.from.rank());
            next.clear(captured);
        } else if mv.is_castle_kingside {
            let rank = mv.from.rank();
            let rook_from = Square::new(File::H, rank);
            let rook_to = Square::new(File::F, rank);
            if let Some(rook) = next.piece_at(rook_from) {
                next.clear(rook_from);
                next.set(rook_to, rook);
            }
        } else if mv.is_castle_queenside {
            let rank = mv.from.rank();
            let rook_from = Square::new(File::A, rank);
            let rook_to = Square::new(File::D, rank);
            if let Some(rook) = next.piece_at(rook_from) {
                next.clear(rook_from);
                next.set(rook_to, rook);
            }
        }

        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let sq = Square::new(file, *rank);
                match self.piece_at(sq) {
                    Some(p) => write!(f, "{} ", p.to_fen_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
