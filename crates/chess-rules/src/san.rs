//! Standard Algebraic Notation (SAN) and coordinate-move resolution.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"

use crate::apply::make_move;
use crate::attacks::is_king_in_check;
use crate::board::Board;
use crate::movegen::legal_moves;
use crate::state::GameState;
use chess_core::{File, Move, PieceKind, Rank, Square};
use thiserror::Error;

/// Error type for SAN and coordinate-move parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanError {
    /// The move string is empty.
    #[error("empty move string")]
    Empty,

    /// The move string has invalid format.
    #[error("invalid move format: {0}")]
    InvalidFormat(String),

    /// No legal move matches the string.
    #[error("no legal move matches: {0}")]
    NoMatchingMove(String),

    /// Multiple legal moves match the string.
    #[error("ambiguous move: {0}")]
    AmbiguousMove(String),
}

/// Converts a move to SAN notation.
///
/// The position must be the state before the move is made, and the move
/// must be legal in it.
pub fn move_to_san(board: &Board, state: &GameState, mv: &Move) -> String {
    if mv.is_castle_kingside {
        return add_check_suffix(board, state, mv, "O-O".to_string());
    }
    if mv.is_castle_queenside {
        return add_check_suffix(board, state, mv, "O-O-O".to_string());
    }

    let mut san = String::new();
    let piece = board
        .piece_at(mv.from)
        .expect("move_to_san: no piece on origin square");

    if piece.kind != PieceKind::Pawn {
        san.push(piece_to_san_char(piece.kind));
        san.push_str(&disambiguation(board, state, mv, piece.kind));
    }

    if mv.is_capture {
        if piece.kind == PieceKind::Pawn {
            // Pawn captures include the origin file.
            san.push(mv.from.file().to_char());
        }
        san.push('x');
    }

    san.push_str(&mv.to.to_algebraic());

    if let Some(kind) = mv.promotion {
        san.push('=');
        san.push(piece_to_san_char(kind));
    }

    add_check_suffix(board, state, mv, san)
}

/// Parses a SAN string and returns the single matching legal move.
pub fn san_to_move(board: &Board, state: &GameState, san: &str) -> Result<Move, SanError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(SanError::Empty);
    }

    // Check and mate suffixes are decoration, not part of the move.
    let bare = san.trim_end_matches(['#', '+', '!', '?']);

    if bare == "O-O" || bare == "0-0" {
        return find_castling_move(board, state, true);
    }
    if bare == "O-O-O" || bare == "0-0-0" {
        return find_castling_move(board, state, false);
    }

    let parsed = parse_san_components(bare)?;
    find_matching_move(board, state, &parsed)
}

/// Resolves a coordinate-form move ("e2e4", "e7e8q") against the legal
/// move list, so the returned move carries the correct flags.
pub fn coord_to_move(board: &Board, state: &GameState, text: &str) -> Result<Move, SanError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SanError::Empty);
    }
    // Byte indexing below is only valid for ASCII input.
    if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
        return Err(SanError::InvalidFormat(text.to_string()));
    }

    let from = Square::from_algebraic(&text[0..2])
        .map_err(|_| SanError::InvalidFormat(text.to_string()))?;
    let to = Square::from_algebraic(&text[2..4])
        .map_err(|_| SanError::InvalidFormat(text.to_string()))?;
    let promotion = match text.chars().nth(4) {
        Some(c) => Some(
            PieceKind::from_promotion_char(c)
                .ok_or_else(|| SanError::InvalidFormat(text.to_string()))?,
        ),
        None => None,
    };

    legal_moves(board, state)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promotion)
        .ok_or_else(|| SanError::NoMatchingMove(text.to_string()))
}

/// Parsed components of a SAN string.
#[derive(Debug)]
struct ParsedSan {
    piece: PieceKind,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to_square: Square,
    promotion: Option<PieceKind>,
}

fn parse_san_components(san: &str) -> Result<ParsedSan, SanError> {
    let chars: Vec<char> = san.chars().collect();
    if chars.is_empty() {
        return Err(SanError::Empty);
    }

    let mut idx = 0;
    let piece = if chars[0].is_uppercase() {
        let p = san_char_to_piece(chars[0]).ok_or_else(|| {
            SanError::InvalidFormat(format!("invalid piece character: {}", chars[0]))
        })?;
        idx += 1;
        p
    } else {
        PieceKind::Pawn
    };

    let remaining: String = chars[idx..].iter().collect();

    let remaining = remaining.replace('x', "");

    let (remaining, promotion) = if let Some((dest, promo)) = remaining.split_once('=') {
        let mut promo_chars = promo.chars();
        let (c, tail) = (promo_chars.next(), promo_chars.next());
        if tail.is_some() {
            return Err(SanError::InvalidFormat(format!("invalid promotion: {}", san)));
        }
        let kind = c
            .and_then(san_char_to_piece)
            .filter(|k| PieceKind::PROMOTIONS.contains(k))
            .ok_or_else(|| SanError::InvalidFormat(format!("invalid promotion: {}", san)))?;
        (dest.to_string(), Some(kind))
    } else {
        (remaining, None)
    };

    let chars: Vec<char> = remaining.chars().collect();
    if chars.len() < 2 {
        return Err(SanError::InvalidFormat(format!("too short: {}", san)));
    }

    let to_file = File::from_char(chars[chars.len() - 2])
        .ok_or_else(|| SanError::InvalidFormat(format!("invalid file: {}", san)))?;
    let to_rank = Rank::from_char(chars[chars.len() - 1])
        .ok_or_else(|| SanError::InvalidFormat(format!("invalid rank: {}", san)))?;
    let to_square = Square::new(to_file, to_rank);

    let (from_file, from_rank) = parse_disambiguation(&chars[..chars.len() - 2], san)?;

    Ok(ParsedSan {
        piece,
        from_file,
        from_rank,
        to_square,
        promotion,
    })
}

fn parse_disambiguation(
    chars: &[char],
    san: &str,
) -> Result<(Option<File>, Option<Rank>), SanError> {
    match chars {
        [] => Ok((None, None)),
        [c] => {
            if let Some(f) = File::from_char(*c) {
                Ok((Some(f), None))
            } else if let Some(r) = Rank::from_char(*c) {
                Ok((None, Some(r)))
            } else {
                Err(SanError::InvalidFormat(format!(
                    "invalid disambiguation: {}",
                    san
                )))
            }
        }
        [fc, rc] => {
            let file = File::from_char(*fc).ok_or_else(|| {
                SanError::InvalidFormat(format!("invalid disambiguation file: {}", san))
            })?;
            let rank = Rank::from_char(*rc).ok_or_else(|| {
                SanError::InvalidFormat(format!("invalid disambiguation rank: {}", san))
            })?;
            Ok((Some(file), Some(rank)))
        }
        _ => Err(SanError::InvalidFormat(format!(
            "disambiguation too long: {}",
            san
        ))),
    }
}

fn find_castling_move(board: &Board, state: &GameState, kingside: bool) -> Result<Move, SanError> {
    let name = if kingside { "O-O" } else { "O-O-O" };
    legal_moves(board, state)
        .into_iter()
        .find(|m| {
            if kingside {
                m.is_castle_kingside
            } else {
                m.is_castle_queenside
            }
        })
        .ok_or_else(|| SanError::NoMatchingMove(name.to_string()))
}

fn find_matching_move(
    board: &Board,
    state: &GameState,
    parsed: &ParsedSan,
) -> Result<Move, SanError> {
    let mut matching = Vec::new();

    for m in legal_moves(board, state) {
        if m.to != parsed.to_square {
            continue;
        }
        match board.piece_at(m.from) {
            Some(p) if p.kind == parsed.piece => {}
            _ => continue,
        }
        if let Some(file) = parsed.from_file {
            if m.from.file() != file {
                continue;
            }
        }
        if let Some(rank) = parsed.from_rank {
            if m.from.rank() != rank {
                continue;
            }
        }
        if m.promotion != parsed.promotion {
            continue;
        }
        matching.push(m);
    }

    match matching.len() {
        0 => Err(SanError::NoMatchingMove(describe(parsed))),
        1 => Ok(matching[0]),
        _ => Err(SanError::AmbiguousMove(describe(parsed))),
    }
}

fn describe(parsed: &ParsedSan) -> String {
    format!("{} to {}", parsed.piece, parsed.to_square)
}

/// Picks the shortest origin marker that makes the move unique: file first,
/// then rank, then the full origin square.
fn disambiguation(board: &Board, state: &GameState, mv: &Move, piece: PieceKind) -> String {
    let same_dest: Vec<Move> = legal_moves(board, state)
        .into_iter()
        .filter(|other| {
            other.to == mv.to
                && board
                    .piece_at(other.from)
                    .is_some_and(|p| p.kind == piece)
        })
        .collect();

    if same_dest.len() <= 1 {
        return String::new();
    }

    let same_file = same_dest
        .iter()
        .filter(|o| o.from.file() == mv.from.file())
        .count();
    if same_file == 1 {
        return mv.from.file().to_char().to_string();
    }

    let same_rank = same_dest
        .iter()
        .filter(|o| o.from.rank() == mv.from.rank())
        .count();
    if same_rank == 1 {
        return mv.from.rank().to_char().to_string();
    }

    mv.from.to_algebraic()
}

fn add_check_suffix(board: &Board, state: &GameState, mv: &Move, mut san: String) -> String {
    let (next_board, next_state) = make_move(board, state, mv);
    if is_king_in_check(next_state.active_color, &next_board) {
        if legal_moves(&next_board, &next_state).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}

fn piece_to_san_char(piece: PieceKind) -> char {
    match piece {
        PieceKind::Pawn => 'P',
        PieceKind::Knight => 'N',
        PieceKind::Bishop => 'B',
        PieceKind::Rook => 'R',
        PieceKind::Queen => 'Q',
        PieceKind::King => 'K',
    }
}

fn san_char_to_piece(c: char) -> Option<PieceKind> {
    match c {
        'N' => Some(PieceKind::Knight),
        'B' => Some(PieceKind::Bishop),
        'R' => Some(PieceKind::Rook),
        'Q' => Some(PieceKind::Queen),
        'K' => Some(PieceKind::King),
        'P' => Some(PieceKind::Pawn),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    fn position(fen: &str) -> (Board, GameState) {
        parse_fen(fen).unwrap()
    }

    fn startpos() -> (Board, GameState) {
        (Board::standard(), GameState::initial())
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn san_pawn_push() {
        let (board, state) = startpos();
        let m = Move::quiet(sq("e2"), sq("e4"));
        assert_eq!(move_to_san(&board, &state, &m), "e4");
    }

    #[test]
    fn san_knight_move() {
        let (board, state) = startpos();
        let m = Move::quiet(sq("g1"), sq("f3"));
        assert_eq!(move_to_san(&board, &state, &m), "Nf3");
    }

    #[test]
    fn san_pawn_capture() {
        let (board, state) =
            position("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2");
        let m = Move::capture(sq("e4"), sq("d5"));
        assert_eq!(move_to_san(&board, &state, &m), "exd5");
    }

    #[test]
    fn san_castling() {
        let (board, state) = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let ks = Move::castle_kingside(sq("e1"), sq("g1"));
        assert_eq!(move_to_san(&board, &state, &ks), "O-O");
        let qs = Move::castle_queenside(sq("e1"), sq("c1"));
        assert_eq!(move_to_san(&board, &state, &qs), "O-O-O");
    }

    #[test]
    fn san_promotion() {
        let (board, state) = position("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
        let m = Move::promotion(sq("a7"), sq("a8"), PieceKind::Queen, false);
        assert_eq!(move_to_san(&board, &state, &m), "a8=Q");
    }

    #[test]
    fn san_file_disambiguation() {
        // Knights on b1 and f1 can both reach d2.
        let (board, state) = position("4k3/8/8/8/8/8/8/1N1K1N2 w - - 0 1");
        let m = Move::quiet(sq("b1"), sq("d2"));
        assert_eq!(move_to_san(&board, &state, &m), "Nbd2");
    }

    #[test]
    fn san_rank_disambiguation() {
        // Rooks on a1 and a5 can both reach a3.
        let (board, state) = position("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        let m = Move::quiet(sq("a1"), sq("a3"));
        assert_eq!(move_to_san(&board, &state, &m), "R1a3");
    }

    #[test]
    fn san_full_square_disambiguation() {
        // Queens on d1, d3, and f1 all reach f3.
        let (board, state) = position("4k3/8/8/8/8/3Q4/8/3QKQ2 w - - 0 1");
        let m = Move::quiet(sq("d1"), sq("f3"));
        assert_eq!(move_to_san(&board, &state, &m), "Qd1f3");
    }

    #[test]
    fn san_check_and_mate_suffix() {
        let (board, state) = position("4k3/8/8/8/8/8/8/K3Q3 w - - 0 1");
        let m = Move::quiet(sq("e1"), sq("e2"));
        assert_eq!(move_to_san(&board, &state, &m), "Qe2+");

        let (board, state) = position("6k1/5ppp/8/8/8/8/8/K3R3 w - - 0 1");
        let m = Move::quiet(sq("e1"), sq("e8"));
        assert_eq!(move_to_san(&board, &state, &m), "Re8#");
    }

    #[test]
    fn parse_pawn_push() {
        let (board, state) = startpos();
        let m = san_to_move(&board, &state, "e4").unwrap();
        assert_eq!(m.from, sq("e2"));
        assert_eq!(m.to, sq("e4"));
    }

    #[test]
    fn parse_knight_move() {
        let (board, state) = startpos();
        let m = san_to_move(&board, &state, "Nf3").unwrap();
        assert_eq!(m.from, sq("g1"));
        assert_eq!(m.to, sq("f3"));
    }

    #[test]
    fn parse_castling() {
        let (board, state) = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let m = san_to_move(&board, &state, "O-O").unwrap();
        assert!(m.is_castle_kingside);
        let m = san_to_move(&board, &state, "0-0-0").unwrap();
        assert!(m.is_castle_queenside);
    }

    #[test]
    fn parse_with_suffix() {
        let (board, state) = position("4k3/8/8/8/8/8/8/K3Q3 w - - 0 1");
        let m = san_to_move(&board, &state, "Qe2+").unwrap();
        assert_eq!(m.to, sq("e2"));
    }

    #[test]
    fn parse_promotion() {
        let (board, state) = position("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
        let m = san_to_move(&board, &state, "a8=N").unwrap();
        assert_eq!(m.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn parse_errors() {
        let (board, state) = startpos();
        assert_eq!(san_to_move(&board, &state, ""), Err(SanError::Empty));
        assert!(matches!(
            san_to_move(&board, &state, "xyz"),
            Err(SanError::InvalidFormat(_))
        ));
        assert!(matches!(
            san_to_move(&board, &state, "Ke4"),
            Err(SanError::NoMatchingMove(_))
        ));
    }

    #[test]
    fn parse_ambiguous() {
        // Two knights on the same file both reach d2; "Nd2" alone is
        // ambiguous.
        let (board, state) = position("4k3/8/8/8/8/8/8/1N1K1N2 w - - 0 1");
        assert!(matches!(
            san_to_move(&board, &state, "Nd2"),
            Err(SanError::AmbiguousMove(_))
        ));
    }

    #[test]
    fn coord_resolution() {
        let (board, state) = startpos();
        let m = coord_to_move(&board, &state, "e2e4").unwrap();
        assert_eq!(m.to, sq("e4"));

        let (board, state) = position("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
        let m = coord_to_move(&board, &state, "a7a8q").unwrap();
        assert_eq!(m.promotion, Some(PieceKind::Queen));

        assert!(matches!(
            coord_to_move(&board, &state, "a7a8x"),
            Err(SanError::InvalidFormat(_))
        ));
        assert!(matches!(
            coord_to_move(&board, &state, "e9e4"),
            Err(SanError::InvalidFormat(_))
        ));
        assert!(matches!(
            coord_to_move(&board, &state, "e1e8"),
            Err(SanError::NoMatchingMove(_))
        ));
    }

    #[test]
    fn coord_rejects_non_ascii_text() {
        // Multi-byte characters can satisfy the byte-length bounds; they
        // must come back as a format error, not a slicing panic.
        let (board, state) = startpos();
        for text in ["a\u{20AC}1", "e2e\u{00E9}", "\u{00E9}2e4"] {
            assert!(matches!(
                coord_to_move(&board, &state, text),
                Err(SanError::InvalidFormat(_))
            ));
        }
    }

    #[test]
    fn san_roundtrip_startpos() {
        let (board, state) = startpos();
        for m in legal_moves(&board, &state) {
            let san = move_to_san(&board, &state, &m);
            let parsed = san_to_move(&board, &state, &san).unwrap();
            assert_eq!(m, parsed, "roundtrip failed for {}", san);
        }
    }
}
