//! Game-text (PGN movetext) tokenization, replay, and rendering.
//!
//! The tokenizer reduces annotated movetext to a bare sequence of SAN
//! tokens: tag pairs, move numbers, comments, nested variations, numeric
//! annotation glyphs, and result markers are all stripped. Replay feeds
//! those tokens through a [`Game`].

use crate::game::{Game, Outcome};
use crate::san::SanError;
use chess_core::Color;
use thiserror::Error;

/// Error type for game-text replay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PgnError {
    /// A token could not be parsed as a move at all.
    #[error("malformed move text at ply {ply}: {source}")]
    MalformedMove {
        /// Zero-based index of the offending token.
        ply: usize,
        #[source]
        source: SanError,
    },
    /// A well-formed token did not resolve to a legal move.
    #[error("illegal move at ply {ply}: {text}")]
    IllegalMove {
        /// Zero-based index of the offending token.
        ply: usize,
        /// The token as written.
        text: String,
    },
}

/// Markers that terminate a game in movetext. They are not moves.
const RESULT_MARKERS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Splits movetext into bare SAN tokens.
///
/// Strips `[Tag "..."]` pairs, `{...}` comments, `;` rest-of-line
/// comments, nested `(...)` variations, `$n` annotation glyphs, move
/// numbers like `1.` or `3...`, and result markers.
pub fn tokenize_movetext(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '{' => {
                // Brace comments do not nest.
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                }
            }
            ';' => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '(' => {
                let mut depth = 0usize;
                for c in chars.by_ref() {
                    match c {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
            }
            '[' => {
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                }
            }
            // Stray closers from unbalanced input are skipped.
            ')' | ']' => {
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '{' | ';' | '(' | ')' | '[' | ']') {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                if let Some(token) = strip_token(&word) {
                    tokens.push(token);
                }
            }
        }
    }

    tokens
}

/// Reduces a raw movetext word to a SAN token, or discards it.
fn strip_token(word: &str) -> Option<String> {
    if word.is_empty() || word.starts_with('$') || RESULT_MARKERS.contains(&word) {
        return None;
    }
    // "1.e4" and "3...Nf6" carry the move glued to the number.
    let stripped = match word.find('.') {
        Some(_) if word.starts_with(|c: char| c.is_ascii_digit()) => {
            word.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.')
        }
        _ => word,
    };
    if stripped.is_empty() || stripped.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(stripped.to_string())
}

/// Replays movetext from the standard starting position.
pub fn replay_movetext(text: &str) -> Result<Game, PgnError> {
    replay_movetext_from(Game::new(), text)
}

/// Replays movetext on top of an existing game.
///
/// The game is returned with every token applied; the first token that
/// fails to parse or to match a legal move aborts the replay.
pub fn replay_movetext_from(mut game: Game, text: &str) -> Result<Game, PgnError> {
    for (ply, token) in tokenize_movetext(text).iter().enumerate() {
        match game.make_move_san(token) {
            Ok(true) => {}
            Ok(false) => {
                return Err(PgnError::IllegalMove {
                    ply,
                    text: token.clone(),
                })
            }
            Err(source) => return Err(PgnError::MalformedMove { ply, source }),
        }
    }
    Ok(game)
}

/// Renders a game's move history as numbered movetext with a result
/// marker ("1. e4 e5 2. Nf3 Nc6 *").
pub fn render_movetext(game: &Game) -> String {
    let mut out = String::new();
    for (i, game_move) in game.move_history().iter().enumerate() {
        if i % 2 == 0 {
            out.push_str(&format!("{}. ", i / 2 + 1));
        }
        out.push_str(&game_move.san);
        out.push(' ');
    }
    out.push_str(result_marker(game.result()));
    out
}

/// The movetext terminator for an outcome.
pub fn result_marker(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win(Color::White) => "1-0",
        Outcome::Win(Color::Black) => "0-1",
        Outcome::Draw(_) => "1/2-1/2",
        Outcome::Ongoing => "*",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::DrawReason;

    fn tokens(text: &str) -> Vec<String> {
        tokenize_movetext(text)
    }

    #[test]
    fn tokenize_plain_moves() {
        assert_eq!(
            tokens("1. e4 e5 2. Nf3 Nc6"),
            vec!["e4", "e5", "Nf3", "Nc6"]
        );
    }

    #[test]
    fn tokenize_glued_move_numbers() {
        assert_eq!(tokens("1.e4 e5 2.Nf3"), vec!["e4", "e5", "Nf3"]);
        assert_eq!(tokens("3...Nf6"), vec!["Nf6"]);
    }

    #[test]
    fn tokenize_strips_comments() {
        assert_eq!(
            tokens("1. e4 {best by test} e5 ; a comment\n2. Nf3"),
            vec!["e4", "e5", "Nf3"]
        );
    }

    #[test]
    fn tokenize_strips_nested_variations() {
        assert_eq!(
            tokens("1. e4 e5 (1... c5 2. Nf3 (2. c3 d5)) 2. Nf3"),
            vec!["e4", "e5", "Nf3"]
        );
    }

    #[test]
    fn tokenize_strips_tags_nags_and_results() {
        let text = "[Event \"Casual\"]\n[Result \"1-0\"]\n\n1. e4 $1 e5 1-0";
        assert_eq!(tokens(text), vec!["e4", "e5"]);
        assert_eq!(tokens("1. d4 d5 1/2-1/2"), vec!["d4", "d5"]);
        assert_eq!(tokens("1. d4 *"), vec!["d4"]);
        // Unbalanced closers are skipped rather than looping.
        assert_eq!(tokens("1. e4) e5]"), vec!["e4", "e5"]);
    }

    #[test]
    fn replay_simple_opening() {
        let game = replay_movetext("1. e4 e5 2. Nf3 Nc6 3. Bb5").unwrap();
        assert_eq!(game.ply_count(), 5);
        assert_eq!(
            game.to_fen(),
            "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
        );
    }

    #[test]
    fn replay_fools_mate_ends_game() {
        let game = replay_movetext("1. f3 e5 2. g4 Qh4# 0-1").unwrap();
        assert!(game.is_over());
        assert_eq!(game.result(), Outcome::Win(Color::Black));
    }

    #[test]
    fn replay_rejects_illegal_move() {
        let err = replay_movetext("1. e4 e5 2. Ke3").unwrap_err();
        assert_eq!(
            err,
            PgnError::IllegalMove {
                ply: 2,
                text: "Ke3".to_string(),
            }
        );
    }

    #[test]
    fn replay_rejects_malformed_move() {
        let err = replay_movetext("1. e4 zz9").unwrap_err();
        assert!(matches!(err, PgnError::MalformedMove { ply: 1, .. }));
    }

    #[test]
    fn render_roundtrips_through_tokenizer() {
        let game = replay_movetext("1. e4 e5 2. Nf3 Nc6").unwrap();
        let text = render_movetext(&game);
        assert_eq!(text, "1. e4 e5 2. Nf3 Nc6 *");
        let replayed = replay_movetext(&text).unwrap();
        assert_eq!(replayed.to_fen(), game.to_fen());
    }

    #[test]
    fn render_marks_finished_games() {
        let game = replay_movetext("1. f3 e5 2. g4 Qh4#").unwrap();
        assert_eq!(render_movetext(&game), "1. f3 e5 2. g4 Qh4# 0-1");
        let stale = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stale.result(), Outcome::Draw(DrawReason::Stalemate));
        assert_eq!(render_movetext(&stale), "1/2-1/2");
    }
}
