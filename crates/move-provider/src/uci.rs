//! UCI move-text codec.
//!
//! External engines exchange moves as 4-or-5-character coordinate strings
//! (`e2e4`, `e7e8q`), and answer searches with a `bestmove <move> ...`
//! output line.

use chess_rules::{PieceKind, Square};

use crate::error::ProviderError;

/// A move as an external engine states it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl UciMove {
    /// The promotion letter the rules engine accepts for this move, if any.
    pub fn promotion_letter(&self) -> Option<&'static str> {
        match self.promotion? {
            PieceKind::Queen => Some("q"),
            PieceKind::Rook => Some("r"),
            PieceKind::Bishop => Some("b"),
            PieceKind::Knight => Some("n"),
            _ => None,
        }
    }
}

/// Parse UCI move text. Both squares must be on the board and a fifth
/// character, when present, must be a promotion letter.
pub fn parse_move(text: &str) -> Result<UciMove, ProviderError> {
    let text = text.trim();
    if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
        return Err(ProviderError::MalformedMove(text.to_string()));
    }

    let from = Square::parse(&text[0..2])
        .ok_or_else(|| ProviderError::MalformedMove(text.to_string()))?;
    let to = Square::parse(&text[2..4])
        .ok_or_else(|| ProviderError::MalformedMove(text.to_string()))?;

    let promotion = match text.get(4..5) {
        None => None,
        Some(letter) => Some(
            PieceKind::from_promotion_letter(letter)
                .ok_or_else(|| ProviderError::MalformedMove(text.to_string()))?,
        ),
    };

    Ok(UciMove {
        from,
        to,
        promotion,
    })
}

/// Format a move back into UCI text.
pub fn format_move(mv: &UciMove) -> String {
    match mv.promotion_letter() {
        Some(letter) => format!("{}{}{}", mv.from, mv.to, letter),
        None => format!("{}{}", mv.from, mv.to),
    }
}

/// Pull the move out of a `bestmove e2e4 ponder d7d5` output line.
pub fn parse_bestmove_line(line: &str) -> Result<UciMove, ProviderError> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("bestmove") {
        return Err(ProviderError::MissingBestMove(line.to_string()));
    }
    let text = parts
        .next()
        .ok_or_else(|| ProviderError::MissingBestMove(line.to_string()))?;
    parse_move(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_move() {
        let mv = parse_move("e2e4").unwrap();
        assert_eq!(mv.from, Square::parse("e2").unwrap());
        assert_eq!(mv.to, Square::parse("e4").unwrap());
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn test_parse_promotion_move() {
        let mv = parse_move("e7e8q").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.promotion_letter(), Some("q"));

        let mv = parse_move("a2a1N").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert!(parse_move("").is_err());
        assert!(parse_move("e2").is_err());
        assert!(parse_move("e2e9").is_err());
        assert!(parse_move("e7e8x").is_err());
        assert!(parse_move("e2e4e5").is_err());
        assert!(parse_move("éé2e4").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        for text in ["e2e4", "g8f6", "e7e8q", "a2a1n"] {
            let mv = parse_move(text).unwrap();
            assert_eq!(format_move(&mv), text.to_lowercase());
        }
    }

    #[test]
    fn test_parse_bestmove_line() {
        let mv = parse_bestmove_line("bestmove e2e4 ponder d7d5").unwrap();
        assert_eq!(format_move(&mv), "e2e4");

        assert!(parse_bestmove_line("info depth 20 pv e2e4").is_err());
        assert!(parse_bestmove_line("bestmove").is_err());
    }
}
