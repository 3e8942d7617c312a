//! Piece and color types.

use std::ops::Not;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// FEN placement letter, case-folded. `None` for anything else.
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase FEN letter for this kind.
    pub fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Promotion choice from a single letter, exactly `q`/`r`/`b`/`n` in
    /// either case. Pawns and kings are never a valid choice.
    pub fn from_promotion_letter(letter: &str) -> Option<PieceKind> {
        match letter {
            "q" | "Q" => Some(PieceKind::Queen),
            "r" | "R" => Some(PieceKind::Rook),
            "b" | "B" => Some(PieceKind::Bishop),
            "n" | "N" => Some(PieceKind::Knight),
            _ => None,
        }
    }
}

/// A piece on the board. `has_moved` exists only for castling bookkeeping:
/// it is set when pawns, rooks, or kings move, and a king or rook with the
/// flag set can never castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(&self) -> char {
        match self.color {
            Color::White => self.kind.fen_char().to_ascii_uppercase(),
            Color::Black => self.kind.fen_char(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_char_case() {
        assert_eq!(Piece::new(PieceKind::Knight, Color::White).fen_char(), 'N');
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black).fen_char(), 'n');
        assert_eq!(PieceKind::from_fen_char('Q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }

    #[test]
    fn test_promotion_letters() {
        assert_eq!(
            PieceKind::from_promotion_letter("q"),
            Some(PieceKind::Queen)
        );
        assert_eq!(
            PieceKind::from_promotion_letter("N"),
            Some(PieceKind::Knight)
        );
        // whole-string match only, and no promoting to pawn or king
        assert_eq!(PieceKind::from_promotion_letter("qq"), None);
        assert_eq!(PieceKind::from_promotion_letter("k"), None);
        assert_eq!(PieceKind::from_promotion_letter("p"), None);
        assert_eq!(PieceKind::from_promotion_letter(""), None);
    }

    #[test]
    fn test_color_not() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }
}
