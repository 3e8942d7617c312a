//! The 8×8 board grid and attack detection.
//!
//! Each cell owns at most one piece value; there is no shared ownership of
//! pieces anywhere. Check probing mutates the grid in place and restores it
//! before returning, rather than cloning the board.

use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Knight jump offsets, in generation order.
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Diagonal ray directions (bishop and half the queen).
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal ray directions (rook and half the queen).
pub(crate) const STRAIGHTS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The eight adjacent offsets, in generation order (also the queen's
/// direction set).
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Board {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Board {
        use PieceKind::*;

        let mut board = Board::empty();
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (file, &kind) in back_rank.iter().enumerate() {
            board.grid[0][file] = Some(Piece::new(kind, Color::Black));
            board.grid[7][file] = Some(Piece::new(kind, Color::White));
        }
        for file in 0..8 {
            board.grid[1][file] = Some(Piece::new(Pawn, Color::Black));
            board.grid[6][file] = Some(Piece::new(Pawn, Color::White));
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.rank() as usize][square.file() as usize] = piece;
    }

    pub(crate) fn piece_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.grid[square.rank() as usize][square.file() as usize].as_mut()
    }

    /// Locate a color's king. `None` only for externally-loaded positions
    /// without one (or mid-simulation).
    pub fn find_king(&self, color: Color) -> Option<Square> {
        for rank in 0..8 {
            for file in 0..8 {
                let square = Square::at(rank, file);
                if let Some(piece) = self.piece_at(square) {
                    if piece.kind == PieceKind::King && piece.color == color {
                        return Some(square);
                    }
                }
            }
        }
        None
    }

    /// Whether any piece of the opposing color attacks `square`.
    ///
    /// Scans outward from the square: pawns at the two diagonal offsets
    /// toward the defender's home rank, knights at the eight jumps, sliders
    /// along rays that stop at the first occupied square, and the enemy king
    /// on adjacent squares.
    pub fn is_square_attacked(&self, square: Square, defending: Color) -> bool {
        let attacking = !defending;

        let pawn_dir: i8 = if defending == Color::White { 1 } else { -1 };
        for df in [-1, 1] {
            if let Some(sq) = square.offset(pawn_dir, df) {
                if self.holds(sq, attacking, &[PieceKind::Pawn]) {
                    return true;
                }
            }
        }

        for &(dr, df) in &KNIGHT_JUMPS {
            if let Some(sq) = square.offset(dr, df) {
                if self.holds(sq, attacking, &[PieceKind::Knight]) {
                    return true;
                }
            }
        }

        if self.ray_hits(square, &DIAGONALS, attacking, &[PieceKind::Bishop, PieceKind::Queen]) {
            return true;
        }
        if self.ray_hits(square, &STRAIGHTS, attacking, &[PieceKind::Rook, PieceKind::Queen]) {
            return true;
        }

        for &(dr, df) in &KING_STEPS {
            if let Some(sq) = square.offset(dr, df) {
                if self.holds(sq, attacking, &[PieceKind::King]) {
                    return true;
                }
            }
        }

        false
    }

    /// Whether that color's king is attacked. An absent king is reported as
    /// not in check so externally-loaded positions stay navigable.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_square_attacked(king, color),
            None => false,
        }
    }

    /// Whether playing `from`→`to` would leave the mover's own king in
    /// check.
    ///
    /// Simulates the move in place — including removing the passed pawn when
    /// the move is an en-passant capture — and restores the grid on every
    /// path, so the board compares equal before and after the probe.
    pub fn would_expose_king(&mut self, from: Square, to: Square) -> bool {
        let Some(moving) = self.piece_at(from) else {
            return false;
        };
        let captured = self.piece_at(to);

        self.set(to, Some(moving));
        self.set(from, None);

        let mut passed_pawn: Option<(Square, Option<Piece>)> = None;
        if moving.kind == PieceKind::Pawn && from.file() != to.file() && captured.is_none() {
            let ep_square = Square::at(from.rank(), to.file());
            passed_pawn = Some((ep_square, self.piece_at(ep_square)));
            self.set(ep_square, None);
        }

        let in_check = self.is_king_in_check(moving.color);

        self.set(from, Some(moving));
        self.set(to, captured);
        if let Some((ep_square, pawn)) = passed_pawn {
            self.set(ep_square, pawn);
        }

        in_check
    }

    fn holds(&self, square: Square, color: Color, kinds: &[PieceKind]) -> bool {
        matches!(self.piece_at(square), Some(p) if p.color == color && kinds.contains(&p.kind))
    }

    fn ray_hits(
        &self,
        square: Square,
        directions: &[(i8, i8)],
        color: Color,
        kinds: &[PieceKind],
    ) -> bool {
        for &(dr, df) in directions {
            for dist in 1..8 {
                let Some(sq) = square.offset(dr * dist, df * dist) else {
                    break;
                };
                if let Some(piece) = self.piece_at(sq) {
                    if piece.color == color && kinds.contains(&piece.kind) {
                        return true;
                    }
                    break;
                }
            }
        }
        false
    }
}
