//! The board engine: side to move, move generation, move validation and
//! application, and the two-step promotion protocol.

use tracing::debug;

use crate::board::{Board, DIAGONALS, KING_STEPS, KNIGHT_JUMPS, STRAIGHTS};
use crate::error::FenError;
use crate::fen;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Chess rules engine over one game state.
///
/// All operations are synchronous and the engine holds no internal locks;
/// a caller exposing it behind a service boundary serializes access.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    turn: Color,
    /// From/to of the most recent move; drives en-passant detection.
    last_move: Option<(Square, Square)>,
    /// From/to of a move waiting for its promotion letter.
    pending_promotion: Option<(Square, Square)>,
}

impl Engine {
    /// An engine in the standard starting position, White to move.
    pub fn new() -> Engine {
        Engine {
            board: Board::standard(),
            turn: Color::White,
            last_move: None,
            pending_promotion: None,
        }
    }

    /// Reset to the starting position.
    pub fn reset(&mut self) {
        *self = Engine::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Color {
        self.turn
    }

    pub fn promotion_pending(&self) -> bool {
        self.pending_promotion.is_some()
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.board.is_king_in_check(color)
    }

    /// Replace the whole game state from a FEN string. On error the prior
    /// state is left completely intact.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let state = fen::parse(fen)?;
        self.board = state.board;
        self.turn = state.turn;
        self.last_move = state.last_move;
        self.pending_promotion = None;
        debug!(turn = ?self.turn, "position imported from FEN");
        Ok(())
    }

    /// Serialize the current state to FEN.
    pub fn to_fen(&self) -> String {
        fen::render(&self.board, self.turn, self.last_move)
    }

    /// Fully-legal destination squares for the piece on `from`; empty when
    /// the square is unoccupied. Not gated on whose turn it is.
    pub fn legal_moves(&mut self, from: Square) -> Vec<Square> {
        if self.board.piece_at(from).is_none() {
            return Vec::new();
        }
        self.piece_moves(from, true)
    }

    /// Whether `from`→`to` is acceptable for the side to move.
    ///
    /// A pawn reaching its last rank with no promotion letter is accepted
    /// and pins a pending promotion: from then on only the same move with a
    /// letter validates, until it is completed through [`Engine::make_move`].
    pub fn validate_move(&mut self, from: Square, to: Square, promotion: Option<&str>) -> bool {
        let promotion = promotion.filter(|p| !p.is_empty());

        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };
        if piece.color != self.turn {
            return false;
        }

        if self.pending_promotion.is_some() {
            return self.pending_promotion == Some((from, to)) && promotion.is_some();
        }

        if !self.legal_moves(from).contains(&to) {
            return false;
        }

        if self.is_promotion_move(from, to) && promotion.is_none() {
            self.pending_promotion = Some((from, to));
        }
        true
    }

    /// Validate and apply a move. Returns `false`, with no state change, on
    /// any rejection. On success the move is recorded and the turn flips.
    pub fn make_move(&mut self, from: Square, to: Square, promotion: Option<&str>) -> bool {
        if !self.validate_move(from, to, promotion) {
            return false;
        }
        let promotion = promotion.filter(|p| !p.is_empty());
        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };

        if self.pending_promotion.is_some() {
            let Some(kind) = promotion.and_then(PieceKind::from_promotion_letter) else {
                return false;
            };
            self.board.set(to, Some(Piece::new(kind, self.turn)));
            self.board.set(from, None);
            self.pending_promotion = None;
        } else if piece.kind == PieceKind::King && file_distance(from, to) == 2 {
            // castling: the rook crosses to the square the king passed over
            let mut king = piece;
            king.has_moved = true;
            self.board.set(to, Some(king));
            self.board.set(from, None);

            let kingside = to.file() > from.file();
            let rook_from = Square::at(from.rank(), if kingside { 7 } else { 0 });
            let rook_to = Square::at(
                from.rank(),
                if kingside { from.file() + 1 } else { from.file() - 1 },
            );
            let rook = self.board.piece_at(rook_from).map(|mut rook| {
                rook.has_moved = true;
                rook
            });
            self.board.set(rook_to, rook);
            self.board.set(rook_from, None);
        } else if piece.kind == PieceKind::Pawn
            && from.file() != to.file()
            && self.board.piece_at(to).is_none()
        {
            // en passant: the captured pawn sits beside the origin, on the
            // destination file
            self.board.set(to, Some(piece));
            self.board.set(from, None);
            self.board.set(Square::at(from.rank(), to.file()), None);
        } else {
            let mut moved = piece;
            if matches!(
                piece.kind,
                PieceKind::Pawn | PieceKind::Rook | PieceKind::King
            ) {
                moved.has_moved = true;
            }
            self.board.set(to, Some(moved));
            self.board.set(from, None);
        }

        self.last_move = Some((from, to));
        self.turn = !self.turn;
        true
    }

    /// Destinations for the piece on `from`. With `legal`, pseudo-legal
    /// candidates that would leave the mover's king in check are filtered
    /// out (king moves are instead screened against attacked squares during
    /// generation).
    fn piece_moves(&mut self, from: Square, legal: bool) -> Vec<Square> {
        let Some(piece) = self.board.piece_at(from) else {
            return Vec::new();
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, legal),
            PieceKind::Knight => self.knight_moves(from, legal),
            PieceKind::Bishop => self.sliding_moves(from, &DIAGONALS, legal),
            PieceKind::Rook => self.sliding_moves(from, &STRAIGHTS, legal),
            PieceKind::Queen => self.sliding_moves(from, &KING_STEPS, legal),
            PieceKind::King => self.king_moves(from, legal),
        }
    }

    fn pawn_moves(&mut self, from: Square, legal: bool) -> Vec<Square> {
        let Some(pawn) = self.board.piece_at(from) else {
            return Vec::new();
        };
        let dir: i8 = if pawn.color == Color::White { -1 } else { 1 };
        let start_rank: u8 = if pawn.color == Color::White { 6 } else { 1 };
        let mut moves = Vec::new();

        if let Some(one) = from.offset(dir, 0) {
            if self.board.piece_at(one).is_none() {
                moves.push(one);
                // the double step only from the starting rank, through an
                // empty square
                if from.rank() == start_rank {
                    if let Some(two) = from.offset(2 * dir, 0) {
                        if self.board.piece_at(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target) = from.offset(dir, df) else {
                continue;
            };
            match self.board.piece_at(target) {
                Some(other) if other.color != pawn.color => moves.push(target),
                None if self.is_en_passant(from, target) => moves.push(target),
                _ => {}
            }
        }

        if legal {
            self.retain_king_safe(from, moves)
        } else {
            moves
        }
    }

    fn knight_moves(&mut self, from: Square, legal: bool) -> Vec<Square> {
        let Some(knight) = self.board.piece_at(from) else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for &(dr, df) in &KNIGHT_JUMPS {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            match self.board.piece_at(to) {
                Some(other) if other.color == knight.color => {}
                _ => moves.push(to),
            }
        }

        if legal {
            self.retain_king_safe(from, moves)
        } else {
            moves
        }
    }

    fn sliding_moves(&mut self, from: Square, directions: &[(i8, i8)], legal: bool) -> Vec<Square> {
        let Some(slider) = self.board.piece_at(from) else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for &(dr, df) in directions {
            for dist in 1..8 {
                let Some(to) = from.offset(dr * dist, df * dist) else {
                    break;
                };
                match self.board.piece_at(to) {
                    None => moves.push(to),
                    Some(other) => {
                        if other.color != slider.color {
                            moves.push(to);
                        }
                        break;
                    }
                }
            }
        }

        if legal {
            self.retain_king_safe(from, moves)
        } else {
            moves
        }
    }

    fn king_moves(&mut self, from: Square, legal: bool) -> Vec<Square> {
        let Some(king) = self.board.piece_at(from) else {
            return Vec::new();
        };
        let mut moves = Vec::new();
        for &(dr, df) in &KING_STEPS {
            let Some(to) = from.offset(dr, df) else {
                continue;
            };
            if matches!(self.board.piece_at(to), Some(other) if other.color == king.color) {
                continue;
            }
            if legal && self.board.is_square_attacked(to, king.color) {
                continue;
            }
            moves.push(to);
        }

        if !king.has_moved && !self.board.is_king_in_check(king.color) {
            moves.extend(self.castling_moves(from));
        }

        moves
    }

    /// Castling destinations for the king on `from`.
    ///
    /// Kingside requires every square strictly between king and rook to be
    /// empty and unattacked. Queenside requires the same empty path, but
    /// only the files above 1 must be unattacked: the b-file square next to
    /// the rook is exempt from the attack check.
    fn castling_moves(&mut self, from: Square) -> Vec<Square> {
        let Some(king) = self.board.piece_at(from) else {
            return Vec::new();
        };
        if king.kind != PieceKind::King || king.has_moved {
            return Vec::new();
        }
        let color = king.color;
        let home: u8 = if color == Color::White { 7 } else { 0 };
        let mut moves = Vec::new();

        let kingside_rook = self.board.piece_at(Square::at(home, 7));
        if castling_rook(kingside_rook, color) {
            let mut path_clear = true;
            let mut file = from.file() as i8 + 1;
            while file < 7 {
                let sq = Square::at(home, file as u8);
                if self.board.piece_at(sq).is_some() || self.board.is_square_attacked(sq, color) {
                    path_clear = false;
                    break;
                }
                file += 1;
            }
            if path_clear {
                if let Some(to) = Square::from_signed(home as i8, from.file() as i8 + 2) {
                    moves.push(to);
                }
            }
        }

        let queenside_rook = self.board.piece_at(Square::at(home, 0));
        if castling_rook(queenside_rook, color) {
            let mut path_clear = true;
            let mut file = from.file() as i8 - 1;
            while file > 0 {
                let sq = Square::at(home, file as u8);
                if self.board.piece_at(sq).is_some()
                    || (file > 1 && self.board.is_square_attacked(sq, color))
                {
                    path_clear = false;
                    break;
                }
                file -= 1;
            }
            if path_clear {
                if let Some(to) = Square::from_signed(home as i8, from.file() as i8 - 2) {
                    moves.push(to);
                }
            }
        }

        moves
    }

    /// Whether a diagonal pawn move onto an empty square is an en-passant
    /// capture: the previous move must have been a two-square advance by an
    /// opposing pawn that landed beside the capturing pawn, on the
    /// destination file.
    fn is_en_passant(&self, from: Square, to: Square) -> bool {
        let Some(pawn) = self.board.piece_at(from) else {
            return false;
        };
        if pawn.kind != PieceKind::Pawn || from.file() == to.file() {
            return false;
        }
        if self.board.piece_at(to).is_some() {
            return false;
        }
        let Some((last_from, last_to)) = self.last_move else {
            return false;
        };
        let Some(last_piece) = self.board.piece_at(last_to) else {
            return false;
        };
        if last_piece.kind != PieceKind::Pawn || last_piece.color == pawn.color {
            return false;
        }
        rank_distance(last_from, last_to) == 2
            && last_to.file() == to.file()
            && last_to.rank() == from.rank()
    }

    fn is_promotion_move(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };
        if piece.kind != PieceKind::Pawn {
            return false;
        }
        let last_rank = if piece.color == Color::White { 0 } else { 7 };
        to.rank() == last_rank
    }

    fn retain_king_safe(&mut self, from: Square, mut moves: Vec<Square>) -> Vec<Square> {
        moves.retain(|&to| !self.board.would_expose_king(from, to));
        moves
    }
}

impl Default for Engine {
    fn default() -> Engine {
        Engine::new()
    }
}

fn castling_rook(piece: Option<Piece>, color: Color) -> bool {
    matches!(piece, Some(p) if p.kind == PieceKind::Rook && p.color == color && !p.has_moved)
}

fn file_distance(a: Square, b: Square) -> u8 {
    (a.file() as i8 - b.file() as i8).unsigned_abs()
}

fn rank_distance(a: Square, b: Square) -> u8 {
    (a.rank() as i8 - b.rank() as i8).unsigned_abs()
}
