//! FEN codec: six space-separated fields — placement, active color,
//! castling availability, en-passant target, halfmove clock, fullmove
//! number. The last two are accepted on import and emitted as constants on
//! export; the engine does not track them.

use crate::board::Board;
use crate::error::FenError;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// The standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The parts of engine state a FEN string carries.
#[derive(Debug)]
pub(crate) struct FenFields {
    pub board: Board,
    pub turn: Color,
    pub last_move: Option<(Square, Square)>,
}

/// Parse a FEN string into a fresh state. Nothing is committed anywhere on
/// failure, so callers can keep their prior state intact.
pub(crate) fn parse(fen: &str) -> Result<FenFields, FenError> {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().ok_or(FenError::MissingField("placement"))?;
    let active = fields.next().ok_or(FenError::MissingField("active color"))?;
    let castling = fields.next().ok_or(FenError::MissingField("castling"))?;
    let en_passant = fields
        .next()
        .ok_or(FenError::MissingField("en passant target"))?;
    // halfmove clock and fullmove number: consumed, never interpreted
    let _ = fields.next();
    let _ = fields.next();

    let mut board = parse_placement(placement)?;
    apply_castling_field(&mut board, castling);

    let turn = if active == "w" {
        Color::White
    } else {
        Color::Black
    };

    let last_move = if en_passant == "-" {
        None
    } else {
        let target = Square::parse(en_passant)
            .ok_or_else(|| FenError::BadEnPassant(en_passant.to_string()))?;
        // reconstruct the double-step pawn advance that produced the target,
        // so en-passant capture works immediately after import
        let (from_rank, to_rank) = if target.rank() == 2 { (1, 3) } else { (6, 4) };
        Some((
            Square::at(from_rank, target.file()),
            Square::at(to_rank, target.file()),
        ))
    };

    Ok(FenFields {
        board,
        turn,
        last_move,
    })
}

/// Serialize board, turn, and last-move memory to FEN.
pub(crate) fn render(board: &Board, turn: Color, last_move: Option<(Square, Square)>) -> String {
    let mut placement = String::new();
    for rank in 0..8u8 {
        let mut empty = 0u8;
        for file in 0..8u8 {
            match board.piece_at(Square::at(rank, file)) {
                Some(piece) => {
                    if empty > 0 {
                        placement.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    placement.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push((b'0' + empty) as char);
        }
        if rank < 7 {
            placement.push('/');
        }
    }

    let active = match turn {
        Color::White => 'w',
        Color::Black => 'b',
    };

    let mut castling = String::new();
    if right_intact(board, Square::at(7, 4), Square::at(7, 7)) {
        castling.push('K');
    }
    if right_intact(board, Square::at(7, 4), Square::at(7, 0)) {
        castling.push('Q');
    }
    if right_intact(board, Square::at(0, 4), Square::at(0, 7)) {
        castling.push('k');
    }
    if right_intact(board, Square::at(0, 4), Square::at(0, 0)) {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = en_passant_target(board, last_move)
        .map(|sq| sq.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!("{placement} {active} {castling} {en_passant} 0 1")
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let mut board = Board::empty();
    let mut rank: u8 = 0;
    let mut file: u8 = 0;

    for c in placement.chars() {
        match c {
            '/' => {
                if rank >= 7 {
                    return Err(FenError::BadPlacement("too many ranks"));
                }
                rank += 1;
                file = 0;
            }
            '1'..='8' => {
                file += c as u8 - b'0';
                if file > 8 {
                    return Err(FenError::BadPlacement("rank overflows the board"));
                }
            }
            _ => {
                let kind = PieceKind::from_fen_char(c).ok_or(FenError::UnknownPiece(c))?;
                if file >= 8 {
                    return Err(FenError::BadPlacement("rank overflows the board"));
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                board.set(Square::at(rank, file), Some(Piece::new(kind, color)));
                file += 1;
            }
        }
    }

    Ok(board)
}

/// Translate castling availability into has-moved flags.
///
/// Presence of a letter means the right still exists, so absence is what
/// marks pieces as moved: a missing letter marks that side's rook, and a
/// side with neither of its letters present gets its king marked too. This
/// is the only absence-driven mapping under which every exportable rights
/// combination survives a load/export round-trip.
fn apply_castling_field(board: &mut Board, castling: &str) {
    let sides = [('K', 'Q', 7u8), ('k', 'q', 0u8)];
    for (kingside, queenside, home) in sides {
        let has_kingside = castling.contains(kingside);
        let has_queenside = castling.contains(queenside);
        if !has_kingside {
            mark_moved(board, Square::at(home, 7));
        }
        if !has_queenside {
            mark_moved(board, Square::at(home, 0));
        }
        if !has_kingside && !has_queenside {
            mark_moved(board, Square::at(home, 4));
        }
    }
}

fn mark_moved(board: &mut Board, square: Square) {
    if let Some(piece) = board.piece_mut(square) {
        piece.has_moved = true;
    }
}

/// A castling letter is emitted while the pieces on the king and rook home
/// squares are a never-moved king and rook.
fn right_intact(board: &Board, king_square: Square, rook_square: Square) -> bool {
    let king_ok = matches!(
        board.piece_at(king_square),
        Some(p) if p.kind == PieceKind::King && !p.has_moved
    );
    let rook_ok = matches!(
        board.piece_at(rook_square),
        Some(p) if p.kind == PieceKind::Rook && !p.has_moved
    );
    king_ok && rook_ok
}

/// The en-passant target exists only while the last move was a two-square
/// pawn advance: the square the pawn skipped.
fn en_passant_target(board: &Board, last_move: Option<(Square, Square)>) -> Option<Square> {
    let (from, to) = last_move?;
    let piece = board.piece_at(to)?;
    if piece.kind != PieceKind::Pawn {
        return None;
    }
    if (from.rank() as i8 - to.rank() as i8).abs() != 2 {
        return None;
    }
    Square::new((from.rank() + to.rank()) / 2, to.file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_position() {
        let state = parse(START_FEN).unwrap();
        assert_eq!(state.turn, Color::White);
        assert_eq!(state.last_move, None);
        assert_eq!(state.board, Board::standard());
    }

    #[test]
    fn test_render_start_position() {
        assert_eq!(render(&Board::standard(), Color::White, None), START_FEN);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(parse("").unwrap_err(), FenError::MissingField("placement"));
        assert_eq!(
            parse("8/8/8/8/8/8/8/8").unwrap_err(),
            FenError::MissingField("active color")
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w").unwrap_err(),
            FenError::MissingField("castling")
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w -").unwrap_err(),
            FenError::MissingField("en passant target")
        );
        // halfmove/fullmove are optional
        assert!(parse("8/8/8/8/8/8/8/8 w - -").is_ok());
    }

    #[test]
    fn test_placement_errors() {
        assert_eq!(
            parse("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err(),
            FenError::UnknownPiece('x'),
        );
        assert_eq!(
            parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err(),
            FenError::BadPlacement("rank overflows the board"),
        );
        assert_eq!(
            parse("8/8/8/8/8/8/8/8/k7 w - - 0 1").unwrap_err(),
            FenError::BadPlacement("too many ranks"),
        );
    }

    #[test]
    fn test_castling_absence_marks_pieces() {
        let state = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kkq - 0 1").unwrap();
        let board = state.board;
        // white queenside rook lost its right, the king kept kingside
        assert!(board.piece_at(Square::at(7, 0)).unwrap().has_moved);
        assert!(!board.piece_at(Square::at(7, 7)).unwrap().has_moved);
        assert!(!board.piece_at(Square::at(7, 4)).unwrap().has_moved);
        // black kept everything
        assert!(!board.piece_at(Square::at(0, 0)).unwrap().has_moved);
        assert!(!board.piece_at(Square::at(0, 4)).unwrap().has_moved);
    }

    #[test]
    fn test_castling_none_marks_kings() {
        let state = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1").unwrap();
        assert!(state.board.piece_at(Square::at(7, 4)).unwrap().has_moved);
        assert!(state.board.piece_at(Square::at(0, 4)).unwrap().has_moved);
    }

    #[test]
    fn test_en_passant_reconstructs_last_move() {
        let state =
            parse("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1").unwrap();
        assert_eq!(
            state.last_move,
            Some((Square::at(1, 4), Square::at(3, 4)))
        );

        let state =
            parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(
            state.last_move,
            Some((Square::at(6, 4), Square::at(4, 4)))
        );
    }

    #[test]
    fn test_bad_en_passant_target() {
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 w - e9 0 1").unwrap_err(),
            FenError::BadEnPassant("e9".to_string()),
        );
    }

    #[test]
    fn test_active_color_leniency() {
        assert_eq!(parse("8/8/8/8/8/8/8/8 w - - 0 1").unwrap().turn, Color::White);
        assert_eq!(parse("8/8/8/8/8/8/8/8 b - - 0 1").unwrap().turn, Color::Black);
        // anything that is not "w" plays as Black
        assert_eq!(parse("8/8/8/8/8/8/8/8 z - - 0 1").unwrap().turn, Color::Black);
    }

    #[test]
    fn test_en_passant_render_only_after_double_step() {
        let state =
            parse("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1").unwrap();
        let fen = render(&state.board, state.turn, state.last_move);
        assert!(fen.contains(" e6 "));

        // a single-step memory renders no target
        let single = Some((Square::at(1, 4), Square::at(2, 4)));
        assert!(en_passant_target(&state.board, single).is_none());
    }
}
