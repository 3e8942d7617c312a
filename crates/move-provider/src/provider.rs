//! The injected best-move collaborator.

use chess_rules::{Engine, Square};
use tracing::debug;

use crate::error::ProviderError;
use crate::uci::{self, UciMove};

/// Something that can answer "best move for this position" — an engine
/// subprocess wrapper, a remote service, an opening book. Implementations
/// own their I/O; the rules engine never talks to them directly.
pub trait BestMoveProvider {
    /// Compute the best move for `fen` at the given search depth.
    fn best_move(&mut self, fen: &str, depth: u32) -> Result<UciMove, ProviderError>;
}

/// Ask `provider` for a move in the engine's current position and apply it.
///
/// Promotions run through the engine's two-step protocol: the first
/// application pins the pending promotion, the second supplies the letter.
/// A reply the engine rejects surfaces as [`ProviderError::IllegalMove`]
/// and does not advance the turn.
pub fn play_provider_move(
    engine: &mut Engine,
    provider: &mut dyn BestMoveProvider,
    depth: u32,
) -> Result<(Square, Square), ProviderError> {
    let fen = engine.to_fen();
    let mv = provider.best_move(&fen, depth)?;
    debug!(best = %uci::format_move(&mv), %fen, "applying provider move");

    if engine.make_move(mv.from, mv.to, None) {
        return Ok((mv.from, mv.to));
    }
    if engine.promotion_pending() {
        if let Some(letter) = mv.promotion_letter() {
            if engine.make_move(mv.from, mv.to, Some(letter)) {
                return Ok((mv.from, mv.to));
            }
        }
    }

    Err(ProviderError::IllegalMove(uci::format_move(&mv)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::Color;

    /// Replays a fixed script of UCI moves.
    struct Scripted(Vec<&'static str>);

    impl BestMoveProvider for Scripted {
        fn best_move(&mut self, _fen: &str, _depth: u32) -> Result<UciMove, ProviderError> {
            if self.0.is_empty() {
                return Err(ProviderError::Exhausted);
            }
            uci::parse_move(self.0.remove(0))
        }
    }

    #[test]
    fn test_legal_reply_advances_turn() {
        let mut engine = Engine::new();
        let mut provider = Scripted(vec!["e2e4"]);

        let (from, to) = play_provider_move(&mut engine, &mut provider, 12).unwrap();
        assert_eq!(from, Square::parse("e2").unwrap());
        assert_eq!(to, Square::parse("e4").unwrap());
        assert_eq!(engine.current_turn(), Color::Black);
    }

    #[test]
    fn test_illegal_reply_leaves_engine_alone() {
        let mut engine = Engine::new();
        let before = engine.to_fen();
        let mut provider = Scripted(vec!["e2e5"]);

        let err = play_provider_move(&mut engine, &mut provider, 12).unwrap_err();
        assert!(matches!(err, ProviderError::IllegalMove(_)));
        assert_eq!(engine.to_fen(), before);
        assert_eq!(engine.current_turn(), Color::White);
    }

    #[test]
    fn test_exhausted_script() {
        let mut engine = Engine::new();
        let mut provider = Scripted(vec![]);
        let err = play_provider_move(&mut engine, &mut provider, 12).unwrap_err();
        assert!(matches!(err, ProviderError::Exhausted));
    }
}
