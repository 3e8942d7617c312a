//! Position inspector: loads a FEN from the environment and reports the
//! side to move's legal moves square by square.
//!
//! Usage: INSPECT_FEN='8/8/...' cargo run --bin inspect

use anyhow::Context;
use chess_rules::{fen, Engine, Square};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct InspectConfig {
    fen: String,
}

impl InspectConfig {
    fn from_env() -> Self {
        Self {
            fen: std::env::var("INSPECT_FEN").unwrap_or_else(|_| fen::START_FEN.to_string()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = InspectConfig::from_env();

    let mut engine = Engine::new();
    engine
        .load_fen(&config.fen)
        .with_context(|| format!("loading position {:?}", config.fen))?;
    info!(turn = ?engine.current_turn(), "position loaded");

    for rank in 0..8 {
        for file in 0..8 {
            let square = Square::at(rank, file);
            let Some(piece) = engine.board().piece_at(square) else {
                continue;
            };
            if piece.color != engine.current_turn() {
                continue;
            }
            let moves = engine.legal_moves(square);
            if moves.is_empty() {
                continue;
            }
            let destinations = moves
                .iter()
                .map(Square::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            info!(square = %square, piece = ?piece.kind, moves = %destinations, "legal moves");
        }
    }

    info!(fen = %engine.to_fen(), "export");
    Ok(())
}
