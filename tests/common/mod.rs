#![allow(dead_code)]

use chess_rules::{Engine, Square};

/// Parse an algebraic square, panicking on bad input (test convenience).
pub fn sq(name: &str) -> Square {
    Square::parse(name).unwrap_or_else(|| panic!("bad square: {name}"))
}

/// Build an engine holding the given position.
pub fn engine_at(fen: &str) -> Engine {
    let mut engine = Engine::new();
    engine
        .load_fen(fen)
        .unwrap_or_else(|e| panic!("bad FEN in test ({fen}): {e}"));
    engine
}

/// Play a sequence of `"e2e4"`-style moves, panicking if any is rejected.
pub fn play(engine: &mut Engine, moves: &[&str]) {
    for text in moves {
        let from = sq(&text[0..2]);
        let to = sq(&text[2..4]);
        assert!(engine.make_move(from, to, None), "move {text} was rejected");
    }
}
