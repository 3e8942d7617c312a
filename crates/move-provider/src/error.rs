//! Provider error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("malformed engine move: {0:?}")]
    MalformedMove(String),

    #[error("no bestmove in engine output: {0:?}")]
    MissingBestMove(String),

    #[error("provider replied with an illegal move: {0}")]
    IllegalMove(String),

    #[error("provider has no move for this position")]
    Exhausted,
}
