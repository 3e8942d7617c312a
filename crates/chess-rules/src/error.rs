//! Engine error types.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("unrecognized piece character: {0:?}")]
    UnknownPiece(char),

    #[error("malformed piece placement: {0}")]
    BadPlacement(&'static str),

    #[error("invalid en passant target: {0:?}")]
    BadEnPassant(String),
}
