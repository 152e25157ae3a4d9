//! Crate-wide error type.
//!
//! The rules core (generation, apply, undo) is infallible; these variants cover
//! the parsing, configuration, and I/O surfaces around it.

use thiserror::Error;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Error)]
pub enum ChessError {
    /// A FEN string could not be parsed into a playable position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square name such as `e4` was malformed.
    #[error("invalid algebraic square: {0}")]
    InvalidAlgebraic(String),

    /// Text input did not name a move from the current legal list.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// Pawns may only promote to knight, bishop, rook or queen.
    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(String),

    #[error("invalid engine option {name}={value}")]
    InvalidOption { name: String, value: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
