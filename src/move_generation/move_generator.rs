//! Result types of a legal-move query.

use crate::moves::chess_move::Move;

/// Terminal classification of the side to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    pub in_check: bool,
    pub status: GameStatus,
}

impl LegalMoves {
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
