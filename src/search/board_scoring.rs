//! Static position scoring used at search leaves.
//!
//! Scores are white-positive: white maximizes, black minimizes.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Score when the side to move is checkmated, signed against the mated side.
pub const CHECKMATE_SCORE: i32 = 10_000;
pub const STALEMATE_SCORE: i32 = 0;

pub trait BoardScorer: Send + Sync {
    /// Score from white's perspective.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Plain material count with no positional term.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        game_state
            .board
            .pieces()
            .map(|(_, piece)| match piece.color {
                Color::White => Self::piece_value(piece.kind),
                Color::Black => -Self::piece_value(piece.kind),
            })
            .sum()
    }
}

/// Score of a node with no legal moves.
#[inline]
pub fn terminal_score(side_to_move: Color, in_check: bool) -> i32 {
    match (in_check, side_to_move) {
        (false, _) => STALEMATE_SCORE,
        (true, Color::White) => -CHECKMATE_SCORE,
        (true, Color::Black) => CHECKMATE_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        assert_eq!(MaterialScorer.score(&GameState::new_game()), 0);
    }

    #[test]
    fn material_is_white_positive() {
        let white_up = GameState::from_fen("4k3/8/8/8/8/8/8/QR2K3 w - - 0 1").expect("FEN");
        assert_eq!(MaterialScorer.score(&white_up), 14);

        let black_up = GameState::from_fen("4k1nb/7p/8/8/8/8/8/4K3 b - - 0 1").expect("FEN");
        assert_eq!(MaterialScorer.score(&black_up), -7);
    }

    #[test]
    fn terminal_scores_follow_the_mated_side() {
        assert_eq!(terminal_score(Color::White, true), -CHECKMATE_SCORE);
        assert_eq!(terminal_score(Color::Black, true), CHECKMATE_SCORE);
        assert_eq!(terminal_score(Color::Black, false), STALEMATE_SCORE);
    }
}
