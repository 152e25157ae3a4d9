use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_sliding_moves, GenerationContext};
use crate::moves::chess_move::Move;
use crate::moves::directions::ORTHOGONAL_DIRECTIONS;

pub fn generate_rook_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    generate_sliding_moves(ctx, from, &ORTHOGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn rook_targets(fen: &str, from: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let from = algebraic_to_square(from).expect("square");
        let mut names: Vec<String> = game
            .legal_moves()
            .moves
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| crate::utils::algebraic::square_to_algebraic(mv.to))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn rook_stops_at_ally_and_captures_enemy() {
        // a2 pawn blocks the file; the rank runs b1, c1, then captures on d1.
        let targets = rook_targets("4k3/8/8/8/8/8/P7/R2nK3 w - - 0 1", "a1");
        assert_eq!(targets, vec!["b1", "c1", "d1"]);
    }

    #[test]
    fn rook_pinned_on_file_moves_along_it() {
        let targets = rook_targets("4q1k1/8/8/8/8/8/4R3/4K3 w - - 0 1", "e2");
        assert_eq!(targets, vec!["e3", "e4", "e5", "e6", "e7", "e8"]);
    }
}
