use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_sliding_moves, GenerationContext};
use crate::moves::chess_move::Move;
use crate::moves::directions::ALL_DIRECTIONS;

pub fn generate_queen_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    generate_sliding_moves(ctx, from, &ALL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn queen_move_count(fen: &str, from: &str) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let from = algebraic_to_square(from).expect("square");
        game.legal_moves().moves.iter().filter(|mv| mv.from == from).count()
    }

    #[test]
    fn queen_in_open_centre() {
        assert_eq!(queen_move_count("k7/8/8/8/3Q4/8/8/7K w - - 0 1", "d4"), 27);
    }

    #[test]
    fn queen_pinned_diagonally_keeps_only_the_pin_line() {
        // king a1, queen b2, enemy bishop d4: c3, xd4
        assert_eq!(queen_move_count("7k/8/8/8/3b4/8/1Q6/K7 w - - 0 1", "b2"), 2);
    }
}
