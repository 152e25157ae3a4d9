use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{generate_sliding_moves, GenerationContext};
use crate::moves::chess_move::Move;
use crate::moves::directions::DIAGONAL_DIRECTIONS;

pub fn generate_bishop_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    generate_sliding_moves(ctx, from, &DIAGONAL_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    fn bishop_move_count(fen: &str, from: &str) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let from = algebraic_to_square(from).expect("square");
        game.legal_moves().moves.iter().filter(|mv| mv.from == from).count()
    }

    #[test]
    fn bishop_pinned_on_file_has_no_moves() {
        assert_eq!(bishop_move_count("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1", "e2"), 0);
    }

    #[test]
    fn bishop_regains_diagonals_without_pinner() {
        // d1, f1, d3 c4 b5 a6, f3 g4 h5
        assert_eq!(bishop_move_count("6k1/8/8/8/8/8/4B3/4K3 w - - 0 1", "e2"), 9);
    }

    #[test]
    fn bishop_pinned_on_diagonal_slides_along_pin() {
        // king a1, bishop c3, enemy bishop f6: b2, d4, e5, xf6
        assert_eq!(bishop_move_count("6k1/8/5b2/8/8/2B5/8/K7 w - - 0 1", "c3"), 4);
    }
}
