//! Full legal move generation pipeline.
//!
//! Runs the pin/check detector once, generates per-piece moves that already
//! respect pins, then filters by the check situation: a single check keeps
//! only king moves and moves that capture or block the checker, a double
//! check keeps only king moves, and a quiet position adds castling.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{detect_pins_and_checks, Check};
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castling_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{GameStatus, LegalMoves};
use crate::moves::chess_move::Move;

/// Legal moves for the side to move, without touching the game state.
pub fn generate_legal_moves(game_state: &GameState) -> LegalMoves {
    let side = game_state.side_to_move;
    let king_square = game_state.king_location(side);
    let pins_and_checks = detect_pins_and_checks(&game_state.board, side, king_square);

    let ctx = GenerationContext {
        board: &game_state.board,
        side,
        king_square,
        en_passant_square: game_state.en_passant_square,
        pins_and_checks: &pins_and_checks,
    };

    let mut moves = Vec::<Move>::with_capacity(64);

    match pins_and_checks.checks.as_slice() {
        [] => {
            generate_pseudo_legal_moves(&ctx, &mut moves);
            generate_castling_moves(&ctx, game_state.castling_rights, &mut moves);
        }
        [check] => {
            generate_pseudo_legal_moves(&ctx, &mut moves);
            retain_check_resolutions(&mut moves, check, king_square);
        }
        _ => generate_king_moves(&ctx, king_square, &mut moves),
    }

    let in_check = pins_and_checks.in_check();
    let status = match (moves.is_empty(), in_check) {
        (false, _) => GameStatus::Ongoing,
        (true, true) => GameStatus::Checkmate,
        (true, false) => GameStatus::Stalemate,
    };

    LegalMoves {
        moves,
        in_check,
        status,
    }
}

/// Every move of the side to move in board-scan order. Pins are honoured;
/// king steps are individually safe; checks on the king are not yet applied.
fn generate_pseudo_legal_moves(ctx: &GenerationContext<'_>, out: &mut Vec<Move>) {
    for (from, piece) in ctx.board.pieces_of(ctx.side) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(ctx, from, out),
            PieceKind::Knight => generate_knight_moves(ctx, from, out),
            PieceKind::Bishop => generate_bishop_moves(ctx, from, out),
            PieceKind::Rook => generate_rook_moves(ctx, from, out),
            PieceKind::Queen => generate_queen_moves(ctx, from, out),
            PieceKind::King => generate_king_moves(ctx, from, out),
        }
    }
}

fn retain_check_resolutions(moves: &mut Vec<Move>, check: &Check, king_square: Square) {
    let resolving = check.resolving_squares(king_square);
    moves.retain(|mv| {
        mv.moved.kind == PieceKind::King
            || resolving.contains(&mv.to)
            || (mv.is_en_passant && mv.capture_square() == check.square)
    });
}

impl GameState {
    /// Pure legal-move query.
    #[inline]
    pub fn legal_moves(&self) -> LegalMoves {
        generate_legal_moves(self)
    }

    /// Legal moves for the side to move; records in-check, checkmate and
    /// stalemate on the state for display.
    pub fn generate_legal_moves(&mut self) -> Vec<Move> {
        let legal = generate_legal_moves(self);
        self.in_check = legal.in_check;
        self.checkmate = legal.status == GameStatus::Checkmate;
        self.stalemate = legal.status == GameStatus::Stalemate;
        legal.moves
    }
}

#[cfg(test)]
mod tests {
    use super::generate_legal_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::GameStatus;
    use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn twenty_moves_from_start() {
        let mut game = GameState::new_game();
        let moves = game.generate_legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(!game.is_in_check());
        assert!(!game.is_checkmate());
        assert!(!game.is_stalemate());
    }

    #[test]
    fn single_check_allows_block_capture_or_king_move() {
        // rook e8 checks e1: bishop blocks on e2/e6, knight blocks on e4 or captures
        let game = GameState::from_fen("4r2k/8/3N4/8/2B5/8/8/4K3 w - - 0 1").expect("FEN");
        let legal = generate_legal_moves(&game);
        assert!(legal.in_check);

        let mut names: Vec<String> = legal
            .moves
            .iter()
            .map(|mv| format!("{}{}", square_to_algebraic(mv.from), square_to_algebraic(mv.to)))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["c4e2", "c4e6", "d6e4", "d6e8", "e1d1", "e1d2", "e1f1", "e1f2"]
        );
    }

    #[test]
    fn knight_check_cannot_be_blocked() {
        // Knight d3 checks e1; the rook on d8 can capture it, the bishop cannot interpose.
        let game = GameState::from_fen("3R4/7k/8/8/8/3n4/8/2B1K3 w - - 0 1").expect("FEN");
        let legal = generate_legal_moves(&game);
        let non_king: Vec<_> = legal
            .moves
            .iter()
            .filter(|mv| mv.moved.kind != PieceKind::King)
            .collect();
        assert_eq!(non_king.len(), 1);
        assert_eq!(non_king[0].to, sq("d3"));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/3n4/8/R3K3 w - - 0 1").expect("FEN");
        let legal = generate_legal_moves(&game);
        assert!(legal.in_check);
        assert!(!legal.moves.is_empty());
        assert!(legal.moves.iter().all(|mv| mv.moved.kind == PieceKind::King));
    }

    #[test]
    fn en_passant_can_capture_the_checking_pawn() {
        // Black just played d7-d5, giving check to the king on e4.
        let game = GameState::from_fen("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1").expect("FEN");
        let legal = generate_legal_moves(&game);
        assert!(legal.in_check);
        assert!(legal.moves.iter().any(|mv| mv.is_en_passant));
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let mut game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        let moves = game.generate_legal_moves();
        assert!(moves.is_empty());
        assert!(game.is_in_check());
        assert!(game.is_checkmate());
        assert!(!game.is_stalemate());
    }

    #[test]
    fn cornered_king_without_moves_is_stalemate() {
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN");
        let moves = game.generate_legal_moves();
        assert!(moves.is_empty());
        assert!(!game.is_in_check());
        assert!(game.is_stalemate());
        assert!(!game.is_checkmate());
        assert_eq!(generate_legal_moves(&game).status, GameStatus::Stalemate);
    }

    #[test]
    fn pinned_bishop_gains_mobility_when_pinner_removed() {
        let pinned = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN");
        let free = GameState::from_fen("6k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN");
        let bishop_moves = |game: &GameState| {
            generate_legal_moves(game)
                .moves
                .iter()
                .filter(|mv| mv.from == sq("e2"))
                .count()
        };
        assert_eq!(bishop_moves(&pinned), 0);
        assert!(bishop_moves(&free) > 0);
    }
}
