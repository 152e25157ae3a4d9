use crate::game_state::chess_rules::{KINGSIDE_ROOK_HOME_COL, KING_HOME_COL, QUEENSIDE_ROOK_HOME_COL};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{detect_pins_and_checks, is_square_attacked};
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::chess_move::Move;
use crate::moves::directions::ALL_DIRECTIONS;

/// Adjacent king steps. Each destination is checked by running the pin/check
/// detector from that square; the game state is never relocated.
pub fn generate_king_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    for direction in ALL_DIRECTIONS {
        let Some(to) = from.step(direction) else {
            continue;
        };
        if ctx.is_ally(to) {
            continue;
        }

        if !detect_pins_and_checks(ctx.board, ctx.side, to).in_check() {
            ctx.push_move(from, to, out);
        }
    }
}

/// Kingside and queenside castling for the side to move.
///
/// Callers must only invoke this when the king is not in check; the king's own
/// square is not re-tested here.
pub fn generate_castling_moves(
    ctx: &GenerationContext<'_>,
    castling_rights: CastlingRights,
    out: &mut Vec<Move>,
) {
    let side = ctx.side;
    let king_home = Square::new(side.home_row(), KING_HOME_COL);
    if ctx.king_square != king_home
        || ctx.board.get(king_home) != Some(Piece::new(side, PieceKind::King))
    {
        return;
    }

    if castling_rights & kingside_right(side) != 0 {
        try_castle(ctx, king_home, KINGSIDE_ROOK_HOME_COL, &[5, 6], &[5, 6], out);
    }
    if castling_rights & queenside_right(side) != 0 {
        try_castle(ctx, king_home, QUEENSIDE_ROOK_HOME_COL, &[1, 2, 3], &[3, 2], out);
    }
}

fn try_castle(
    ctx: &GenerationContext<'_>,
    king_home: Square,
    rook_col: u8,
    empty_cols: &[u8],
    crossed_cols: &[u8],
    out: &mut Vec<Move>,
) {
    let row = king_home.row;
    let enemy = ctx.side.opposite();

    if ctx.board.get(Square::new(row, rook_col)) != Some(Piece::new(ctx.side, PieceKind::Rook)) {
        return;
    }
    if empty_cols
        .iter()
        .any(|&col| !ctx.board.is_empty(Square::new(row, col)))
    {
        return;
    }
    if crossed_cols
        .iter()
        .any(|&col| is_square_attacked(ctx.board, Square::new(row, col), enemy))
    {
        return;
    }

    let to_col = if rook_col > king_home.col {
        king_home.col + 2
    } else {
        king_home.col - 2
    };
    if let Some(mv) = Move::castle(king_home, Square::new(row, to_col), ctx.board, ctx.en_passant_square) {
        out.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::Move;
    use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

    fn king_moves(fen: &str) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let king = game.king_location(game.side_to_move);
        game.legal_moves()
            .moves
            .into_iter()
            .filter(|mv| mv.from == king)
            .collect()
    }

    fn targets(moves: &[Move]) -> Vec<String> {
        let mut names: Vec<String> = moves.iter().map(|mv| square_to_algebraic(mv.to)).collect();
        names.sort();
        names
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        let moves = king_moves("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(targets(&moves), vec!["d1", "d2", "f1", "f2"]);
    }

    #[test]
    fn king_cannot_step_next_to_enemy_king() {
        let moves = king_moves("8/8/8/8/8/4k3/8/4K3 w - - 0 1");
        assert_eq!(targets(&moves), vec!["d1", "f1"]);
    }

    #[test]
    fn king_may_capture_undefended_piece_only() {
        let undefended = king_moves("6k1/8/8/8/8/8/4r3/4K3 w - - 0 1");
        assert!(targets(&undefended).contains(&"e2".to_owned()));

        let defended = king_moves("6k1/8/8/8/4r3/8/4r3/4K3 w - - 0 1");
        assert!(!targets(&defended).contains(&"e2".to_owned()));
    }

    #[test]
    fn castles_both_wings_when_clear() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castles: Vec<&Move> = moves.iter().filter(|mv| mv.is_castle).collect();
        assert_eq!(castles.len(), 2);
        let g1 = algebraic_to_square("g1").expect("square");
        let c1 = algebraic_to_square("c1").expect("square");
        assert!(castles.iter().any(|mv| mv.to == g1));
        assert!(castles.iter().any(|mv| mv.to == c1));
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // f1 is covered by the rook on f8
        let moves = king_moves("5r2/6k1/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castles: Vec<String> = targets(&moves.into_iter().filter(|mv| mv.is_castle).collect::<Vec<_>>());
        assert_eq!(castles, vec!["c1"]);
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_occupied() {
        let attacked_b1 = king_moves("1r5k/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(attacked_b1.iter().filter(|mv| mv.is_castle).count(), 1);

        let occupied_b1 = king_moves("7k/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        assert_eq!(occupied_b1.iter().filter(|mv| mv.is_castle).count(), 0);
    }

    #[test]
    fn no_castling_out_of_check() {
        let moves = king_moves("4r3/6k1/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(moves.iter().all(|mv| !mv.is_castle));
    }

    #[test]
    fn no_castling_without_rights() {
        let moves = king_moves("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
        assert!(moves.iter().all(|mv| !mv.is_castle));
    }
}
