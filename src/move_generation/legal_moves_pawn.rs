use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::move_exposes_king;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    let side = ctx.side;
    let forward = side.forward();

    // advances
    let advance = Direction::new(forward, 0);
    if let Some(one_step) = from.step(advance) {
        if ctx.board.is_empty(one_step) && ctx.pin_allows(from, advance) {
            ctx.push_move(from, one_step, out);

            if from.row == side.pawn_start_row() {
                if let Some(two_step) = one_step.step(advance) {
                    if ctx.board.is_empty(two_step) {
                        ctx.push_move(from, two_step, out);
                    }
                }
            }
        }
    }

    // captures and en-passant
    for d_col in [-1i8, 1i8] {
        let capture = Direction::new(forward, d_col);
        let Some(to) = from.step(capture) else {
            continue;
        };
        if !ctx.pin_allows(from, capture) {
            continue;
        }

        if ctx.is_enemy(to) {
            ctx.push_move(from, to, out);
        } else if ctx.en_passant_square == Some(to) {
            let Some(mv) = Move::en_passant(from, to, ctx.board, ctx.en_passant_square) else {
                continue;
            };
            if !move_exposes_king(ctx.board, &mv, ctx.king_square) {
                out.push(mv);
            }
        }
    }
}
