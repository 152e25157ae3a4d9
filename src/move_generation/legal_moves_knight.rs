use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::chess_move::Move;
use crate::moves::directions::knight_targets;

/// A pinned knight always leaves its pin line, so it has no moves.
pub fn generate_knight_moves(ctx: &GenerationContext<'_>, from: Square, out: &mut Vec<Move>) {
    if ctx.is_pinned(from) {
        return;
    }

    for (_, to) in knight_targets(from) {
        if !ctx.is_ally(to) {
            ctx.push_move(from, to, out);
        }
    }
}
