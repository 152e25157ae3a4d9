use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::PinsAndChecks;
use crate::moves::chess_move::Move;
use crate::moves::directions::ray;

/// Read-only inputs shared by every per-piece generator for one query.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub board: &'a Board,
    pub side: Color,
    pub king_square: Square,
    pub en_passant_square: Option<Square>,
    pub pins_and_checks: &'a PinsAndChecks,
}

impl GenerationContext<'_> {
    /// A piece on `from` may step in `direction` unless a pin forbids leaving the pin line.
    #[inline]
    pub fn pin_allows(&self, from: Square, direction: Direction) -> bool {
        match self.pins_and_checks.pin_direction(from) {
            Some(pin) => direction.is_parallel_to(pin),
            None => true,
        }
    }

    #[inline]
    pub fn is_pinned(&self, from: Square) -> bool {
        self.pins_and_checks.pin_direction(from).is_some()
    }

    #[inline]
    pub fn is_enemy(&self, square: Square) -> bool {
        self.board.color_on(square) == Some(self.side.opposite())
    }

    #[inline]
    pub fn is_ally(&self, square: Square) -> bool {
        self.board.color_on(square) == Some(self.side)
    }

    #[inline]
    pub fn push_move(&self, from: Square, to: Square, out: &mut Vec<Move>) {
        if let Some(mv) = Move::new(from, to, self.board, self.en_passant_square) {
            out.push(mv);
        }
    }
}

/// Ray-cast a bishop, rook or queen from `from` along each of `directions`.
pub fn generate_sliding_moves(
    ctx: &GenerationContext<'_>,
    from: Square,
    directions: &[Direction],
    out: &mut Vec<Move>,
) {
    for &direction in directions {
        if !ctx.pin_allows(from, direction) {
            continue;
        }

        for to in ray(from, direction) {
            if ctx.is_ally(to) {
                break;
            }
            ctx.push_move(from, to, out);
            if ctx.is_enemy(to) {
                break;
            }
        }
    }
}
