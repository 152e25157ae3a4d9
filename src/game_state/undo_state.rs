use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Single undo record for `apply_move` / `undo_move`.
///
/// The move itself carries the moved and captured pieces; the remaining fields
/// are the pieces of game state that applying it overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_king_location: Square,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
