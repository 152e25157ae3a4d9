//! In-place apply/undo on `GameState`.
//!
//! `apply_move` pushes an `UndoState` and mutates the position; `undo_move`
//! pops it and restores the position exactly, including castling rights,
//! en-passant target, clocks, and the king-location cache.

use crate::game_state::chess_rules::{
    KINGSIDE_ROOK_CASTLED_COL, KINGSIDE_ROOK_HOME_COL, KING_HOME_COL, QUEENSIDE_ROOK_CASTLED_COL,
    QUEENSIDE_ROOK_HOME_COL,
};
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::moves::chess_move::Move;

impl GameState {
    /// Applies a move taken from this position's legal list.
    pub fn apply_move(&mut self, mv: &Move) {
        let mover = self.side_to_move;

        self.undo_stack.push(UndoState {
            mv: *mv,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_king_location: self.king_locations[mover.index()],
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
        });

        let moved = self.board.take(mv.from).unwrap_or(mv.moved);
        let captured = if mv.is_en_passant {
            self.board.take(mv.capture_square())
        } else {
            self.board.get(mv.to)
        };

        let placed = if mv.is_pawn_promotion {
            Piece::new(mover, mv.promotion())
        } else {
            moved
        };
        self.board.set(mv.to, Some(placed));

        if mv.is_castle {
            if let Some((rook_from, rook_to)) = castle_rook_squares(mv) {
                let rook = self.board.take(rook_from);
                self.board.set(rook_to, rook);
            }
        }

        if moved.kind == PieceKind::King {
            self.king_locations[mover.index()] = mv.to;
        }

        self.castling_rights &= !rights_lost(moved, mv.from, mv.to);

        self.en_passant_square = if mv.is_double_pawn_push() {
            Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col))
        } else {
            None
        };

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = mover.opposite();
        self.clear_status();
    }

    /// Reverts the most recent applied move. Returns `None` on an empty history.
    pub fn undo_move(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        let mv = undo.mv;
        let mover = mv.moved.color;

        self.board.set(mv.to, None);
        self.board.set(mv.from, Some(mv.moved));
        if mv.captured.is_some() {
            self.board.set(mv.capture_square(), mv.captured);
        }

        if mv.is_castle {
            if let Some((rook_from, rook_to)) = castle_rook_squares(&mv) {
                let rook = self.board.take(rook_to);
                self.board.set(rook_from, rook);
            }
        }

        self.king_locations[mover.index()] = undo.prev_king_location;
        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.side_to_move = mover;
        self.clear_status();

        Some(mv)
    }

    /// Applies `mv`, runs `f` on the resulting position, then undoes the move.
    pub fn with_move<R>(&mut self, mv: &Move, f: impl FnOnce(&mut GameState) -> R) -> R {
        self.apply_move(mv);
        let result = f(self);
        self.undo_move();

        debug_assert_eq!(
            Some(self.king_location(Color::White)),
            self.board.find_king(Color::White)
        );
        debug_assert_eq!(
            Some(self.king_location(Color::Black)),
            self.board.find_king(Color::Black)
        );
        result
    }

    #[inline]
    fn clear_status(&mut self) {
        self.in_check = false;
        self.checkmate = false;
        self.stalemate = false;
    }
}

/// Rook start and end squares for a castling king move.
fn castle_rook_squares(mv: &Move) -> Option<(Square, Square)> {
    let row = mv.from.row;
    if mv.from.col != KING_HOME_COL {
        return None;
    }
    if mv.to.col > mv.from.col {
        Some((
            Square::new(row, KINGSIDE_ROOK_HOME_COL),
            Square::new(row, KINGSIDE_ROOK_CASTLED_COL),
        ))
    } else {
        Some((
            Square::new(row, QUEENSIDE_ROOK_HOME_COL),
            Square::new(row, QUEENSIDE_ROOK_CASTLED_COL),
        ))
    }
}

/// Rights removed by a move: any king move clears both wings, a rook leaving
/// or being captured on its home square clears that wing.
fn rights_lost(moved: Piece, from: Square, to: Square) -> CastlingRights {
    let mut lost = 0;
    if moved.kind == PieceKind::King {
        lost |= kingside_right(moved.color) | queenside_right(moved.color);
    }
    if moved.kind == PieceKind::Rook {
        lost |= rook_home_right(from);
    }
    lost | rook_home_right(to)
}

fn rook_home_right(square: Square) -> CastlingRights {
    let color = match square.row {
        row if row == Color::White.home_row() => Color::White,
        row if row == Color::Black.home_row() => Color::Black,
        _ => return 0,
    };
    match square.col {
        KINGSIDE_ROOK_HOME_COL => kingside_right(color),
        QUEENSIDE_ROOK_HOME_COL => queenside_right(color),
        _ => 0,
    }
}
