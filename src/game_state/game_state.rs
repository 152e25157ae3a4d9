//! Authoritative game state.
//!
//! `GameState` is the central model for the engine. It owns the board, turn
//! and rights flags, clocks, the king-location cache, the undo stack used by
//! apply/undo workflows, and the status flags recorded by the last legal-move
//! query. Apply/undo live in `move_generation::legal_move_apply`; legal-move
//! queries live in `move_generation::legal_move_generator`.

use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    /// [white, black]; always equal to the kings' real squares.
    pub king_locations: [Square; 2],

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Apply/undo stack ---
    pub undo_stack: Vec<UndoState>,

    // --- Status recorded by the last legal-move query ---
    pub(crate) in_check: bool,
    pub(crate) checkmate: bool,
    pub(crate) stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial position, full castling rights, empty history.
    pub fn new_game() -> Self {
        let board = Board::starting_position();
        Self {
            board,
            side_to_move: Color::White,
            castling_rights: CASTLE_ALL,
            en_passant_square: None,
            king_locations: [Square::new(7, 4), Square::new(0, 4)],
            halfmove_clock: 0,
            fullmove_number: 1,
            undo_stack: Vec::new(),
            in_check: false,
            checkmate: false,
            stalemate: false,
        }
    }

    /// Builds a state around an arbitrary board. Both kings must be present.
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_square: Option<Square>,
        king_locations: [Square; 2],
    ) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_square,
            king_locations,
            halfmove_clock: 0,
            fullmove_number: 1,
            undo_stack: Vec::new(),
            in_check: false,
            checkmate: false,
            stalemate: false,
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn king_location(&self, color: Color) -> Square {
        self.king_locations[color.index()]
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Moves applied since the game (or FEN position) started, oldest first.
    pub fn move_history(&self) -> impl Iterator<Item = &crate::moves::chess_move::Move> {
        self.undo_stack.iter().map(|undo| &undo.mv)
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }
}
