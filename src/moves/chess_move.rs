//! The move value type.
//!
//! A `Move` carries everything apply/undo need: the pieces involved, the
//! special-move flags, the promotion choice, and the en-passant target that
//! was live before the move. Identity is the (start, end) square pair only.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub moved: Piece,
    pub captured: Option<Piece>,

    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_pawn_promotion: bool,
    promotion: PieceKind,

    /// En-passant target active before this move was applied.
    pub prior_en_passant: Option<Square>,
}

impl Move {
    /// Ordinary move or capture read off `board`. Promotion is inferred from
    /// a pawn reaching its last row.
    pub fn new(from: Square, to: Square, board: &Board, prior_en_passant: Option<Square>) -> Option<Self> {
        let moved = board.get(from)?;
        let is_pawn_promotion =
            moved.kind == PieceKind::Pawn && to.row == moved.color.promotion_row();
        Some(Self {
            from,
            to,
            moved,
            captured: board.get(to),
            is_en_passant: false,
            is_castle: false,
            is_pawn_promotion,
            promotion: PieceKind::Queen,
            prior_en_passant,
        })
    }

    /// En-passant capture; the captured pawn stands on `(from.row, to.col)`.
    pub fn en_passant(from: Square, to: Square, board: &Board, prior_en_passant: Option<Square>) -> Option<Self> {
        let mut mv = Self::new(from, to, board, prior_en_passant)?;
        mv.captured = board.get(mv.en_passant_capture_square());
        mv.is_en_passant = true;
        Some(mv)
    }

    /// King's two-square castling move; the rook moves when applied.
    pub fn castle(from: Square, to: Square, board: &Board, prior_en_passant: Option<Square>) -> Option<Self> {
        let mut mv = Self::new(from, to, board, prior_en_passant)?;
        mv.captured = None;
        mv.is_castle = true;
        Some(mv)
    }

    #[inline]
    pub fn promotion(&self) -> PieceKind {
        self.promotion
    }

    /// Replaces the promotion choice. Only meaningful before the move is applied.
    pub fn set_promotion(&mut self, kind: PieceKind) -> ChessResult<()> {
        if !kind.is_promotion_choice() {
            return Err(ChessError::InvalidPromotion(format!("{kind:?}")));
        }
        self.promotion = kind;
        Ok(())
    }

    pub fn with_promotion(mut self, kind: PieceKind) -> ChessResult<Self> {
        self.set_promotion(kind)?;
        Ok(self)
    }

    /// Square whose occupant is removed by the capture.
    #[inline]
    pub fn capture_square(&self) -> Square {
        if self.is_en_passant {
            self.en_passant_capture_square()
        } else {
            self.to
        }
    }

    #[inline]
    fn en_passant_capture_square(&self) -> Square {
        Square::new(self.from.row, self.to.col)
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_double_pawn_push(&self) -> bool {
        self.moved.kind == PieceKind::Pawn && self.from.row.abs_diff(self.to.row) == 2
    }

    /// Compact identifier: start row, start col, end row, end col as decimal digits.
    #[inline]
    pub fn move_id(&self) -> u16 {
        self.from.row as u16 * 1000
            + self.from.col as u16 * 100
            + self.to.row as u16 * 10
            + self.to.col as u16
    }

    /// Short notation: `e4`, `dxe5`, `Nf3`, `Bxc6`.
    pub fn chess_notation(&self) -> String {
        let destination = square_to_algebraic(self.to);
        match (self.moved.kind, self.is_capture()) {
            (PieceKind::Pawn, false) => destination,
            (PieceKind::Pawn, true) => {
                format!("{}x{destination}", char::from(b'a' + self.from.col))
            }
            (kind, false) => format!("{}{destination}", kind.letter()),
            (kind, true) => format!("{}x{destination}", kind.letter()),
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.chess_notation())
    }
}
