//! Long algebraic move text (`e2e4`, `e7e8n`).
//!
//! Parsing resolves the text against a legal move list, so the result always
//! carries the correct capture, castling and en-passant flags.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = square_to_algebraic(mv.from);
    out.push_str(&square_to_algebraic(mv.to));
    if mv.is_pawn_promotion {
        out.push(mv.promotion().letter().to_ascii_lowercase());
    }
    out
}

/// Finds `text` in `legal_moves`. A promotion without a suffix promotes to a queen.
pub fn long_algebraic_to_move(text: &str, legal_moves: &[Move]) -> ChessResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidMove(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = text[4..].chars().next().map(char_to_promotion).transpose()?;

    let mv = legal_moves
        .iter()
        .find(|mv| mv.from == from && mv.to == to)
        .copied()
        .ok_or_else(|| ChessError::InvalidMove(text.to_owned()))?;

    match (promotion, mv.is_pawn_promotion) {
        (Some(kind), true) => mv.with_promotion(kind),
        (Some(_), false) => Err(ChessError::InvalidMove(format!(
            "{text}: only a pawn reaching the last rank may promote"
        ))),
        (None, _) => Ok(mv),
    }
}

/// Parses `text` against the current position's legal moves.
pub fn parse_long_algebraic(text: &str, game_state: &GameState) -> ChessResult<Move> {
    long_algebraic_to_move(text, &game_state.legal_moves().moves)
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(ChessError::InvalidPromotion(ch.to_string())),
    }
}
