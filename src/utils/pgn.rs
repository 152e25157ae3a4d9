//! PGN-style game record writer.
//!
//! Serializes a game's headers and move history. Movetext uses the engine's
//! short notation (`e4`, `Nf3`, `exd5`), numbered by full move.

use std::collections::BTreeMap;

use chrono::Local;

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;

/// Result string from the status recorded by the last legal-move query.
pub fn game_result(game_state: &GameState) -> &'static str {
    if game_state.is_checkmate() {
        match game_state.side_to_move {
            Color::White => "0-1",
            Color::Black => "1-0",
        }
    } else if game_state.is_stalemate() {
        "1/2-1/2"
    } else {
        "*"
    }
}

/// Record of everything played on `game_state`, from the position its
/// history started at.
pub fn write_pgn(game_state: &GameState, white: &str, black: &str) -> String {
    let mut initial_state = game_state.clone();
    while initial_state.undo_move().is_some() {}
    let moves: Vec<Move> = game_state.move_history().copied().collect();

    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Mailbox Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), game_result(game_state).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(&initial_state, &moves, &headers)
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    moves: &[Move],
    headers: &BTreeMap<String, String>,
) -> String {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut movetext_parts = Vec::<String>::with_capacity(moves.len() + 2);
    let mut fullmove = initial_state.fullmove_number;
    let mut side = initial_state.side_to_move;

    if side == Color::Black && !moves.is_empty() {
        movetext_parts.push(format!("{fullmove}..."));
    }
    for mv in moves {
        match side {
            Color::White => movetext_parts.push(format!("{fullmove}. {}", mv.chess_notation())),
            Color::Black => {
                movetext_parts.push(mv.chess_notation());
                fullmove = fullmove.saturating_add(1);
            }
        }
        side = side.opposite();
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
