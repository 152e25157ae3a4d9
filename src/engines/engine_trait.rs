//! Engine abstraction layer used by the play session.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub const DEFAULT_SEARCH_DEPTH: u8 = 2;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the engine's configured depth for one call.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Unknown option names are ignored; malformed values are rejected.
    fn set_option(&mut self, _name: &str, _value: &str) -> ChessResult<()> {
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput>;
}

pub(crate) fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> ChessResult<T> {
    value.trim().parse::<T>().map_err(|_| ChessError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}
