//! Fixed-depth material minimax engine.
//!
//! Shuffles the legal list with its own RNG so equal-scoring moves vary
//! between games, then searches on a private clone of the position.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::engines::engine_random::random_move;
use crate::engines::engine_trait::{
    parse_option, Engine, EngineOutput, GoParams, DEFAULT_SEARCH_DEPTH,
};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::MaterialScorer;
use crate::search::minimax::{search_root, SearchStats};

pub struct MinimaxEngine {
    depth: u8,
    rng: StdRng,
}

impl MinimaxEngine {
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(depth: u8, seed: u64) -> Self {
        Self {
            depth: depth.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Mailbox Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth: u8 = parse_option(name, value)?;
            if depth == 0 {
                return Err(ChessError::InvalidOption {
                    name: name.to_owned(),
                    value: value.to_owned(),
                });
            }
            self.depth = depth;
        } else if name.eq_ignore_ascii_case("Seed") {
            self.rng = StdRng::seed_from_u64(parse_option(name, value)?);
        }
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let depth = params.depth.unwrap_or(self.depth).max(1);
        let mut search_state = game_state.clone();
        let mut candidates = search_state.legal_moves().moves;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string minimax_engine legal_moves {}",
            candidates.len()
        ));
        if candidates.is_empty() {
            return Ok(out);
        }

        candidates.shuffle(&mut self.rng);

        let mut stats = SearchStats::default();
        let outcome = search_root(&mut search_state, &candidates, depth, &MaterialScorer, &mut stats);
        out.info_lines.push(format!(
            "info depth {depth} score cp {} nodes {}",
            outcome.score, stats.nodes
        ));

        out.best_move = match outcome.best_move {
            Some(mv) => Some(mv),
            None => {
                warn!(depth, "minimax returned no move; falling back to random choice");
                random_move(&candidates, &mut self.rng)
            }
        };

        debug!(
            depth,
            nodes = stats.nodes,
            score = outcome.score,
            best = ?out.best_move.map(|mv| mv.chess_notation()),
            "minimax engine choice"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn plays_mate_in_one() {
        let game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("FEN");
        let out = MinimaxEngine::with_seed(2, 9)
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        let mv = out.best_move.expect("a move");
        assert_eq!(mv.to, algebraic_to_square("a8").expect("square"));
        assert!(out.info_lines.iter().any(|line| line.starts_with("info depth 2")));
    }

    #[test]
    fn returns_none_without_legal_moves() {
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN");
        let out = MinimaxEngine::with_seed(2, 1)
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        assert_eq!(out.best_move, None);
    }

    #[test]
    fn leaves_caller_state_untouched() {
        let game = GameState::new_game();
        let mut engine = MinimaxEngine::with_seed(2, 3);
        let out = engine.choose_move(&game, &GoParams { depth: Some(1) }).expect("engine runs");
        assert!(out.best_move.is_some());
        assert_eq!(game, GameState::new_game());
    }

    #[test]
    fn same_seed_same_choice() {
        let game = GameState::new_game();
        let first = MinimaxEngine::with_seed(1, 77)
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        let second = MinimaxEngine::with_seed(1, 77)
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        assert_eq!(first.best_move, second.best_move);
    }

    #[test]
    fn depth_option_is_validated() {
        let mut engine = MinimaxEngine::default();
        assert_eq!(engine.depth(), DEFAULT_SEARCH_DEPTH);
        engine.set_option("Depth", "3").expect("valid depth");
        assert_eq!(engine.depth(), 3);
        assert!(engine.set_option("Depth", "0").is_err());
        assert!(engine.set_option("Depth", "deep").is_err());
        assert_eq!(engine.depth(), 3);
    }
}
