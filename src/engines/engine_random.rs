//! Random-move engine.
//!
//! Selects uniformly from legal moves; used for diagnostics, testing, and as
//! the fallback path of the minimax engine.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engines::engine_trait::{parse_option, Engine, EngineOutput, GoParams};
use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

/// Uniform choice from `moves`; `None` when empty.
pub fn random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Mailbox Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if name.eq_ignore_ascii_case("Seed") {
            self.rng = StdRng::seed_from_u64(parse_option(name, value)?);
        }
        Ok(())
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let legal_moves = game_state.legal_moves().moves;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        out.best_move = random_move(&legal_moves, &mut self.rng);
        debug!(
            legal_moves = legal_moves.len(),
            best = ?out.best_move.map(|mv| mv.chess_notation()),
            "random engine choice"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_move_is_none_only_for_empty_list() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_move(&[], &mut rng), None);

        let moves = GameState::new_game().legal_moves().moves;
        let picked = random_move(&moves, &mut rng).expect("non-empty list");
        assert!(moves.contains(&picked));
    }

    #[test]
    fn seeded_engines_agree() {
        let game = GameState::new_game();
        let mut a = RandomEngine::with_seed(42);
        let mut b = RandomEngine::default();
        b.set_option("Seed", "42").expect("numeric seed");

        for _ in 0..5 {
            let left = a.choose_move(&game, &GoParams::default()).expect("move");
            let right = b.choose_move(&game, &GoParams::default()).expect("move");
            assert_eq!(left.best_move, right.best_move);
        }
    }

    #[test]
    fn no_move_in_checkmate() {
        let game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        let out = RandomEngine::with_seed(1)
            .choose_move(&game, &GoParams::default())
            .expect("engine runs");
        assert_eq!(out.best_move, None);
    }

    #[test]
    fn malformed_seed_is_rejected() {
        let mut engine = RandomEngine::with_seed(1);
        assert!(engine.set_option("Seed", "abc").is_err());
        assert!(engine.set_option("Hash", "16").is_ok());
    }
}
