//! Fixed-depth minimax over a pluggable scorer.
//!
//! Every node asks for its own legal moves, so mate and stalemate are scored
//! at the horizon too. Each child is visited through `GameState::with_move`,
//! which undoes the move before the next sibling is tried.

use tracing::{debug, trace};

use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{terminal_score, BoardScorer, MaterialScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

/// Best of `candidates` for the side to move by material minimax.
/// `None` only when `candidates` is empty.
pub fn select_move(game_state: &mut GameState, candidates: &[Move], depth: u8) -> Option<Move> {
    let mut stats = SearchStats::default();
    search_root(game_state, candidates, depth, &MaterialScorer, &mut stats).best_move
}

/// Root search over an explicit candidate list. Ties keep the earliest candidate.
pub fn search_root<S: BoardScorer>(
    game_state: &mut GameState,
    candidates: &[Move],
    depth: u8,
    scorer: &S,
    stats: &mut SearchStats,
) -> SearchOutcome {
    let depth = depth.max(1);
    let maximizing = game_state.side_to_move == Color::White;
    stats.nodes += 1;

    let mut best: Option<(i32, Move)> = None;
    for mv in candidates {
        let score = game_state.with_move(mv, |next| minimax(next, depth - 1, scorer, stats));
        trace!(mv = %mv, score, "root candidate");
        if is_improvement(best.map(|(s, _)| s), score, maximizing) {
            best = Some((score, *mv));
        }
    }

    let outcome = match best {
        Some((score, mv)) => SearchOutcome {
            score,
            best_move: Some(mv),
        },
        None => SearchOutcome {
            score: scorer.score(game_state),
            best_move: None,
        },
    };

    debug!(
        depth,
        nodes = stats.nodes,
        score = outcome.score,
        best = ?outcome.best_move.map(|mv| mv.chess_notation()),
        "minimax search complete"
    );
    outcome
}

fn minimax<S: BoardScorer>(
    game_state: &mut GameState,
    depth: u8,
    scorer: &S,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    let legal = game_state.legal_moves();
    if legal.moves.is_empty() {
        return terminal_score(game_state.side_to_move, legal.in_check);
    }
    if depth == 0 {
        return scorer.score(game_state);
    }

    let maximizing = game_state.side_to_move == Color::White;
    let mut best: Option<i32> = None;
    for mv in &legal.moves {
        let score = game_state.with_move(mv, |next| minimax(next, depth - 1, scorer, stats));
        if is_improvement(best, score, maximizing) {
            best = Some(score);
        }
    }

    best.unwrap_or_else(|| scorer.score(game_state))
}

#[inline]
fn is_improvement(best: Option<i32>, score: i32, maximizing: bool) -> bool {
    match best {
        None => true,
        Some(best) if maximizing => score > best,
        Some(best) => score < best,
    }
}
