use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::detect_pins_and_checks;
use crate::move_generation::move_generator::GameStatus;
use crate::moves::chess_move::Move;

/// Leaf statistics of a perft walk. Each promotion counts once, whatever
/// piece is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in game_state.legal_moves().moves {
        perft_recurse(game_state, &mv, depth, 1, &mut total);
    }
    total
}

/// Leaf node count below each root move, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    game_state
        .legal_moves()
        .moves
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(game_state, &mv, depth, 1, &mut counts);
            (mv, counts.nodes)
        })
        .collect()
}

/// Same totals as `perft`, with one scoped worker thread per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return perft(&mut game_state.clone(), 0);
    }

    let root_moves = game_state.legal_moves().moves;
    let mut total = PerftCounts::default();

    thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .iter()
            .map(|mv| {
                let mut local_state = game_state.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    perft_recurse(&mut local_state, mv, depth, 1, &mut local);
                    local
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(local) => total.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
    });

    total
}

fn perft_recurse(
    game_state: &mut GameState,
    mv: &Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) {
    if current_depth == search_depth {
        tally_leaf(game_state, mv, counts);
        return;
    }

    game_state.with_move(mv, |next| {
        for child in next.legal_moves().moves {
            perft_recurse(next, &child, search_depth, current_depth + 1, counts);
        }
    });
}

fn tally_leaf(game_state: &mut GameState, mv: &Move, counts: &mut PerftCounts) {
    counts.nodes += 1;

    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant {
        counts.en_passant += 1;
    }
    if mv.is_castle {
        counts.castles += 1;
    }
    if mv.is_pawn_promotion {
        counts.promotions += 1;
    }

    game_state.with_move(mv, |next| {
        let side = next.side_to_move;
        let in_check = detect_pins_and_checks(&next.board, side, next.king_location(side)).in_check();
        if in_check {
            counts.checks += 1;
            if next.legal_moves().status == GameStatus::Checkmate {
                counts.checkmates += 1;
            }
        }
    });
}
