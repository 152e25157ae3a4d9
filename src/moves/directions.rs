//! Step tables for ray casting and leaper moves.
//!
//! The ordering of [`ALL_DIRECTIONS`] is orthogonal first, then diagonal; the
//! pin/check detector relies only on `Direction::is_diagonal`, not on indices.

use crate::game_state::chess_types::{Direction, Square};

pub const ORTHOGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
];

pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, 0),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    Direction::new(1, 2),
    Direction::new(1, -2),
    Direction::new(-1, 2),
    Direction::new(-1, -2),
    Direction::new(2, -1),
    Direction::new(2, 1),
    Direction::new(-2, 1),
    Direction::new(-2, -1),
];

/// Squares along `direction` from `from` (exclusive) to the board edge.
pub fn ray(from: Square, direction: Direction) -> impl Iterator<Item = Square> {
    std::iter::successors(from.step(direction), move |square| square.step(direction))
}

/// Squares a knight on `from` reaches, on-board only.
pub fn knight_targets(from: Square) -> impl Iterator<Item = (Direction, Square)> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |offset| from.step(offset).map(|to| (offset, to)))
}
