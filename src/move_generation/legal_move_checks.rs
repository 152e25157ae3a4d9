//! Pin and check detection around a king square.
//!
//! `detect_pins_and_checks` is a pure function of the board: it can be asked
//! about the king's real square or a hypothetical one (king-move legality),
//! and never touches `GameState`. Own kings are transparent to the scan so a
//! king stepping along a checking ray still sees the slider behind it.

use std::collections::BTreeMap;

use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::directions::{knight_targets, ray, ALL_DIRECTIONS};

/// An enemy piece attacking the king.
///
/// For knight checks `direction` holds the knight offset from the king and has
/// no blocking meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    pub direction: Direction,
    pub is_knight: bool,
}

impl Check {
    /// Squares a non-king move may land on to resolve this check: the squares
    /// strictly between king and attacker, then the attacker's own square.
    pub fn resolving_squares(&self, king: Square) -> Vec<Square> {
        if self.is_knight {
            return vec![self.square];
        }

        let mut squares = Vec::with_capacity(7);
        for square in ray(king, self.direction) {
            squares.push(square);
            if square == self.square {
                break;
            }
        }
        squares
    }
}

/// Pinned allies map to the direction from the king toward them; they may
/// only move along that line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinsAndChecks {
    pub pins: BTreeMap<Square, Direction>,
    pub checks: Vec<Check>,
}

impl PinsAndChecks {
    #[inline]
    pub fn in_check(&self) -> bool {
        !self.checks.is_empty()
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }

    #[inline]
    pub fn pin_direction(&self, square: Square) -> Option<Direction> {
        self.pins.get(&square).copied()
    }
}

/// Whether `attacker`, standing `distance` steps from a target along
/// `direction` (target toward attacker), attacks that target.
#[inline]
fn attacks_along(attacker: Piece, direction: Direction, distance: usize) -> bool {
    match attacker.kind {
        PieceKind::Rook => !direction.is_diagonal(),
        PieceKind::Bishop => direction.is_diagonal(),
        PieceKind::Queen => true,
        PieceKind::Pawn => {
            distance == 1 && direction.is_diagonal() && direction.d_row == -attacker.color.forward()
        }
        PieceKind::King => distance == 1,
        PieceKind::Knight => false,
    }
}

/// Pins against and checks on a `color` king standing on `king_square`.
pub fn detect_pins_and_checks(board: &Board, color: Color, king_square: Square) -> PinsAndChecks {
    let mut result = PinsAndChecks::default();

    for direction in ALL_DIRECTIONS {
        let mut candidate_pin: Option<Square> = None;

        for (distance, square) in (1..).zip(ray(king_square, direction)) {
            let Some(piece) = board.get(square) else {
                continue;
            };

            if piece.color == color {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if candidate_pin.is_some() {
                    break;
                }
                candidate_pin = Some(square);
                continue;
            }

            if attacks_along(piece, direction, distance) {
                match candidate_pin {
                    None => result.checks.push(Check {
                        square,
                        direction,
                        is_knight: false,
                    }),
                    Some(pinned) => {
                        result.pins.insert(pinned, direction);
                    }
                }
            }
            break;
        }
    }

    let enemy_knight = Piece::new(color.opposite(), PieceKind::Knight);
    for (offset, square) in knight_targets(king_square) {
        if board.get(square) == Some(enemy_knight) {
            result.checks.push(Check {
                square,
                direction: offset,
                is_knight: true,
            });
        }
    }

    result
}

/// Raw attack reach: can any `attacker` piece capture on `square`?
///
/// Pins are ignored and pawns attack diagonally whether or not the square is
/// occupied. Every piece, kings included, blocks rays.
pub fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    for direction in ALL_DIRECTIONS {
        for (distance, target) in (1..).zip(ray(square, direction)) {
            let Some(piece) = board.get(target) else {
                continue;
            };
            if piece.color == attacker && attacks_along(piece, direction, distance) {
                return true;
            }
            break;
        }
    }

    let enemy_knight = Piece::new(attacker, PieceKind::Knight);
    knight_targets(square).any(|(_, target)| board.get(target) == Some(enemy_knight))
}

/// Plays `mv` on a scratch copy of `board` and reports whether the mover's king
/// on `king_square` would then be attacked. Used for en-passant captures,
/// which remove two pieces from one rank at once.
pub fn move_exposes_king(board: &Board, mv: &Move, king_square: Square) -> bool {
    let mut scratch = *board;
    scratch.set(mv.capture_square(), None);
    scratch.set(mv.from, None);
    scratch.set(mv.to, Some(mv.moved));
    is_square_attacked(&scratch, king_square, mv.moved.color.opposite())
}
