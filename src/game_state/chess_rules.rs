//! Canonical chess-rule constants.
//!
//! Starting layout and the fixed home columns that castling relies on.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_HOME_COL: u8 = 4;
pub const KINGSIDE_ROOK_HOME_COL: u8 = 7;
pub const QUEENSIDE_ROOK_HOME_COL: u8 = 0;

/// Column the rook lands on after castling on each wing.
pub const KINGSIDE_ROOK_CASTLED_COL: u8 = 5;
pub const QUEENSIDE_ROOK_CASTLED_COL: u8 = 3;
