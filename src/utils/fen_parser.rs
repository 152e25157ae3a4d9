//! FEN-to-GameState parser.
//!
//! Accepts the full six-field form or the four-field form without clocks
//! (clocks then default to 0 and 1). Exactly one king per side is required;
//! their squares seed the king-location cache. The side that just moved may
//! not be in check, and an en-passant square must sit behind a pawn that
//! could have just made a double push.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let (board_part, side_part, castling_part, en_passant_part, clocks) = match fields.as_slice() {
        [board, side, castling, en_passant] => (*board, *side, *castling, *en_passant, None),
        [board, side, castling, en_passant, halfmove, fullmove] => {
            (*board, *side, *castling, *en_passant, Some((*halfmove, *fullmove)))
        }
        _ => return Err(invalid(format!("expected 4 or 6 fields, found {}", fields.len()))),
    };

    let board = parse_board(board_part)?;
    let king_locations = [
        single_king(&board, Color::White)?,
        single_king(&board, Color::Black)?,
    ];
    let side_to_move = parse_side_to_move(side_part)?;

    let waiting = side_to_move.opposite();
    if is_square_attacked(&board, king_locations[waiting.index()], side_to_move) {
        return Err(invalid(format!("{waiting:?} king is in check with {side_to_move:?} to move")));
    }

    let en_passant_square = parse_en_passant_square(en_passant_part)?;
    if let Some(square) = en_passant_square {
        validate_en_passant_square(&board, side_to_move, square, en_passant_part)?;
    }

    let mut game_state = GameState::from_parts(
        board,
        side_to_move,
        parse_castling_rights(castling_part)?,
        en_passant_square,
        king_locations,
    );

    if let Some((halfmove_part, fullmove_part)) = clocks {
        game_state.halfmove_clock = halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(format!("halfmove clock '{halfmove_part}'")))?;
        game_state.fullmove_number = fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(format!("fullmove number '{fullmove_part}'")))?;
    }

    Ok(game_state)
}

fn invalid(detail: String) -> ChessError {
    ChessError::InvalidFen(detail)
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks".to_owned()));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("piece character '{ch}'")))?;
            if col >= 8 {
                return Err(invalid(format!("rank '{rank_str}' has too many files")));
            }

            board.set(Square::new(row as u8, col as u8), Some(piece));
            col += 1;
        }

        if col != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(board)
}

fn single_king(board: &Board, color: Color) -> ChessResult<Square> {
    let mut kings = board
        .pieces_of(color)
        .filter(|(_, piece)| piece.kind == PieceKind::King)
        .map(|(square, _)| square);

    match (kings.next(), kings.next()) {
        (Some(square), None) => Ok(square),
        (None, _) => Err(invalid(format!("no {color:?} king"))),
        (Some(_), Some(_)) => Err(invalid(format!("more than one {color:?} king"))),
    }
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side-to-move field '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(format!("en-passant square '{en_passant_part}'")))
}

/// The square must be empty on the row a double push skips over, with the
/// pushed enemy pawn in front of it and its start square vacated.
fn validate_en_passant_square(
    board: &Board,
    side_to_move: Color,
    square: Square,
    text: &str,
) -> ChessResult<()> {
    let pusher = side_to_move.opposite();
    let skipped_row = (pusher.pawn_start_row() as i8 + pusher.forward()) as u8;
    let reject = || invalid(format!("en-passant square '{text}' with {side_to_move:?} to move"));

    if square.row != skipped_row || board.get(square).is_some() {
        return Err(reject());
    }
    let pushed = square.offset(pusher.forward(), 0).ok_or_else(reject)?;
    let start = square.offset(-pusher.forward(), 0).ok_or_else(reject)?;
    if board.get(pushed) != Some(Piece::new(pusher, PieceKind::Pawn)) || board.get(start).is_some() {
        return Err(reject());
    }
    Ok(())
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
