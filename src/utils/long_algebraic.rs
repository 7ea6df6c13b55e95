//! UCI long algebraic notation (`e2e4`, `e7e8q`) <-> packed move descriptions.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Render a move as `<from><to>[promotion]`.
pub fn move_description_to_long_algebraic(move_description: u64) -> Result<String, String> {
    let mut out = square_to_algebraic(move_from(move_description))?;
    out.push_str(&square_to_algebraic(move_to(move_description))?);

    if let Some(promotion_piece) = move_promotion_piece(move_description) {
        out.push(promotion_to_char(promotion_piece)?);
    }

    Ok(out)
}

/// Decode a long algebraic move against `game_state`, recovering the moved
/// and captured pieces and the special-move flags. Legality is not checked.
pub fn long_algebraic_to_move_description(
    long_algebraic: &str,
    game_state: &GameState,
) -> Result<u64, String> {
    let bytes = long_algebraic.as_bytes();
    if !long_algebraic.is_ascii() || (bytes.len() != 4 && bytes.len() != 5) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;

    let (moving_color, moved_piece) = game_state
        .piece_on(from)
        .ok_or_else(|| format!("No piece on from-square: {}", &long_algebraic[0..2]))?;

    if moving_color != game_state.side_to_move {
        return Err("Attempted to move a piece that is not on side to move".to_owned());
    }

    let mut captured_piece = game_state.piece_of_color_on(moving_color.opposite(), to);
    let mut flags = if captured_piece.is_some() { FLAG_CAPTURE } else { 0 };

    if moved_piece == PieceKind::Pawn && from.abs_diff(to) == 16 {
        flags |= FLAG_DOUBLE_PAWN_PUSH;
    }

    if moved_piece == PieceKind::King && from.abs_diff(to) == 2 {
        flags |= FLAG_CASTLING;
    }

    if moved_piece == PieceKind::Pawn
        && game_state.en_passant_square == Some(to)
        && from % 8 != to % 8
        && captured_piece.is_none()
    {
        captured_piece = Some(PieceKind::Pawn);
        flags |= FLAG_CAPTURE | FLAG_EN_PASSANT;
    }

    let on_back_rank = to / 8 == 0 || to / 8 == 7;
    let promotion_piece = match bytes.get(4) {
        Some(&ch) => {
            if moved_piece != PieceKind::Pawn || !on_back_rank {
                return Err(format!("Illegal promotion suffix in {long_algebraic}"));
            }
            Some(char_to_promotion(char::from(ch))?)
        }
        None if moved_piece == PieceKind::Pawn && on_back_rank => {
            return Err("Missing promotion piece in long algebraic move".to_owned());
        }
        None => None,
    };

    Ok(pack_move_description(
        from,
        to,
        moved_piece,
        captured_piece,
        promotion_piece,
        flags,
    ))
}

fn promotion_to_char(piece_kind: PieceKind) -> Result<char, String> {
    match piece_kind {
        PieceKind::Knight => Ok('n'),
        PieceKind::Bishop => Ok('b'),
        PieceKind::Rook => Ok('r'),
        PieceKind::Queen => Ok('q'),
        _ => Err(format!("Invalid promotion piece: {piece_kind:?}")),
    }
}

fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move_description, move_description_to_long_algebraic};
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{
        move_captured_piece, move_promotion_piece, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH,
        FLAG_EN_PASSANT,
    };

    #[test]
    fn double_push_is_flagged() {
        let game = GameState::new_game();
        let mv = long_algebraic_to_move_description("e2e4", &game).expect("move should parse");
        assert_ne!(mv & FLAG_DOUBLE_PAWN_PUSH, 0);
        assert_eq!(
            move_description_to_long_algebraic(mv).expect("move should render"),
            "e2e4"
        );
    }

    #[test]
    fn promotion_capture_keeps_both_pieces() {
        let game = GameState::from_fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move_description("a7b8n", &game).expect("move should parse");
        assert_eq!(move_captured_piece(mv), Some(PieceKind::Rook));
        assert_eq!(move_promotion_piece(mv), Some(PieceKind::Knight));
        assert_eq!(
            move_description_to_long_algebraic(mv).expect("move should render"),
            "a7b8n"
        );
        assert!(long_algebraic_to_move_description("a7a8", &game).is_err());
    }

    #[test]
    fn castling_and_en_passant_are_detected() {
        let castle =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move_description("e1g1", &castle).expect("castle should parse");
        assert_ne!(mv & FLAG_CASTLING, 0);

        let ep = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move_description("e5d6", &ep).expect("en passant should parse");
        assert_ne!(mv & FLAG_EN_PASSANT, 0);
        assert_eq!(move_captured_piece(mv), Some(PieceKind::Pawn));
    }

    #[test]
    fn wrong_side_and_garbage_are_rejected() {
        let game = GameState::new_game();
        assert!(long_algebraic_to_move_description("e7e5", &game).is_err());
        assert!(long_algebraic_to_move_description("e3e4", &game).is_err());
        assert!(long_algebraic_to_move_description("zz", &game).is_err());
    }
}
