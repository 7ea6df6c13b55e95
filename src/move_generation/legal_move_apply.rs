//! In-place make/unmake of packed moves.
//!
//! `make_move_in_place` pushes an `UndoState` and the new position key onto
//! the state's stacks; `unmake_move_in_place` pops both and restores the exact
//! prior position, hashes included.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{
    has_flag, move_from, move_promotion_piece, move_to, pack_move_description, FLAG_EN_PASSANT,
};
use crate::search::zobrist::refresh_game_state_hashes;

pub fn make_move_in_place(game_state: &mut GameState, move_description: u64) -> Result<(), String> {
    let from = move_from(move_description);
    let to = move_to(move_description);
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let moved_piece = game_state
        .piece_of_color_on(moving_color, from)
        .ok_or_else(|| format!("No {moving_color:?} piece on from-square {from}"))?;

    let is_en_passant = has_flag(move_description, FLAG_EN_PASSANT);
    let capture_square = if is_en_passant {
        en_passant_victim_square(moving_color, to)?
    } else {
        to
    };
    let captured_piece = game_state.piece_of_color_on(enemy_color, capture_square);
    if is_en_passant && captured_piece != Some(PieceKind::Pawn) {
        return Err(format!("En-passant capture on {to} finds no pawn to take"));
    }
    if captured_piece == Some(PieceKind::King) {
        return Err(format!("Move {from}->{to} would capture a king"));
    }

    game_state.undo_stack.push(UndoState {
        mv: move_description,
        moved_piece,
        captured_piece,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_zobrist_key: game_state.zobrist_key,
    });

    if let Some(captured) = captured_piece {
        game_state.pieces[enemy_color.index()][captured.index()] &= !(1u64 << capture_square);
    }

    game_state.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;
    let placed_piece = move_promotion_piece(move_description).unwrap_or(moved_piece);
    game_state.pieces[moving_color.index()][placed_piece.index()] |= to_mask;

    if moved_piece == PieceKind::King && from.abs_diff(to) == 2 {
        let (rook_from, rook_to) = castling_rook_squares(to)?;
        move_rook(game_state, moving_color, rook_from, rook_to);
    }

    update_castling_rights(game_state, from, to);

    game_state.en_passant_square = if moved_piece == PieceKind::Pawn && from.abs_diff(to) == 16 {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || captured_piece.is_some() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = enemy_color;

    game_state.recalc_occupancy();
    refresh_game_state_hashes(game_state);
    game_state.repetition_history.push(game_state.zobrist_key);

    Ok(())
}

pub fn unmake_move_in_place(game_state: &mut GameState) -> Result<(), String> {
    let undo = game_state
        .undo_stack
        .pop()
        .ok_or("unmake_move_in_place called with an empty undo stack")?;

    let from = move_from(undo.mv);
    let to = move_to(undo.mv);
    let moving_color = game_state.side_to_move.opposite();
    let enemy_color = game_state.side_to_move;

    let placed_piece = move_promotion_piece(undo.mv).unwrap_or(undo.moved_piece);
    game_state.pieces[moving_color.index()][placed_piece.index()] &= !(1u64 << to);
    game_state.pieces[moving_color.index()][undo.moved_piece.index()] |= 1u64 << from;

    if let Some(captured) = undo.captured_piece {
        let capture_square = if has_flag(undo.mv, FLAG_EN_PASSANT) {
            en_passant_victim_square(moving_color, to)?
        } else {
            to
        };
        game_state.pieces[enemy_color.index()][captured.index()] |= 1u64 << capture_square;
    }

    if undo.moved_piece == PieceKind::King && from.abs_diff(to) == 2 {
        let (rook_from, rook_to) = castling_rook_squares(to)?;
        move_rook(game_state, moving_color, rook_to, rook_from);
    }

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.zobrist_key = undo.prev_zobrist_key;

    if moving_color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_sub(1);
    }
    game_state.side_to_move = moving_color;

    game_state.recalc_occupancy();
    game_state.repetition_history.pop();

    Ok(())
}

#[inline]
pub fn build_move(
    from: Square,
    to: Square,
    moved_piece: PieceKind,
    captured_piece: Option<PieceKind>,
    promotion_piece: Option<PieceKind>,
    flags: u64,
) -> u64 {
    pack_move_description(from, to, moved_piece, captured_piece, promotion_piece, flags)
}

fn en_passant_victim_square(moving_color: Color, to: Square) -> Result<Square, String> {
    let square = match moving_color {
        Color::Light => to.checked_sub(8),
        Color::Dark => to.checked_add(8).filter(|sq| *sq < 64),
    };
    square.ok_or_else(|| format!("Invalid en-passant target square {to}"))
}

fn castling_rook_squares(king_to: Square) -> Result<(Square, Square), String> {
    match king_to {
        6 => Ok((7, 5)),
        2 => Ok((0, 3)),
        62 => Ok((63, 61)),
        58 => Ok((56, 59)),
        _ => Err(format!("King cannot castle to square {king_to}")),
    }
}

fn move_rook(game_state: &mut GameState, color: Color, from: Square, to: Square) {
    let rooks = &mut game_state.pieces[color.index()][PieceKind::Rook.index()];
    *rooks &= !(1u64 << from);
    *rooks |= 1u64 << to;
}

/// Any move touching a king or rook home square clears the matching rights.
fn update_castling_rights(game_state: &mut GameState, from: Square, to: Square) {
    for square in [from, to] {
        game_state.castling_rights &= match square {
            0 => !CASTLE_LIGHT_QUEENSIDE,
            4 => !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            7 => !CASTLE_LIGHT_KINGSIDE,
            56 => !CASTLE_DARK_QUEENSIDE,
            60 => !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
            63 => !CASTLE_DARK_KINGSIDE,
            _ => !0,
        };
    }
}
