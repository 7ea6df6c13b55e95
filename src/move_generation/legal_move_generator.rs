//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece by piece, then plays each one in place
//! and discards those that leave the mover's own king attacked.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::move_captured_piece;

pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<u64> {
    let mut pseudo = Vec::<u64>::with_capacity(128);

    generate_pawn_moves(game_state, &mut pseudo);
    generate_knight_moves(game_state, &mut pseudo);
    generate_bishop_moves(game_state, &mut pseudo);
    generate_rook_moves(game_state, &mut pseudo);
    generate_queen_moves(game_state, &mut pseudo);
    generate_king_moves(game_state, &mut pseudo);

    pseudo
}

/// Legal moves for the side to move. The state is mutated while filtering but
/// is restored before returning.
pub fn generate_legal_move_descriptions_in_place(
    game_state: &mut GameState,
) -> MoveGenResult<Vec<u64>> {
    let pseudo = generate_pseudo_legal_moves(game_state);
    let mut legal = Vec::with_capacity(pseudo.len());

    for mv in pseudo {
        if leaves_king_safe(game_state, mv)? {
            legal.push(mv);
        }
    }

    Ok(legal)
}

/// Early-exit variant used by the mate and stalemate predicates.
pub fn has_any_legal_move(game_state: &mut GameState) -> MoveGenResult<bool> {
    for mv in generate_pseudo_legal_moves(game_state) {
        if leaves_king_safe(game_state, mv)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Legal move count for `side`, whether or not it is `side`'s turn.
///
/// When `side` is not to move the turn is passed (en-passant target cleared),
/// counted, and restored. Pseudo-moves that would capture the enemy king are
/// skipped, so a side whose opponent is in check does not report them.
pub fn count_legal_moves_for(game_state: &mut GameState, side: Color) -> MoveGenResult<usize> {
    let saved_side = game_state.side_to_move;
    let saved_en_passant = game_state.en_passant_square;
    if side != saved_side {
        game_state.side_to_move = side;
        game_state.en_passant_square = None;
    }

    let result = generate_pseudo_legal_moves(game_state)
        .into_iter()
        .filter(|mv| move_captured_piece(*mv) != Some(PieceKind::King))
        .try_fold(0usize, |count, mv| {
            leaves_king_safe(game_state, mv).map(|safe| count + usize::from(safe))
        });

    game_state.side_to_move = saved_side;
    game_state.en_passant_square = saved_en_passant;
    result
}

fn leaves_king_safe(game_state: &mut GameState, mv: u64) -> MoveGenResult<bool> {
    let mover = game_state.side_to_move;
    make_move_in_place(game_state, mv).map_err(MoveGenerationError::MakeMoveFailed)?;
    let safe = !is_king_in_check(game_state, mover);
    unmake_move_in_place(game_state).map_err(MoveGenerationError::UnmakeMoveFailed)?;
    Ok(safe)
}
