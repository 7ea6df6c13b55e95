//! Move-path enumeration for validating the generator and make/unmake.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_generator::generate_legal_move_descriptions_in_place;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::{
    has_flag, is_capture, move_promotion_piece, FLAG_CASTLING, FLAG_EN_PASSANT,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

/// Count leaf move paths of exactly `depth` plies, tallying the kind of the
/// final move on each path.
pub fn perft(game_state: &mut GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(game_state, depth, &mut counts)?;
    Ok(counts)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> MoveGenResult<()> {
    let moves = generate_legal_move_descriptions_in_place(game_state)?;

    if depth == 1 {
        for mv in moves {
            counts.nodes += 1;
            counts.captures += u64::from(is_capture(mv));
            counts.en_passant += u64::from(has_flag(mv, FLAG_EN_PASSANT));
            counts.castles += u64::from(has_flag(mv, FLAG_CASTLING));
            counts.promotions += u64::from(move_promotion_piece(mv).is_some());
        }
        return Ok(());
    }

    for mv in moves {
        make_move_in_place(game_state, mv).map_err(MoveGenerationError::MakeMoveFailed)?;
        let result = perft_recurse(game_state, depth - 1, counts);
        unmake_move_in_place(game_state).map_err(MoveGenerationError::UnmakeMoveFailed)?;
        result?;
    }

    Ok(())
}
