//! Pseudo-legal knight, bishop, rook and queen moves.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::moves::attack_tables::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::moves::move_descriptions::FLAG_CAPTURE;

pub fn generate_knight_moves(game_state: &GameState, out: &mut Vec<u64>) {
    generate_piece_moves(game_state, PieceKind::Knight, out, |sq, _| knight_attacks(sq));
}

pub fn generate_bishop_moves(game_state: &GameState, out: &mut Vec<u64>) {
    generate_piece_moves(game_state, PieceKind::Bishop, out, bishop_attacks);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut Vec<u64>) {
    generate_piece_moves(game_state, PieceKind::Rook, out, rook_attacks);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut Vec<u64>) {
    generate_piece_moves(game_state, PieceKind::Queen, out, queen_attacks);
}

/// Emit a move to every attacked square not holding a friendly piece.
pub(crate) fn generate_piece_moves<F>(
    game_state: &GameState,
    piece: PieceKind,
    out: &mut Vec<u64>,
    attacks_from: F,
) where
    F: Fn(Square, u64) -> u64,
{
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];

    let mut movers = game_state.pieces[side.index()][piece.index()];
    while movers != 0 {
        let from = movers.trailing_zeros() as Square;
        push_targets(
            game_state,
            from,
            piece,
            attacks_from(from, game_state.occupancy_all) & !own_occ,
            out,
        );
        movers &= movers - 1;
    }
}

pub(crate) fn push_targets(
    game_state: &GameState,
    from: Square,
    piece: PieceKind,
    mut targets: u64,
    out: &mut Vec<u64>,
) {
    let enemy = game_state.side_to_move.opposite();
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let captured = game_state.piece_of_color_on(enemy, to);
        let flags = if captured.is_some() { FLAG_CAPTURE } else { 0 };
        out.push(build_move(from, to, piece, captured, None, flags));
        targets &= targets - 1;
    }
}
