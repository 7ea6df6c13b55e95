use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    (kings != 0).then(|| kings.trailing_zeros() as Square)
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Reverse lookup: a square is attacked by piece P if a P standing on the
/// square would attack one of the attacker's Ps.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attackers = &game_state.pieces[attacker_color.index()];

    if is_square_attacked_by_pawn(game_state, square, attacker_color)
        || knight_attacks(square) & attackers[PieceKind::Knight.index()] != 0
        || king_attacks(square) & attackers[PieceKind::King.index()] != 0
    {
        return true;
    }

    let queens = attackers[PieceKind::Queen.index()];
    let bishops_queens = attackers[PieceKind::Bishop.index()] | queens;
    if bishop_attacks(square, game_state.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = attackers[PieceKind::Rook.index()] | queens;
    rook_attacks(square, game_state.occupancy_all) & rooks_queens != 0
}

/// Whether any pawn of `pawn_color` attacks `square`.
#[inline]
pub fn is_square_attacked_by_pawn(game_state: &GameState, square: Square, pawn_color: Color) -> bool {
    let pawns = game_state.pieces[pawn_color.index()][PieceKind::Pawn.index()];
    pawn_attacks(pawn_color.opposite(), square) & pawns != 0
}
