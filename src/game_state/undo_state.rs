use crate::game_state::chess_types::*;

/// Single undo record for `make_move_in_place` / `unmake_move_in_place`.
///
/// Holds everything the forward move destroys: the captured piece and the
/// irreversible bookkeeping (rights, en-passant target, halfmove clock, keys).
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: u64,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,

    pub prev_zobrist_key: u64,
}
