use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_moves_pieces::push_targets;
use crate::moves::attack_tables::king_attacks;
use crate::moves::move_descriptions::FLAG_CASTLING;

struct CastlingPath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    must_be_empty: u64,
    must_be_safe: [Square; 2],
}

const LIGHT_CASTLES: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        must_be_empty: (1 << 5) | (1 << 6),
        must_be_safe: [5, 6],
    },
    CastlingPath {
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        must_be_safe: [3, 2],
    },
];

const DARK_CASTLES: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        must_be_empty: (1 << 61) | (1 << 62),
        must_be_safe: [61, 62],
    },
    CastlingPath {
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        must_be_safe: [59, 58],
    },
];

pub fn generate_king_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let king_bb = game_state.pieces[side.index()][PieceKind::King.index()];
    if king_bb == 0 {
        return;
    }

    let from = king_bb.trailing_zeros() as Square;
    let targets = king_attacks(from) & !game_state.occupancy_by_color[side.index()];
    push_targets(game_state, from, PieceKind::King, targets, out);

    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    let paths = match side {
        Color::Light => &LIGHT_CASTLES,
        Color::Dark => &DARK_CASTLES,
    };
    let rooks = game_state.pieces[side.index()][PieceKind::Rook.index()];

    for path in paths {
        let rook_home = if path.king_to > path.king_from {
            path.king_from + 3
        } else {
            path.king_from - 4
        };
        if king_from == path.king_from
            && game_state.castling_rights & path.right != 0
            && rooks & (1u64 << rook_home) != 0
            && game_state.occupancy_all & path.must_be_empty == 0
            && path
                .must_be_safe
                .iter()
                .all(|sq| !is_square_attacked(game_state, *sq, enemy))
        {
            out.push(build_move(
                path.king_from,
                path.king_to,
                PieceKind::King,
                None,
                None,
                FLAG_CASTLING,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::FLAG_CASTLING;

    fn castles(fen: &str) -> usize {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut moves = Vec::new();
        generate_king_moves(&game, &mut moves);
        moves.iter().filter(|mv| **mv & FLAG_CASTLING != 0).count()
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"), 2);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1"), 2);
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        // Dark rook on f8 covers f1.
        assert_eq!(castles("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1"), 1);
        // In check: no castling at all.
        assert_eq!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1"), 0);
    }
}
