//! Zobrist position keys.
//!
//! Keys come from a fixed-seed generator, so hashes are stable within a build
//! and tests can compare them across separately parsed positions.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x5EED_C0DE_2024_0001;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    piece_square
        .iter_mut()
        .flatten()
        .flatten()
        .for_each(|key| *key = rng.random());

    let side_to_move = rng.random();
    let castling = std::array::from_fn(|_| rng.random());
    let en_passant_file = std::array::from_fn(|_| rng.random());

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

fn xor_pieces(game_state: &GameState, kinds: &[PieceKind]) -> u64 {
    let mut key = 0u64;
    for color in Color::BOTH {
        for &piece in kinds {
            let mut bb = game_state.pieces[color.index()][piece.index()];
            while bb != 0 {
                key ^= piece_square_key(color, piece, bb.trailing_zeros() as Square);
                bb &= bb - 1;
            }
        }
    }
    key
}

/// Full position key: placement, side to move, castling rights and the
/// en-passant file.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let tables = tables();
    let mut key = xor_pieces(game_state, &PieceKind::ALL);

    if game_state.side_to_move == Color::Dark {
        key ^= tables.side_to_move;
    }
    key ^= tables.castling[usize::from(game_state.castling_rights & 0x0F)];
    if let Some(ep_square) = game_state.en_passant_square {
        key ^= tables.en_passant_file[usize::from(ep_square % 8)];
    }

    key
}

#[inline]
pub fn refresh_game_state_hashes(game_state: &mut GameState) {
    game_state.zobrist_key = compute_zobrist_key(game_state);
}
