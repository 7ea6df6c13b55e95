//! Attack bitboards for every piece kind.
//!
//! Leapers (knight, king, pawn captures) use tables built at compile time;
//! sliders trace rays against the current occupancy.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const LIGHT_PAWN_CAPTURE_DELTAS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_CAPTURE_DELTAS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_DELTAS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_DELTAS);
pub const LIGHT_PAWN_ATTACKS: [u64; 64] = leaper_table(&LIGHT_PAWN_CAPTURE_DELTAS);
pub const DARK_PAWN_ATTACKS: [u64; 64] = leaper_table(&DARK_PAWN_CAPTURE_DELTAS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

/// Walk from `square` in one direction, stopping on (and including) the
/// first occupied square.
fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = i32::from(square % 8) + file_step;
    let mut rank = i32::from(square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn leaper_table(deltas: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    const A1: Square = 0;
    const C1: Square = 2;
    const E2: Square = 12;
    const D4: Square = 27;
    const E7: Square = 52;

    #[test]
    fn leaper_counts() {
        assert_eq!(knight_attacks(D4).count_ones(), 8);
        assert_eq!(knight_attacks(A1).count_ones(), 2);
        assert_eq!(king_attacks(A1).count_ones(), 3);
        assert_eq!(king_attacks(D4).count_ones(), 8);
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        assert_eq!(pawn_attacks(Color::Light, E2), (1u64 << 19) | (1u64 << 21));
        assert_eq!(pawn_attacks(Color::Dark, E7), (1u64 << 43) | (1u64 << 45));
        assert_eq!(pawn_attacks(Color::Light, 8), 1u64 << 17);
        assert_eq!(pawn_attacks(Color::Light, 60), 0);
    }

    #[test]
    fn slider_rays_on_empty_board() {
        assert_eq!(bishop_attacks(D4, 0).count_ones(), 13);
        assert_eq!(rook_attacks(D4, 0).count_ones(), 14);
        assert_eq!(queen_attacks(D4, 0).count_ones(), 27);
    }

    #[test]
    fn blockers_stop_rays() {
        let blocker_on_e3 = 1u64 << 20;
        let bishop = bishop_attacks(C1, blocker_on_e3);
        assert_ne!(bishop & (1u64 << 20), 0);
        assert_eq!(bishop & (1u64 << 29), 0);

        let blocker_on_a4 = 1u64 << 24;
        let rook = rook_attacks(A1, blocker_on_a4);
        assert_ne!(rook & (1u64 << 24), 0);
        assert_eq!(rook & (1u64 << 32), 0);
    }
}
