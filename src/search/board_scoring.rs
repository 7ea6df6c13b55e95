//! Static position evaluation.
//!
//! Scorers are plugged into search by type parameter so the inner loop stays
//! monomorphic. Every scorer is antisymmetric: swapping the perspective
//! negates the score.

use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::move_generator::MoveGenResult;
use crate::search::piece_values::PieceValueTable;
use crate::search::position::SearchPosition;

/// Weight applied to the legal-move-count difference by `MobilityScorer`.
pub const MOBILITY_WEIGHT: i32 = 3;

pub trait BoardScorer {
    /// Score `position` for `perspective`; positive favours that side.
    ///
    /// Takes the position mutably so scorers may probe moves, but must leave
    /// it as found.
    fn score<P: SearchPosition>(&self, position: &mut P, perspective: Color) -> MoveGenResult<i32>;
}

/// Sum of piece values, first player minus second player.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer {
    values: PieceValueTable,
}

impl MaterialScorer {
    pub fn new(values: PieceValueTable) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &PieceValueTable {
        &self.values
    }

    /// Light material minus Dark material.
    pub fn material_balance<P: SearchPosition>(&self, position: &P) -> i32 {
        (0..64u8)
            .filter_map(|square: Square| position.piece_on(square))
            .map(|(color, piece)| {
                let value = self.values.value(piece);
                if color.is_first_player() {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score<P: SearchPosition>(&self, position: &mut P, perspective: Color) -> MoveGenResult<i32> {
        Ok(orient(self.material_balance(position), perspective))
    }
}

/// Material plus `MOBILITY_WEIGHT` per extra legal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityScorer {
    material: MaterialScorer,
}

impl MobilityScorer {
    pub fn new(values: PieceValueTable) -> Self {
        Self {
            material: MaterialScorer::new(values),
        }
    }
}

impl BoardScorer for MobilityScorer {
    fn score<P: SearchPosition>(&self, position: &mut P, perspective: Color) -> MoveGenResult<i32> {
        let light_moves = position.legal_move_count_for(Color::Light)?;
        let dark_moves = position.legal_move_count_for(Color::Dark)?;
        // Move counts are bounded by a few hundred, so the cast cannot wrap.
        let mobility = light_moves as i32 - dark_moves as i32;
        let balance = self.material.material_balance(position) + MOBILITY_WEIGHT * mobility;
        Ok(orient(balance, perspective))
    }
}

#[inline]
fn orient(light_minus_dark: i32, perspective: Color) -> i32 {
    if perspective.is_first_player() {
        light_minus_dark
    } else {
        -light_minus_dark
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardScorer, MaterialScorer, MobilityScorer, MOBILITY_WEIGHT};
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;

    const POSITIONS: [&str; 4] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/8/8/8/8/3QK3 b - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];

    #[test]
    fn material_counts_piece_values() {
        let scorer = MaterialScorer::default();
        let mut game = GameState::from_fen(POSITIONS[2]).expect("FEN should parse");
        assert_eq!(scorer.score(&mut game, Color::Light).expect("score should run"), 900);
        assert_eq!(scorer.score(&mut game, Color::Dark).expect("score should run"), -900);

        let mut start = GameState::new_game();
        assert_eq!(scorer.score(&mut start, Color::Light).expect("score should run"), 0);
    }

    #[test]
    fn scorers_are_antisymmetric() {
        let material = MaterialScorer::default();
        let mobility = MobilityScorer::default();
        for fen in POSITIONS {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let light = material.score(&mut game, Color::Light).expect("score should run");
            let dark = material.score(&mut game, Color::Dark).expect("score should run");
            assert_eq!(light, -dark, "material asymmetry on {fen}");

            let light = mobility.score(&mut game, Color::Light).expect("score should run");
            let dark = mobility.score(&mut game, Color::Dark).expect("score should run");
            assert_eq!(light, -dark, "mobility asymmetry on {fen}");
            assert_eq!(game.get_fen(), fen);
        }
    }

    #[test]
    fn mobility_rewards_the_freer_side() {
        // Equal material; Dark's rook is boxed in by its own king and pawns.
        let mut game =
            GameState::from_fen("6kr/6pp/8/8/8/8/6PP/R5K1 w - - 0 1").expect("FEN should parse");
        let material = MaterialScorer::default()
            .score(&mut game, Color::Light)
            .expect("score should run");
        let mobility = MobilityScorer::default()
            .score(&mut game, Color::Light)
            .expect("score should run");
        assert_eq!(material, 0);
        assert!(mobility > 0);
        assert_eq!(mobility % MOBILITY_WEIGHT, 0);
    }
}
