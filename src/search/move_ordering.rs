//! Move ordering heuristics.
//!
//! Good moves first means earlier alpha-beta cutoffs. Captures are ranked
//! most-valuable-victim / least-valuable-attacker; the extended policy also
//! rewards promotions and penalises moving onto a square an enemy pawn covers.

use std::cmp::Reverse;

use crate::search::piece_values::PieceValueTable;
use crate::search::position::{SearchMove, SearchPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// MVV-LVA on captures, everything else scores 0.
    CapturesOnly,
    /// MVV-LVA plus promotion gain and the pawn-attack penalty.
    #[default]
    Extended,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOrderer {
    values: PieceValueTable,
    policy: OrderingPolicy,
}

impl MoveOrderer {
    pub fn new(values: PieceValueTable, policy: OrderingPolicy) -> Self {
        Self { values, policy }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Heuristic priority of `mv` in `position` (before the move is played).
    pub fn move_score<P: SearchPosition>(&self, position: &P, mv: P::Move) -> i32 {
        let mover_color = position.side_to_move();
        let mover = position
            .piece_on(mv.from_square())
            .map(|(_, piece)| piece);
        let mover_value = self.values.value_of(mover);

        let mut score = match position.piece_on(mv.to_square()) {
            Some((color, victim)) if color != mover_color => {
                self.values.value(victim).saturating_mul(10) - mover_value
            }
            _ => 0,
        };

        if self.policy == OrderingPolicy::Extended {
            if let Some(promoted) = mv.promotion() {
                score += self.values.value(promoted) - mover_value;
            }
            if position.is_attacked_by_pawn(mv.to_square(), mover_color.opposite()) {
                score -= mover_value;
            }
        }

        score
    }

    /// Sort `moves` by descending priority. Order among equal scores is
    /// unspecified.
    pub fn order<P: SearchPosition>(&self, position: &P, moves: &mut [P::Move]) {
        moves.sort_by_cached_key(|mv| Reverse(self.move_score(position, *mv)));
    }
}
