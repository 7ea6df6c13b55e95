//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Fail-soft: a node returns the best score it actually saw, which may lie
//! outside the `(alpha, beta)` window it was given. Scores are always from the
//! perspective of the side the node is evaluated for, and the window
//! sentinels keep one unit clear of the `i32` extremes so negation never
//! overflows.

use crate::errors::SearchResult;
use crate::game_state::chess_types::Color;
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::MoveOrderer;
use crate::search::position::{AppliedMove, SearchPosition};
use crate::search::transposition_table::TranspositionTable;

/// Lowest score a node can report; `-SCORE_MIN == SCORE_MAX`.
pub const SCORE_MIN: i32 = i32::MIN + 1;
pub const SCORE_MAX: i32 = i32::MAX - 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Moves expanded inside the tree.
    pub nodes: u64,
    /// Table probes that found an entry, usable or not.
    pub transpositions_found: u64,
}

pub struct NegamaxSearch<'a, S: BoardScorer> {
    scorer: &'a S,
    orderer: &'a MoveOrderer,
    table: Option<&'a mut TranspositionTable>,
    king_value: i32,
    stats: SearchStats,
}

impl<'a, S: BoardScorer> NegamaxSearch<'a, S> {
    /// `king_value` is charged against a checkmated side on top of the static
    /// score, so mates found inside the tree outrank any material outcome.
    pub fn new(
        scorer: &'a S,
        orderer: &'a MoveOrderer,
        king_value: i32,
        table: Option<&'a mut TranspositionTable>,
    ) -> Self {
        Self {
            scorer,
            orderer,
            table,
            king_value,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn negamax<P: SearchPosition>(
        &mut self,
        position: &mut P,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        perspective: Color,
    ) -> SearchResult<i32> {
        let key = position.position_hash();

        if let Some(table) = self.table.as_deref_mut() {
            if let Some(entry) = table.probe(key) {
                self.stats.transpositions_found += 1;
                if entry.depth >= depth {
                    return Ok(entry.score);
                }
            }
        }

        let mated = position.is_checkmate()?;
        if depth == 0 || mated || position.is_draw()? {
            return self.leaf_score(position, perspective, mated);
        }

        let mut moves = position.legal_moves()?;
        self.orderer.order(position, &mut moves);

        let mut best = SCORE_MIN;
        for mv in moves {
            self.stats.nodes += 1;
            let score = {
                let mut child = AppliedMove::apply(position, mv)?;
                -self.negamax(&mut *child, depth - 1, -beta, -alpha, perspective.opposite())?
            };

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if let Some(table) = self.table.as_deref_mut() {
            table.store(key, depth, best);
        }

        Ok(best)
    }

    fn leaf_score<P: SearchPosition>(
        &self,
        position: &mut P,
        perspective: Color,
        mated: bool,
    ) -> SearchResult<i32> {
        let mut score = self.scorer.score(position, perspective)?;
        if mated {
            score = if position.side_to_move() == perspective {
                score.saturating_sub(self.king_value)
            } else {
                score.saturating_add(self.king_value)
            };
        }
        Ok(score.clamp(SCORE_MIN, SCORE_MAX))
    }
}
