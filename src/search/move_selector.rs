//! Per-turn move selection.
//!
//! Plays every root move in priority order. A move that checkmates on the
//! spot is returned at once; otherwise each move is scored by a negamax call
//! for the opponent one ply shallower. Moves sharing the best score are
//! collected and one is drawn at random.

use std::cmp::Ordering;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::errors::{SearchError, SearchResult};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::{MoveOrderer, OrderingPolicy};
use crate::search::negamax::{NegamaxSearch, SearchStats, SCORE_MAX, SCORE_MIN};
use crate::search::piece_values::PieceValueTable;
use crate::search::position::{AppliedMove, SearchPosition};
use crate::search::time_budget::TimeBudget;
use crate::search::transposition_table::TranspositionTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched from the root, counting the root move itself.
    pub max_depth: u8,
    pub use_transposition_table: bool,
    pub ordering: OrderingPolicy,
    /// Draw uniformly among equally scored root moves instead of taking the
    /// first in priority order.
    pub random_tie_break: bool,
    /// Fixed RNG seed for tie breaks. Every call with the same seed draws
    /// the same member of a tie; `None` seeds once from entropy.
    pub seed: Option<u64>,
    /// Charge the king value against a side checkmated inside the tree. When
    /// off, a mated leaf gets its plain static score.
    pub charge_mate_to_king: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            use_transposition_table: true,
            ordering: OrderingPolicy::Extended,
            random_tie_break: true,
            seed: None,
            charge_mate_to_king: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMove<M> {
    pub best_move: M,
    /// Root score for the mover; `SCORE_MAX` for an immediate mate.
    pub score: i32,
    pub is_mate_in_one: bool,
    /// Root moves that shared the best score.
    pub tied_moves: usize,
    pub stats: SearchStats,
    pub table_size: usize,
}

pub struct MoveSelector<S: BoardScorer> {
    config: SearchConfig,
    values: PieceValueTable,
    scorer: S,
    orderer: MoveOrderer,
    table: TranspositionTable,
    rng: StdRng,
}

impl<S: BoardScorer> MoveSelector<S> {
    pub fn new(config: SearchConfig, values: PieceValueTable, scorer: S) -> Self {
        Self {
            config,
            values,
            scorer,
            orderer: MoveOrderer::new(values, config.ordering),
            table: TranspositionTable::new(),
            rng: seeded_rng(config.seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Apply a new configuration. The entropy RNG is reseeded; the table
    /// survives unless caching is switched off.
    pub fn reconfigure(&mut self, config: SearchConfig) {
        self.config = config;
        self.orderer = MoveOrderer::new(self.values, config.ordering);
        self.rng = seeded_rng(config.seed);
        if !config.use_transposition_table {
            self.table.clear();
        }
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// Forget cached scores from a previous game.
    pub fn new_game(&mut self) {
        self.table.clear();
        self.rng = seeded_rng(self.config.seed);
    }

    /// Pick a move for the side to move. The position is restored before
    /// returning, on success and on error alike.
    pub fn select_move<P: SearchPosition>(
        &mut self,
        position: &mut P,
        budget: TimeBudget,
    ) -> SearchResult<SelectedMove<P::Move>> {
        self.select_move_to_depth(position, self.config.max_depth, budget)
    }

    /// As [`select_move`](Self::select_move) with a one-off depth in place of
    /// the configured one.
    pub fn select_move_to_depth<P: SearchPosition>(
        &mut self,
        position: &mut P,
        max_depth: u8,
        budget: TimeBudget,
    ) -> SearchResult<SelectedMove<P::Move>> {
        let started = Instant::now();

        let mut moves = position.legal_moves()?;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        self.orderer.order(position, &mut moves);

        let root_side = position.side_to_move();
        let child_depth = max_depth.max(1) - 1;

        let mut search = NegamaxSearch::new(
            &self.scorer,
            &self.orderer,
            if self.config.charge_mate_to_king {
                self.values.king()
            } else {
                0
            },
            self.config
                .use_transposition_table
                .then_some(&mut self.table),
        );

        let mut mate = None;
        let mut best_score = i32::MIN;
        let mut tied: Vec<P::Move> = Vec::new();

        for &mv in &moves {
            let mut child = AppliedMove::apply(position, mv)?;
            if child.is_checkmate()? {
                mate = Some(mv);
                break;
            }

            let score = -search.negamax(
                &mut *child,
                child_depth,
                SCORE_MIN,
                SCORE_MAX,
                root_side.opposite(),
            )?;
            drop(child);
            debug!(mv = ?mv, score, "root move scored");

            match score.cmp(&best_score) {
                Ordering::Greater => {
                    best_score = score;
                    tied.clear();
                    tied.push(mv);
                }
                Ordering::Equal => tied.push(mv),
                Ordering::Less => {}
            }
        }

        let stats = search.stats();
        let selected = match mate {
            Some(mv) => {
                debug!(mv = ?mv, "mate in one");
                SelectedMove {
                    best_move: mv,
                    score: SCORE_MAX,
                    is_mate_in_one: true,
                    tied_moves: 1,
                    stats,
                    table_size: self.table.len(),
                }
            }
            None => {
                let best_move = if self.config.random_tie_break && tied.len() > 1 {
                    match self.config.seed {
                        Some(seed) => tied.choose(&mut StdRng::seed_from_u64(seed)).copied(),
                        None => tied.choose(&mut self.rng).copied(),
                    }
                } else {
                    tied.first().copied()
                }
                .unwrap_or(moves[0]);

                SelectedMove {
                    best_move,
                    score: best_score,
                    is_mate_in_one: false,
                    tied_moves: tied.len(),
                    stats,
                    table_size: self.table.len(),
                }
            }
        };

        info!(
            best = ?selected.best_move,
            score = selected.score,
            mate_in_one = selected.is_mate_in_one,
            depth = max_depth,
            nodes = stats.nodes,
            transpositions = stats.transpositions_found,
            tied = selected.tied_moves,
            table_size = selected.table_size,
            budget_ms = ?budget.allotted_ms(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "move selected"
        );

        Ok(selected)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
