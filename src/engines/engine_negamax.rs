//! Fixed-depth negamax engine behind the `Engine` trait.

use std::time::Instant;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{SearchError, SearchResult};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::OrderingPolicy;
use crate::search::move_selector::{MoveSelector, SearchConfig};
use crate::search::piece_values::PieceValueTable;

pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 8;

pub struct NegamaxEngine<S: BoardScorer> {
    selector: MoveSelector<S>,
    name: &'static str,
}

impl<S: BoardScorer> NegamaxEngine<S> {
    pub fn new(config: SearchConfig, values: PieceValueTable, scorer: S, name: &'static str) -> Self {
        Self {
            selector: MoveSelector::new(config, values, scorer),
            name,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.selector.config()
    }

    pub fn selector(&self) -> &MoveSelector<S> {
        &self.selector
    }
}

impl<S: BoardScorer + Send> Engine for NegamaxEngine<S> {
    fn name(&self) -> &str {
        self.name
    }

    fn new_game(&mut self) {
        self.selector.new_game();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        let mut config = *self.selector.config();

        if name.eq_ignore_ascii_case("Depth") {
            config.max_depth = parse_depth(value)?;
        } else if name.eq_ignore_ascii_case("UseHash") {
            config.use_transposition_table = parse_check(value)?;
        } else if name.eq_ignore_ascii_case("ExtendedOrdering") {
            config.ordering = if parse_check(value)? {
                OrderingPolicy::Extended
            } else {
                OrderingPolicy::CapturesOnly
            };
        } else if name.eq_ignore_ascii_case("RandomTieBreak") {
            config.random_tie_break = parse_check(value)?;
        } else if name.eq_ignore_ascii_case("MateChargesKing") {
            config.charge_mate_to_king = parse_check(value)?;
        } else if name.eq_ignore_ascii_case("Seed") {
            config.seed = parse_seed(value)?;
        } else {
            return Err(format!("unknown option '{}'", name));
        }

        self.selector.reconfigure(config);
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> SearchResult<EngineOutput> {
        let started = Instant::now();
        let mut position = game_state.clone();
        let depth = params
            .depth
            .map_or(self.selector.config().max_depth, |d| d.clamp(MIN_DEPTH, MAX_DEPTH));
        let budget = params.time_budget(game_state.side_to_move);

        let mut out = EngineOutput::default();
        let selected = match self.selector.select_move_to_depth(&mut position, depth, budget) {
            Ok(selected) => selected,
            Err(SearchError::NoLegalMoves) => {
                out.info_lines
                    .push("info string negamax_engine no legal moves".to_owned());
                return Ok(out);
            }
            Err(err) => return Err(err),
        };

        let elapsed_ms = started.elapsed().as_millis();
        let score = if selected.is_mate_in_one {
            "mate 1".to_owned()
        } else {
            format!("cp {}", selected.score)
        };
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} time {}",
            depth, score, selected.stats.nodes, elapsed_ms
        ));
        out.info_lines.push(format!(
            "info string negamax_engine transpositions {} tied_moves {} table_size {}",
            selected.stats.transpositions_found, selected.tied_moves, selected.table_size
        ));
        if let Some(budget_ms) = budget.allotted_ms() {
            out.info_lines
                .push(format!("info string negamax_engine budget_ms {}", budget_ms));
        }

        out.best_move = Some(selected.best_move);
        Ok(out)
    }
}

pub(crate) fn parse_depth(value: &str) -> Result<u8, String> {
    let depth = value
        .parse::<u8>()
        .map_err(|_| format!("invalid Depth value '{}'", value))?;
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(format!(
            "Depth must be between {} and {}, got {}",
            MIN_DEPTH, MAX_DEPTH, depth
        ));
    }
    Ok(depth)
}

/// Zero means "seed from entropy".
pub(crate) fn parse_seed(value: &str) -> Result<Option<u64>, String> {
    let seed = value
        .parse::<u64>()
        .map_err(|_| format!("invalid Seed value '{}'", value))?;
    Ok((seed != 0).then_some(seed))
}

pub(crate) fn parse_check(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid check value '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::NegamaxEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;
    use crate::search::board_scoring::MaterialScorer;
    use crate::search::move_ordering::OrderingPolicy;
    use crate::search::move_selector::SearchConfig;
    use crate::search::piece_values::PieceValueTable;
    use crate::utils::long_algebraic::move_description_to_long_algebraic;

    fn engine() -> NegamaxEngine<MaterialScorer> {
        NegamaxEngine::new(
            SearchConfig {
                seed: Some(11),
                ..SearchConfig::default()
            },
            PieceValueTable::default(),
            MaterialScorer::default(),
            "negamax",
        )
    }

    #[test]
    fn options_reconfigure_the_selector() {
        let mut e = engine();
        e.set_option("Depth", "2").expect("depth should parse");
        e.set_option("UseHash", "false").expect("flag should parse");
        e.set_option("extendedordering", "off").expect("flag should parse");
        e.set_option("Seed", "0").expect("seed should parse");
        e.set_option("MateChargesKing", "false").expect("flag should parse");

        assert_eq!(
            *e.config(),
            SearchConfig {
                max_depth: 2,
                use_transposition_table: false,
                ordering: OrderingPolicy::CapturesOnly,
                random_tie_break: true,
                seed: None,
                charge_mate_to_king: false,
            }
        );
    }

    #[test]
    fn bad_options_are_rejected() {
        let mut e = engine();
        assert!(e.set_option("Depth", "0").is_err());
        assert!(e.set_option("Depth", "9").is_err());
        assert!(e.set_option("Depth", "deep").is_err());
        assert!(e.set_option("UseHash", "maybe").is_err());
        assert!(e.set_option("Threads", "4").is_err());
        assert_eq!(e.config().max_depth, 4);
    }

    #[test]
    fn reports_mate_in_one() {
        let mut e = engine();
        let game =
            GameState::from_fen("6k1/5ppp/8/8/8/2N5/q7/1R4K1 w - - 0 1").expect("FEN should parse");
        let out = e
            .choose_move(&game, &GoParams::default())
            .expect("search should succeed");
        let best = out.best_move.expect("a move should be chosen");
        assert_eq!(
            move_description_to_long_algebraic(best).expect("move should render"),
            "b1b8"
        );
        assert!(out.info_lines[0].contains("score mate 1"));
    }

    #[test]
    fn go_depth_overrides_configured_depth() {
        let mut e = engine();
        let game = GameState::from_fen("6k1/5ppp/8/8/2p5/1N6/8/3R2K1 b - - 0 1")
            .expect("FEN should parse");
        let shallow = GoParams {
            depth: Some(1),
            ..GoParams::default()
        };
        let out = e.choose_move(&game, &shallow).expect("search should succeed");
        let best = out.best_move.expect("a move should be chosen");
        assert_eq!(
            move_description_to_long_algebraic(best).expect("move should render"),
            "c4b3"
        );
        assert!(out.info_lines[0].starts_with("info depth 1 "));
        assert_eq!(e.config().max_depth, 4);
    }

    #[test]
    fn finished_game_has_no_best_move() {
        let mut e = engine();
        let game = GameState::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let out = e
            .choose_move(&game, &GoParams::default())
            .expect("finished game is not an error");
        assert_eq!(out.best_move, None);
    }

    #[test]
    fn clock_budget_is_reported() {
        let mut e = engine();
        let params = GoParams {
            depth: Some(1),
            wtime_ms: Some(60_000),
            ..GoParams::default()
        };
        let out = e
            .choose_move(&GameState::new_game(), &params)
            .expect("search should succeed");
        assert!(out
            .info_lines
            .iter()
            .any(|line| line == "info string negamax_engine budget_ms 3000"));
    }
}
