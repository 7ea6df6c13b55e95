//! One-ply greedy opponent.
//!
//! Takes a mate in one when there is one. Otherwise plays the move that leaves
//! the best material balance for the mover, drawing uniformly among ties. It
//! never looks at the reply.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_negamax::{parse_check, parse_depth, parse_seed};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::SearchResult;
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::piece_values::PieceValueTable;
use crate::search::position::{AppliedMove, SearchPosition};

pub struct GreedyEngine {
    scorer: MaterialScorer,
    seed: Option<u64>,
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new(values: PieceValueTable, seed: Option<u64>) -> Self {
        Self {
            scorer: MaterialScorer::new(values),
            seed,
            rng: rng_for(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new(PieceValueTable::default(), None)
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "greedy"
    }

    fn new_game(&mut self) {
        self.rng = rng_for(self.seed);
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Seed") {
            self.seed = parse_seed(value)?;
            self.rng = rng_for(self.seed);
        } else if name.eq_ignore_ascii_case("Depth") {
            // Validated so a bad value is reported, then ignored at one ply.
            parse_depth(value)?;
        } else if ["UseHash", "ExtendedOrdering", "RandomTieBreak", "MateChargesKing"]
            .iter()
            .any(|option| name.eq_ignore_ascii_case(option))
        {
            parse_check(value)?;
        } else {
            return Err(format!("unknown option '{}'", name));
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> SearchResult<EngineOutput> {
        let mut position = game_state.clone();
        let mover = position.side_to_move();
        let legal_moves = position.legal_moves()?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string greedy_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string greedy_engine requested_depth {}", depth));
        }

        let mut best_value = i32::MIN;
        let mut best_moves = Vec::new();

        for &mv in &legal_moves {
            let mut child = AppliedMove::apply(&mut position, mv)?;
            if child.is_checkmate()? {
                out.info_lines
                    .push("info string greedy_engine mate_in_one".to_owned());
                out.best_move = Some(mv);
                return Ok(out);
            }

            let value = self.scorer.score(&mut *child, mover)?;
            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(mv);
            } else if value == best_value {
                best_moves.push(mv);
            }
        }

        out.best_move = best_moves.choose(&mut self.rng).copied();
        if out.best_move.is_some() {
            out.info_lines.push(format!(
                "info string greedy_engine material {} tied_moves {}",
                best_value,
                best_moves.len()
            ));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::GreedyEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;
    use crate::search::piece_values::PieceValueTable;
    use crate::utils::long_algebraic::move_description_to_long_algebraic;

    fn choose(engine: &mut GreedyEngine, fen: &str) -> Option<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let out = engine
            .choose_move(&game, &GoParams::default())
            .expect("greedy choice should succeed");
        assert_eq!(game.get_fen(), fen);
        out.best_move
            .map(|mv| move_description_to_long_algebraic(mv).expect("move should render"))
    }

    #[test]
    fn prefers_mate_over_material() {
        let mut engine = GreedyEngine::new(PieceValueTable::default(), Some(5));
        assert_eq!(
            choose(&mut engine, "6k1/5ppp/8/8/8/2N5/q7/1R4K1 w - - 0 1").as_deref(),
            Some("b1b8")
        );
    }

    #[test]
    fn grabs_the_most_valuable_piece() {
        // Knight can take the queen on d5 or the rook on b5.
        let mut engine = GreedyEngine::new(PieceValueTable::default(), Some(5));
        assert_eq!(
            choose(&mut engine, "4k3/8/8/1r1q4/8/2N5/8/4K3 w - - 0 1").as_deref(),
            Some("c3d5")
        );
    }

    #[test]
    fn takes_the_poisoned_pawn_it_cannot_see_past() {
        let mut engine = GreedyEngine::new(PieceValueTable::default(), Some(5));
        assert_eq!(
            choose(&mut engine, "6k1/5ppp/8/8/2p5/1N6/8/3R2K1 b - - 0 1").as_deref(),
            Some("c4b3")
        );
    }

    #[test]
    fn ties_are_drawn_from_every_quiet_move() {
        let fen = "7k/8/8/8/8/8/8/K7 w - - 0 1";
        let seen: HashSet<String> = (1..64)
            .filter_map(|seed| choose(&mut GreedyEngine::new(PieceValueTable::default(), Some(seed)), fen))
            .collect();
        let expected: HashSet<String> =
            ["a1a2", "a1b1", "a1b2"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn seeded_choices_repeat_after_new_game() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let mut engine = GreedyEngine::default();
        engine.set_option("Seed", "99").expect("seed should parse");
        let first = choose(&mut engine, fen);
        engine.new_game();
        assert_eq!(choose(&mut engine, fen), first);
    }

    #[test]
    fn search_options_are_validated_and_unknown_ones_rejected() {
        let mut engine = GreedyEngine::default();
        for (name, value) in [
            ("Depth", "3"),
            ("usehash", "false"),
            ("ExtendedOrdering", "on"),
            ("RandomTieBreak", "0"),
            ("MateChargesKing", "true"),
        ] {
            assert!(engine.set_option(name, value).is_ok(), "{name}");
        }

        assert!(engine.set_option("Depth", "12").is_err());
        assert!(engine.set_option("UseHash", "maybe").is_err());
        assert!(engine.set_option("Seed", "-1").is_err());
        assert!(engine.set_option("Threads", "4").is_err());
    }

    #[test]
    fn finished_game_has_no_best_move() {
        let mut engine = GreedyEngine::default();
        assert_eq!(choose(&mut engine, "k7/2Q5/1K6/8/8/8/8/8 b - - 0 1"), None);
    }
}
