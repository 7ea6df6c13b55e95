//! Head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other without UCI I/O,
//! from any starting position, until the game ends or a ply cap is reached.
//! Every move an engine returns is checked against the legal move list.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::SearchError;
use crate::game_state::chess_rules::{
    has_insufficient_material, is_checkmate, is_fifty_move_draw, is_stalemate,
    is_threefold_repetition,
};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::make_move_in_place;
use crate::move_generation::legal_move_generator::generate_legal_move_descriptions_in_place;
use crate::move_generation::move_generator::MoveGenerationError;
use crate::utils::long_algebraic::move_description_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    WhiteWinCheckmate,
    BlackWinCheckmate,
    DrawStalemate,
    DrawRepetition,
    DrawFiftyMoveRule,
    DrawInsufficientMaterial,
    DrawMaxPlies,
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{side:?} engine failed: {source}")]
    Engine {
        side: Color,
        #[source]
        source: SearchError,
    },

    #[error("{side:?} engine returned no move with {legal} legal moves available")]
    MissingMove { side: Color, legal: usize },

    #[error("{side:?} engine returned illegal move {lan}")]
    IllegalMove { side: Color, lan: String },

    #[error("board error: {0}")]
    Board(String),

    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub played_moves_lan: Vec<String>,
    pub white_move_count: u32,
    pub black_move_count: u32,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

impl MatchResult {
    pub fn report(&self) -> String {
        format!(
            "outcome={:?} plies={} white_moves={} black_moves={} final_fen={}",
            self.outcome,
            self.played_moves_lan.len(),
            self.white_move_count,
            self.black_move_count,
            self.final_state.get_fen()
        )
    }
}

/// Play one game from `start`, `white` moving for Light and `black` for Dark.
pub fn play_engine_match(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    start: GameState,
    config: MatchConfig,
) -> Result<MatchResult, MatchError> {
    white.new_game();
    black.new_game();

    let mut state = start;
    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_state: GameState::new_empty(),
        played_moves_lan: Vec::new(),
        white_move_count: 0,
        black_move_count: 0,
        white_total_time_ns: 0,
        black_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        if let Some(outcome) = game_over(&mut state)? {
            result.outcome = outcome;
            break;
        }

        let legal_moves = generate_legal_move_descriptions_in_place(&mut state)?;
        let mover = state.side_to_move;
        let engine: &mut dyn Engine = match mover {
            Color::Light => &mut *white,
            Color::Dark => &mut *black,
        };

        let started = Instant::now();
        let out = engine
            .choose_move(&state, &config.go_params)
            .map_err(|source| MatchError::Engine { side: mover, source })?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Color::Light => {
                result.white_move_count = result.white_move_count.saturating_add(1);
                result.white_total_time_ns = result.white_total_time_ns.saturating_add(elapsed_ns);
            }
            Color::Dark => {
                result.black_move_count = result.black_move_count.saturating_add(1);
                result.black_total_time_ns = result.black_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out.best_move.ok_or(MatchError::MissingMove {
            side: mover,
            legal: legal_moves.len(),
        })?;
        let lan = move_description_to_long_algebraic(chosen).map_err(MatchError::Board)?;
        if !legal_moves.contains(&chosen) {
            return Err(MatchError::IllegalMove { side: mover, lan });
        }

        debug!(side = ?mover, mv = %lan, "match move");
        result.played_moves_lan.push(lan);
        make_move_in_place(&mut state, chosen).map_err(MatchError::Board)?;
    }

    // A game ending on the final ply is still reported by its real outcome.
    if result.outcome == MatchOutcome::DrawMaxPlies {
        if let Some(outcome) = game_over(&mut state)? {
            result.outcome = outcome;
        }
    }

    result.final_state = state;
    info!(report = %result.report(), "match finished");
    Ok(result)
}

fn game_over(state: &mut GameState) -> Result<Option<MatchOutcome>, MatchError> {
    if is_checkmate(state)? {
        return Ok(Some(match state.side_to_move {
            Color::Light => MatchOutcome::BlackWinCheckmate,
            Color::Dark => MatchOutcome::WhiteWinCheckmate,
        }));
    }
    if is_stalemate(state)? {
        return Ok(Some(MatchOutcome::DrawStalemate));
    }
    if is_threefold_repetition(state) {
        return Ok(Some(MatchOutcome::DrawRepetition));
    }
    if is_fifty_move_draw(state) {
        return Ok(Some(MatchOutcome::DrawFiftyMoveRule));
    }
    if has_insufficient_material(state) {
        return Ok(Some(MatchOutcome::DrawInsufficientMaterial));
    }
    Ok(None)
}
