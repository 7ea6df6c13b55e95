//! Engine abstraction layer used by the UCI front end and the match harness.
//!
//! Defines common input parameters and output payloads so the negamax selector
//! and the greedy opponent can be swapped at runtime behind one trait.

use crate::errors::SearchResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::search::time_budget::TimeBudget;

/// Arguments of a UCI `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
}

impl GoParams {
    pub fn remaining_ms(&self, side: Color) -> Option<u64> {
        match side {
            Color::Light => self.wtime_ms,
            Color::Dark => self.btime_ms,
        }
    }

    /// Budget for `side`: `movetime` if given, else a slice of its clock.
    pub fn time_budget(&self, side: Color) -> TimeBudget {
        TimeBudget::from_clock(self.movetime_ms, self.remaining_ms(side))
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<u64>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "challenge_bot"
    }

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Pick a move for the side to move in `game_state`. A finished game
    /// yields an output without a best move.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> SearchResult<EngineOutput>;
}
