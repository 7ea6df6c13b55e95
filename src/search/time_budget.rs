//! Per-move thinking-time budget.
//!
//! The fixed-depth search does not stop on time; the budget is computed so it
//! can be reported next to what the search actually spent.

use std::time::Duration;

/// Fraction of the remaining clock allotted to one move.
pub const CLOCK_FRACTION: u64 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBudget {
    allotted: Option<Duration>,
}

impl TimeBudget {
    pub const fn unlimited() -> Self {
        Self { allotted: None }
    }

    pub const fn fixed(duration: Duration) -> Self {
        Self {
            allotted: Some(duration),
        }
    }

    /// Exact move time if given, else 1/20th of the mover's remaining clock.
    pub fn from_clock(movetime_ms: Option<u64>, remaining_ms: Option<u64>) -> Self {
        let allotted_ms = movetime_ms.or_else(|| remaining_ms.map(|ms| (ms / CLOCK_FRACTION).max(1)));
        Self {
            allotted: allotted_ms.map(Duration::from_millis),
        }
    }

    pub fn allotted(&self) -> Option<Duration> {
        self.allotted
    }

    pub fn allotted_ms(&self) -> Option<u64> {
        self.allotted
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}
