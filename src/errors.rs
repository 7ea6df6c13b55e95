//! Errors used by the search core.
//!
//! Board-level failures are reported by the position collaborator as
//! `MoveGenerationError` and are carried through search unchanged; the search
//! core adds only the conditions it can detect itself.

use thiserror::Error;

use crate::move_generation::move_generator::MoveGenerationError;

/// Result alias for search and move-selection entry points.
pub type SearchResult<T> = Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The side to move has no legal move. Callers must not ask for a move in
    /// a finished game.
    #[error("no legal moves available for the side to move")]
    NoLegalMoves,

    /// A custom piece value table broke the ordering or king-dominance rules.
    #[error("invalid piece value table: {0}")]
    InvalidPieceValues(String),

    /// The position collaborator failed while generating or applying moves.
    #[error("position collaborator failed: {0}")]
    Position(#[from] MoveGenerationError),
}
