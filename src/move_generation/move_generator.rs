use thiserror::Error;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("invalid game state: {0}")]
    InvalidState(String),

    #[error("make_move_in_place failed: {0}")]
    MakeMoveFailed(String),

    #[error("unmake_move_in_place failed: {0}")]
    UnmakeMoveFailed(String),
}
