//! Position contract the search core plays against.
//!
//! The search never owns a board. It borrows one mutably for the duration of
//! a call, plays moves through [`AppliedMove`] and relies on the guard to take
//! every move back, whichever way the scope is left.

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::move_generation::move_generator::MoveGenResult;

/// Move value handed out by a [`SearchPosition`].
pub trait SearchMove: Copy + Eq + Debug {
    fn from_square(&self) -> Square;
    fn to_square(&self) -> Square;
    fn promotion(&self) -> Option<PieceKind>;
}

/// A mutable chess position with strictly nested make/undo.
pub trait SearchPosition {
    type Move: SearchMove;

    /// Legal moves for the side to move. Leaves the position unchanged.
    fn legal_moves(&mut self) -> MoveGenResult<Vec<Self::Move>>;

    fn make_move(&mut self, mv: Self::Move) -> MoveGenResult<()>;

    /// Undo the most recent `make_move`.
    fn undo_move(&mut self);

    fn is_checkmate(&mut self) -> MoveGenResult<bool>;

    fn is_draw(&mut self) -> MoveGenResult<bool>;

    fn side_to_move(&self) -> Color;

    fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)>;

    fn position_hash(&self) -> u64;

    /// Whether a pawn of `pawn_color` attacks `square`.
    fn is_attacked_by_pawn(&self, square: Square, pawn_color: Color) -> bool;

    /// Legal move count for `side`, passing the turn if `side` is not to move.
    fn legal_move_count_for(&mut self, side: Color) -> MoveGenResult<usize>;
}

/// A move that has been played on a borrowed position and is taken back when
/// the guard is dropped.
pub struct AppliedMove<'a, P: SearchPosition> {
    position: &'a mut P,
}

impl<'a, P: SearchPosition> AppliedMove<'a, P> {
    pub fn apply(position: &'a mut P, mv: P::Move) -> MoveGenResult<Self> {
        position.make_move(mv)?;
        Ok(Self { position })
    }
}

impl<P: SearchPosition> Deref for AppliedMove<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: SearchPosition> DerefMut for AppliedMove<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: SearchPosition> Drop for AppliedMove<'_, P> {
    fn drop(&mut self) {
        self.position.undo_move();
    }
}
