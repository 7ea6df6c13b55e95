//! Piece value table shared by evaluation and move ordering.

use crate::errors::{SearchError, SearchResult};
use crate::game_state::chess_types::PieceKind;

/// Upper bound on the king value. Sixteen kings' worth of material and the
/// tenfold victim weight in move ordering both stay inside `i32`.
pub const MAX_KING_VALUE: i32 = i32::MAX / 16;

/// Centipawn value per piece kind, indexed by `PieceKind::index()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceValueTable {
    values: [i32; 6],
}

impl Default for PieceValueTable {
    fn default() -> Self {
        Self {
            values: [100, 300, 300, 500, 900, 10_000],
        }
    }
}

impl PieceValueTable {
    /// Build a custom table in pawn, knight, bishop, rook, queen, king order.
    ///
    /// Minor pieces must outrank a pawn and stay below the rook, the rook
    /// below the queen, and the king must outweigh a full starting army so a
    /// lost king dominates any material swing. The king is capped at
    /// [`MAX_KING_VALUE`].
    pub fn try_new(values: [i32; 6]) -> SearchResult<Self> {
        let [pawn, knight, bishop, rook, queen, king] = values;

        if pawn <= 0 {
            return Err(SearchError::InvalidPieceValues(format!(
                "pawn value must be positive, got {pawn}"
            )));
        }
        if knight <= pawn || bishop <= pawn {
            return Err(SearchError::InvalidPieceValues(format!(
                "minor pieces ({knight}, {bishop}) must be worth more than a pawn ({pawn})"
            )));
        }
        if knight >= rook || bishop >= rook || rook >= queen {
            return Err(SearchError::InvalidPieceValues(format!(
                "expected minors < rook < queen, got {knight}/{bishop} < {rook} < {queen}"
            )));
        }

        let army = i64::from(pawn) * 8
            + i64::from(knight) * 2
            + i64::from(bishop) * 2
            + i64::from(rook) * 2
            + i64::from(queen);
        if i64::from(king) <= army {
            return Err(SearchError::InvalidPieceValues(format!(
                "king value {king} must exceed the starting army value {army}"
            )));
        }
        if king > MAX_KING_VALUE {
            return Err(SearchError::InvalidPieceValues(format!(
                "king value {king} exceeds the maximum {MAX_KING_VALUE}"
            )));
        }

        Ok(Self { values })
    }

    #[inline]
    pub const fn value(&self, piece: PieceKind) -> i32 {
        self.values[piece.index()]
    }

    /// Value of an optional occupant; an empty square is worth 0.
    #[inline]
    pub fn value_of(&self, piece: Option<PieceKind>) -> i32 {
        piece.map_or(0, |piece| self.value(piece))
    }

    #[inline]
    pub const fn king(&self) -> i32 {
        self.value(PieceKind::King)
    }
}
