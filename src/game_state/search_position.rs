//! `GameState` as the search core's position.

use crate::game_state::chess_rules;
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
use crate::move_generation::legal_move_checks::is_square_attacked_by_pawn;
use crate::move_generation::legal_move_generator::{
    count_legal_moves_for, generate_legal_move_descriptions_in_place,
};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to};
use crate::search::position::{SearchMove, SearchPosition};

impl SearchMove for u64 {
    #[inline]
    fn from_square(&self) -> Square {
        move_from(*self)
    }

    #[inline]
    fn to_square(&self) -> Square {
        move_to(*self)
    }

    #[inline]
    fn promotion(&self) -> Option<PieceKind> {
        move_promotion_piece(*self)
    }
}

impl SearchPosition for GameState {
    type Move = u64;

    fn legal_moves(&mut self) -> MoveGenResult<Vec<u64>> {
        generate_legal_move_descriptions_in_place(self)
    }

    fn make_move(&mut self, mv: u64) -> MoveGenResult<()> {
        make_move_in_place(self, mv).map_err(MoveGenerationError::MakeMoveFailed)
    }

    fn undo_move(&mut self) {
        // Only reachable with an empty undo stack, i.e. an unbalanced caller.
        if let Err(err) = unmake_move_in_place(self) {
            tracing::error!(error = %err, "undo_move without a matching make_move");
        }
    }

    fn is_checkmate(&mut self) -> MoveGenResult<bool> {
        chess_rules::is_checkmate(self)
    }

    fn is_draw(&mut self) -> MoveGenResult<bool> {
        chess_rules::is_draw(self)
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        GameState::piece_on(self, square)
    }

    #[inline]
    fn position_hash(&self) -> u64 {
        self.zobrist_key
    }

    #[inline]
    fn is_attacked_by_pawn(&self, square: Square, pawn_color: Color) -> bool {
        is_square_attacked_by_pawn(self, square, pawn_color)
    }

    fn legal_move_count_for(&mut self, side: Color) -> MoveGenResult<usize> {
        count_legal_moves_for(self, side)
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::search::position::{SearchMove, SearchPosition};
    use crate::utils::long_algebraic::long_algebraic_to_move_description;

    #[test]
    fn move_accessors_read_the_packed_move() {
        let game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mv = long_algebraic_to_move_description("a7a8r", &game).expect("move should parse");
        assert_eq!(mv.from_square(), 48);
        assert_eq!(mv.to_square(), 56);
        assert_eq!(mv.promotion(), Some(PieceKind::Rook));
    }

    #[test]
    fn make_and_undo_through_the_trait() {
        let mut game = GameState::new_game();
        let hash = game.position_hash();
        let mv = long_algebraic_to_move_description("d2d4", &game).expect("move should parse");
        game.make_move(mv).expect("move should apply");
        assert_eq!(game.side_to_move(), Color::Dark);
        // d4 pawn now covers c5 and e5.
        assert!(SearchPosition::is_attacked_by_pawn(&game, 34, Color::Light));
        game.undo_move();
        assert_eq!(game.position_hash(), hash);
        assert_eq!(SearchPosition::piece_on(&game, 11), Some((Color::Light, PieceKind::Pawn)));
    }

    #[test]
    fn stray_undo_is_logged_not_fatal() {
        let mut game = GameState::new_game();
        game.undo_move();
        assert_eq!(game.get_fen(), GameState::new_game().get_fen());
    }
}
