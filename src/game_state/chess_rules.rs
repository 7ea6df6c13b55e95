//! Canonical chess-rule constants and game-end predicates.
//!
//! Checkmate and draw detection live here so the search, the engines and the
//! match harness all agree on when a game is over.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;
use crate::move_generation::move_generator::MoveGenResult;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Side to move is in check and has no legal reply.
pub fn is_checkmate(game_state: &mut GameState) -> MoveGenResult<bool> {
    if !is_king_in_check(game_state, game_state.side_to_move) {
        return Ok(false);
    }
    Ok(!has_any_legal_move(game_state)?)
}

/// Side to move is not in check and has no legal move.
pub fn is_stalemate(game_state: &mut GameState) -> MoveGenResult<bool> {
    if is_king_in_check(game_state, game_state.side_to_move) {
        return Ok(false);
    }
    Ok(!has_any_legal_move(game_state)?)
}

/// Any drawn state: fifty-move rule, threefold repetition, insufficient
/// material or stalemate.
pub fn is_draw(game_state: &mut GameState) -> MoveGenResult<bool> {
    if is_fifty_move_draw(game_state)
        || is_threefold_repetition(game_state)
        || has_insufficient_material(game_state)
    {
        return Ok(true);
    }
    is_stalemate(game_state)
}

#[inline]
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

/// Current position occurred at least three times with the same side to move.
pub fn is_threefold_repetition(game_state: &GameState) -> bool {
    let current = game_state.zobrist_key;
    // Only positions since the last irreversible move can repeat, and only on
    // the same side-to-move parity.
    let max_scan = usize::from(game_state.halfmove_clock)
        .saturating_add(1)
        .min(game_state.repetition_history.len());
    game_state
        .repetition_history
        .iter()
        .rev()
        .take(max_scan)
        .step_by(2)
        .filter(|key| **key == current)
        .count()
        >= 3
}

/// Bare kings, or a single minor piece against a bare king.
pub fn has_insufficient_material(game_state: &GameState) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
    for color in Color::BOTH {
        for piece in heavy_or_pawn {
            if game_state.pieces[color.index()][piece.index()] != 0 {
                return false;
            }
        }
    }

    let minors: u32 = Color::BOTH
        .into_iter()
        .map(|color| {
            (game_state.pieces[color.index()][PieceKind::Knight.index()]
                | game_state.pieces[color.index()][PieceKind::Bishop.index()])
            .count_ones()
        })
        .sum();
    minors <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::{make_move_in_place, unmake_move_in_place};
    use crate::utils::long_algebraic::long_algebraic_to_move_description;

    #[test]
    fn back_rank_mate_is_checkmate() {
        let mut game =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(is_checkmate(&mut game).expect("rules should run"));
        assert!(!is_draw(&mut game).expect("rules should run"));
    }

    #[test]
    fn cornered_king_is_stalemate() {
        let mut game =
            GameState::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(!is_checkmate(&mut game).expect("rules should run"));
        assert!(is_stalemate(&mut game).expect("rules should run"));
        assert!(is_draw(&mut game).expect("rules should run"));
    }

    #[test]
    fn insufficient_material_cases() {
        let bare = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let knight =
            GameState::from_fen("4k3/8/8/8/8/8/8/4KN2 w - - 0 1").expect("FEN should parse");
        let two_knights =
            GameState::from_fen("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1").expect("FEN should parse");
        let pawn = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");

        assert!(has_insufficient_material(&bare));
        assert!(has_insufficient_material(&knight));
        assert!(!has_insufficient_material(&two_knights));
        assert!(!has_insufficient_material(&pawn));
    }

    #[test]
    fn fifty_move_rule_triggers_at_one_hundred_halfmoves() {
        let mut game =
            GameState::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 100 80").expect("FEN should parse");
        assert!(is_fifty_move_draw(&game));
        assert!(is_draw(&mut game).expect("rules should run"));
    }

    #[test]
    fn knight_shuffle_reaches_threefold_repetition() {
        let mut game = GameState::new_game();
        for lan in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"] {
            assert!(!is_threefold_repetition(&game));
            let mv = long_algebraic_to_move_description(lan, &game).expect("move should parse");
            make_move_in_place(&mut game, mv).expect("move should apply");
        }
        assert!(!is_threefold_repetition(&game));

        let mv = long_algebraic_to_move_description("f6g8", &game).expect("move should parse");
        make_move_in_place(&mut game, mv).expect("move should apply");
        assert!(is_threefold_repetition(&game));

        unmake_move_in_place(&mut game).expect("unmake should succeed");
        assert!(!is_threefold_repetition(&game));
    }
}
