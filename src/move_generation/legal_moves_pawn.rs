use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::build_move;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::move_descriptions::{FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let enemy_occ = game_state.occupancy_by_color[enemy.index()];
    let empty = !game_state.occupancy_all;

    let (start_rank, promotion_rank) = match side {
        Color::Light => (1, 7),
        Color::Dark => (6, 0),
    };
    let ep_mask = game_state.en_passant_square.map_or(0, |sq| 1u64 << sq);

    let mut pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let forward = |sq: Square| match side {
            Color::Light => sq + 8,
            Color::Dark => sq - 8,
        };

        let one_step = forward(from);
        if (1u64 << one_step) & empty != 0 {
            push_pawn_move(out, from, one_step, None, 0, one_step / 8 == promotion_rank);

            if from / 8 == start_rank {
                let two_step = forward(one_step);
                if (1u64 << two_step) & empty != 0 {
                    out.push(build_move(
                        from,
                        two_step,
                        PieceKind::Pawn,
                        None,
                        None,
                        FLAG_DOUBLE_PAWN_PUSH,
                    ));
                }
            }
        }

        let mut captures = pawn_attacks(side, from) & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            let captured = game_state.piece_of_color_on(enemy, to);
            push_pawn_move(out, from, to, captured, FLAG_CAPTURE, to / 8 == promotion_rank);
            captures &= captures - 1;
        }

        if let Some(ep_square) = game_state.en_passant_square {
            if pawn_attacks(side, from) & ep_mask != 0 {
                out.push(build_move(
                    from,
                    ep_square,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn push_pawn_move(
    out: &mut Vec<u64>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u64,
    promotes: bool,
) {
    if promotes {
        for promo in PieceKind::PROMOTIONS {
            out.push(build_move(from, to, PieceKind::Pawn, captured, Some(promo), flags));
        }
    } else {
        out.push(build_move(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{move_promotion_piece, FLAG_EN_PASSANT};

    fn pawn_moves(fen: &str) -> Vec<u64> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let mut moves = Vec::new();
        generate_pawn_moves(&game, &mut moves);
        moves
    }

    #[test]
    fn starting_pawns_have_sixteen_moves() {
        let game = GameState::new_game();
        let mut moves = Vec::new();
        generate_pawn_moves(&game, &mut moves);
        assert_eq!(moves.len(), 16);
    }

    #[test]
    fn promotion_expands_to_four_pieces() {
        let moves = pawn_moves("1r5k/P7/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| move_promotion_piece(*mv).is_some()));
    }

    #[test]
    fn en_passant_is_generated_for_dark() {
        let moves = pawn_moves("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
        assert_eq!(moves.len(), 2);
        assert_eq!(moves.iter().filter(|mv| **mv & FLAG_EN_PASSANT != 0).count(), 1);
    }
}
