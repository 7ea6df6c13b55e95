//! Plain-text board diagram used by the UCI `d` command and test output.

use crate::game_state::game_state::GameState;
use crate::utils::fen_generator::piece_to_fen_char;

/// Render the board with rank 8 on top, FEN letters for pieces and `.` for
/// empty squares, followed by the FEN line.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::from("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        for file in 0..8u8 {
            out.push(' ');
            out.push(
                game_state
                    .piece_on(rank * 8 + file)
                    .map_or('.', |(color, piece)| piece_to_fen_char(color, piece)),
            );
        }
        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    out.push_str("Fen: ");
    out.push_str(&game_state.get_fen());
    out
}
