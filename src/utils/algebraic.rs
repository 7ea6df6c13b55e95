//! Square-name conversions (`e4` <-> `28`).

use crate::game_state::chess_types::Square;

/// Parse a two-character square name such as `e4`.
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let &[file, rank] = square.as_bytes() else {
        return Err(format!("Invalid algebraic square: {square}"));
    };

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    Ok(format!("{file_char}{rank_char}"))
}
