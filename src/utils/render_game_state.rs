//! Plain-text board renderer for debugging and test output.

use crate::game_state::chess_types::*;
use crate::utils::fen_generator::piece_to_fen_char;

/// Render the board with rank 8 at the top, White pieces in upper case.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::with_capacity(200);

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match game_state.piece_at(rank * 8 + file) {
                Some(piece) => out.push(piece_to_fen_char(piece)),
                None => out.push('.'),
            }
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}
