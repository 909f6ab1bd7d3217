use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `undo_move`.
///
/// Holds only what cannot be re-derived from the move itself; consumed once
/// by the matching `undo_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub captured_piece: Option<Piece>,

    pub prev_castling_rights: CastlingRights,
    pub prev_king_squares: [Square; 2],
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
}
