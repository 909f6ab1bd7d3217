//! Attack queries against an arbitrary occupancy.
//!
//! Callers pass the occupancy explicitly so the generator can ask "what if
//! this piece were gone" without touching the board.

use crate::game_state::chess_types::*;
use crate::square_tables::king_moves::king_attacks;
use crate::square_tables::knight_moves::knight_attacks;
use crate::square_tables::pawn_moves::pawn_attacks;
use crate::square_tables::slider_moves::{bishop_attacks, rook_attacks};

/// Pieces of `attacker` that attack `square` given `occupancy`.
pub fn attackers_to(game_state: &GameState, square: Square, attacker: Color, occupancy: u64) -> u64 {
    let pawns = game_state.pieces_of(attacker, PieceKind::Pawn);
    let knights = game_state.pieces_of(attacker, PieceKind::Knight);
    let kings = game_state.pieces_of(attacker, PieceKind::King);
    let queens = game_state.pieces_of(attacker, PieceKind::Queen);
    let diagonal = game_state.pieces_of(attacker, PieceKind::Bishop) | queens;
    let straight = game_state.pieces_of(attacker, PieceKind::Rook) | queens;

    // A pawn of `attacker` hits `square` iff a defending pawn on `square`
    // would hit the attacker's pawn.
    (pawn_attacks(attacker.opposite(), square) & pawns)
        | (knight_attacks(square) & knights)
        | (king_attacks(square) & kings)
        | (bishop_attacks(square, occupancy) & diagonal)
        | (rook_attacks(square, occupancy) & straight)
}

/// Union of every square `attacker` hits given `occupancy`.
pub fn attacked_squares(game_state: &GameState, attacker: Color, occupancy: u64) -> u64 {
    let mut attacked = 0u64;

    for sq in Squares(game_state.pieces_of(attacker, PieceKind::Pawn)) {
        attacked |= pawn_attacks(attacker, sq);
    }
    for sq in Squares(game_state.pieces_of(attacker, PieceKind::Knight)) {
        attacked |= knight_attacks(sq);
    }

    let queens = game_state.pieces_of(attacker, PieceKind::Queen);
    for sq in Squares(game_state.pieces_of(attacker, PieceKind::Bishop) | queens) {
        attacked |= bishop_attacks(sq, occupancy);
    }
    for sq in Squares(game_state.pieces_of(attacker, PieceKind::Rook) | queens) {
        attacked |= rook_attacks(sq, occupancy);
    }

    for sq in Squares(game_state.pieces_of(attacker, PieceKind::King)) {
        attacked |= king_attacks(sq);
    }

    attacked
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker: Color) -> bool {
    attackers_to(game_state, square, attacker, game_state.occupancy_all) != 0
}

impl GameState {
    /// Whether the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        let side = self.side_to_move;
        is_square_attacked(self, self.king_square(side), side.opposite())
    }
}
