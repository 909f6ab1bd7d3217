//! Per-position legality data shared by the piece generators.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::{attacked_squares, attackers_to};
use crate::square_tables::line_geometry::{between, line};
use crate::square_tables::slider_moves::{bishop_vision, rook_vision};

/// Everything a piece generator needs to emit only legal moves.
#[derive(Debug, Clone, Copy)]
pub struct LegalityContext {
    pub side: Color,
    pub king_square: Square,
    pub own: u64,
    pub enemy: u64,
    pub occupancy: u64,
    pub checkers: u64,
    /// Destinations that resolve a single check; all squares when not in check.
    pub check_mask: u64,
    pub pinned: u64,
    /// Squares the enemy hits with our king lifted off the board.
    pub king_danger: u64,
}

impl LegalityContext {
    pub fn new(game_state: &GameState) -> Self {
        let side = game_state.side_to_move;
        let enemy_color = side.opposite();
        let king_square = game_state.king_square(side);
        let king_bit = square_bit(king_square);
        let occupancy = game_state.occupancy_all;

        let checkers = attackers_to(game_state, king_square, enemy_color, occupancy);
        let check_mask = match checkers.count_ones() {
            0 => !0u64,
            1 => {
                let checker = checkers.trailing_zeros() as Square;
                checkers | between(king_square, checker)
            }
            _ => 0,
        };

        Self {
            side,
            king_square,
            own: game_state.occupancy(side),
            enemy: game_state.occupancy(enemy_color),
            occupancy,
            checkers,
            check_mask,
            pinned: pinned_pieces(game_state, side, king_square),
            king_danger: attacked_squares(game_state, enemy_color, occupancy & !king_bit),
        }
    }

    #[inline]
    pub fn position_state(&self) -> PositionState {
        match self.checkers.count_ones() {
            0 => PositionState::Quiet,
            1 => PositionState::Check,
            _ => PositionState::DoubleCheck,
        }
    }

    /// Squares a piece on `from` may land on without exposing the king.
    #[inline]
    pub fn pin_ray(&self, from: Square) -> u64 {
        if self.pinned & square_bit(from) != 0 {
            line(self.king_square, from)
        } else {
            !0u64
        }
    }

    /// Pin and check restrictions combined for a non-king piece on `from`.
    #[inline]
    pub fn allowed_targets(&self, from: Square) -> u64 {
        self.check_mask & self.pin_ray(from)
    }
}

/// Own pieces standing alone between the king and an enemy slider.
fn pinned_pieces(game_state: &GameState, side: Color, king_square: Square) -> u64 {
    let enemy = side.opposite();
    let queens = game_state.pieces_of(enemy, PieceKind::Queen);
    let straight = (game_state.pieces_of(enemy, PieceKind::Rook) | queens) & rook_vision(king_square);
    let diagonal =
        (game_state.pieces_of(enemy, PieceKind::Bishop) | queens) & bishop_vision(king_square);

    let own = game_state.occupancy(side);
    let mut pinned = 0u64;
    for slider in Squares(straight | diagonal) {
        let blockers = between(king_square, slider) & game_state.occupancy_all;
        if blockers.count_ones() == 1 && blockers & own != 0 {
            pinned |= blockers;
        }
    }
    pinned
}
