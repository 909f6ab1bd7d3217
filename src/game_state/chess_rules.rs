//! Canonical chess-rule constants.
//!
//! Starting position, castling geometry and the per-square castling-rights
//! clearing masks shared by make/undo, move generation and hashing.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Geometry of one castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub empty_mask: u64,
    /// Squares the king stands on, crosses, or lands on.
    pub king_path_mask: u64,
}

const fn lane(
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    rook_to: Square,
) -> CastlingLane {
    let (low, high) = if king_from < rook_from {
        (king_from, rook_from)
    } else {
        (rook_from, king_from)
    };
    let mut empty_mask = 0u64;
    let mut sq = low + 1;
    while sq < high {
        empty_mask |= 1u64 << sq;
        sq += 1;
    }

    let (low, high) = if king_from < king_to {
        (king_from, king_to)
    } else {
        (king_to, king_from)
    };
    let mut king_path_mask = 0u64;
    let mut sq = low;
    while sq <= high {
        king_path_mask |= 1u64 << sq;
        sq += 1;
    }

    CastlingLane {
        right,
        king_from,
        king_to,
        rook_from,
        rook_to,
        empty_mask,
        king_path_mask,
    }
}

/// Short then long castling lane per color.
pub const CASTLING_LANES: [[CastlingLane; 2]; 2] = [
    [
        lane(CASTLE_WHITE_SHORT, 4, 6, 7, 5),
        lane(CASTLE_WHITE_LONG, 4, 2, 0, 3),
    ],
    [
        lane(CASTLE_BLACK_SHORT, 60, 62, 63, 61),
        lane(CASTLE_BLACK_LONG, 60, 58, 56, 59),
    ],
];

#[inline]
pub fn castling_lanes(color: Color) -> &'static [CastlingLane; 2] {
    &CASTLING_LANES[color.index()]
}

/// Rook relocation `(from, to)` for a castling move landing the king on `king_to`.
#[inline]
pub fn castling_rook_squares(color: Color, king_to: Square) -> (Square, Square) {
    let [short, long] = castling_lanes(color);
    if king_to == short.king_to {
        (short.rook_from, short.rook_to)
    } else {
        (long.rook_from, long.rook_to)
    }
}

/// Rights that survive a piece leaving or arriving on each square.
pub const CASTLING_RIGHTS_MASK: [CastlingRights; 64] = build_castling_rights_mask();

const fn build_castling_rights_mask() -> [CastlingRights; 64] {
    let mut table = [CASTLE_ALL; 64];
    table[0] = CASTLE_ALL & !CASTLE_WHITE_LONG;
    table[7] = CASTLE_ALL & !CASTLE_WHITE_SHORT;
    table[4] = CASTLE_ALL & !(CASTLE_WHITE_SHORT | CASTLE_WHITE_LONG);
    table[56] = CASTLE_ALL & !CASTLE_BLACK_LONG;
    table[63] = CASTLE_ALL & !CASTLE_BLACK_SHORT;
    table[60] = CASTLE_ALL & !(CASTLE_BLACK_SHORT | CASTLE_BLACK_LONG);
    table
}

/// Castling rights after a move between `from` and `to`.
#[inline]
pub fn castling_rights_after(rights: CastlingRights, from: Square, to: Square) -> CastlingRights {
    rights & CASTLING_RIGHTS_MASK[from as usize] & CASTLING_RIGHTS_MASK[to as usize]
}
