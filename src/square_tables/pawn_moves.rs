use crate::game_state::chess_types::Color;

/// `[color][square]` diagonal capture masks.
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_pawn_attacks(1),
    generate_pawn_attacks(-1),
];

#[inline]
pub const fn pawn_attacks(color: Color, square: u8) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

const fn generate_pawn_attacks(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + rank_step;
        let mut attacks = 0u64;

        if rank >= 0 && rank < 8 {
            if file > 0 {
                attacks |= 1u64 << (rank * 8 + file - 1);
            }
            if file < 7 {
                attacks |= 1u64 << (rank * 8 + file + 1);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}
