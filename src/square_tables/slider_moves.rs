//! Rook and bishop attack lookup.
//!
//! Each square owns a "vision" ray set (every square reachable ignoring
//! blockers) and a relevant-occupancy mask (vision minus the last square of each
//! ray, which can never block anything further). The attack set for a given
//! board is found by extracting the occupancy bits under the relevant mask into
//! a dense index (PEXT) and reading a precomputed table.

use std::sync::OnceLock;

const ROOK_STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_STEPS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const ROOK_VISION: [u64; 64] = generate_vision(&ROOK_STEPS, false);
pub const BISHOP_VISION: [u64; 64] = generate_vision(&BISHOP_STEPS, false);
const ROOK_RELEVANT: [u64; 64] = generate_vision(&ROOK_STEPS, true);
const BISHOP_RELEVANT: [u64; 64] = generate_vision(&BISHOP_STEPS, true);

#[inline]
pub const fn rook_vision(square: u8) -> u64 {
    ROOK_VISION[square as usize]
}

#[inline]
pub const fn bishop_vision(square: u8) -> u64 {
    BISHOP_VISION[square as usize]
}

#[inline]
pub fn rook_attacks(square: u8, occupancy: u64) -> u64 {
    slider_tables().rook.attacks(square, occupancy)
}

#[inline]
pub fn bishop_attacks(square: u8, occupancy: u64) -> u64 {
    slider_tables().bishop.attacks(square, occupancy)
}

#[inline]
pub fn queen_attacks(square: u8, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Force table construction ahead of the first lookup.
pub fn init_slider_tables() {
    let _ = slider_tables();
}

struct SliderTable {
    relevant: [u64; 64],
    offsets: [usize; 64],
    attacks: Vec<u64>,
}

impl SliderTable {
    fn build(steps: &[(i32, i32); 4], relevant: [u64; 64]) -> Self {
        let total: usize = relevant.iter().map(|mask| 1usize << mask.count_ones()).sum();
        let mut attacks = Vec::with_capacity(total);
        let mut offsets = [0usize; 64];

        for (sq, &mask) in relevant.iter().enumerate() {
            offsets[sq] = attacks.len();
            for index in 0..(1u64 << mask.count_ones()) {
                let occupancy = deposit_bits(index, mask);
                attacks.push(trace_attacks(sq as i32, steps, occupancy));
            }
        }

        Self {
            relevant,
            offsets,
            attacks,
        }
    }

    #[inline]
    fn attacks(&self, square: u8, occupancy: u64) -> u64 {
        let sq = square as usize;
        let index = extract_bits(occupancy, self.relevant[sq]) as usize;
        self.attacks[self.offsets[sq] + index]
    }
}

struct SliderTables {
    rook: SliderTable,
    bishop: SliderTable,
}

static TABLES: OnceLock<SliderTables> = OnceLock::new();

#[inline]
fn slider_tables() -> &'static SliderTables {
    TABLES.get_or_init(|| SliderTables {
        rook: SliderTable::build(&ROOK_STEPS, ROOK_RELEVANT),
        bishop: SliderTable::build(&BISHOP_STEPS, BISHOP_RELEVANT),
    })
}

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
fn extract_bits(value: u64, mask: u64) -> u64 {
    // SAFETY: compiled only when the target guarantees BMI2.
    unsafe { core::arch::x86_64::_pext_u64(value, mask) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
fn extract_bits(value: u64, mut mask: u64) -> u64 {
    let mut out = 0u64;
    let mut bit = 1u64;
    while mask != 0 {
        let lowest = mask & mask.wrapping_neg();
        if value & lowest != 0 {
            out |= bit;
        }
        bit <<= 1;
        mask &= mask - 1;
    }
    out
}

/// Inverse of [`extract_bits`]: spread the low bits of `index` over `mask`.
fn deposit_bits(mut index: u64, mut mask: u64) -> u64 {
    let mut out = 0u64;
    while mask != 0 {
        let lowest = mask & mask.wrapping_neg();
        if index & 1 != 0 {
            out |= lowest;
        }
        index >>= 1;
        mask &= mask - 1;
    }
    out
}

fn trace_attacks(square: i32, steps: &[(i32, i32); 4], occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    for &(file_step, rank_step) in steps {
        let mut file = (square % 8) + file_step;
        let mut rank = (square / 8) + rank_step;

        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }
    attacks
}

const fn generate_vision(steps: &[(i32, i32); 4], relevant_only: bool) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut mask = 0u64;
        let mut i = 0;
        while i < steps.len() {
            let (file_step, rank_step) = steps[i];
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;

            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                let next_file = file + file_step;
                let next_rank = rank + rank_step;
                let on_edge = next_file < 0 || next_file > 7 || next_rank < 0 || next_rank > 7;
                if !(relevant_only && on_edge) {
                    mask |= 1u64 << (rank * 8 + file);
                }
                file = next_file;
                rank = next_rank;
            }
            i += 1;
        }

        table[sq] = mask;
        sq += 1;
    }

    table
}
