//! Square-pair geometry: compass direction, strict between-set and full line.

use std::sync::OnceLock;

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// `(file, rank)` step.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }
}

struct LineTables {
    direction: [[Option<Direction>; 64]; 64],
    between: [[u64; 64]; 64],
    line: [[u64; 64]; 64],
}

static TABLES: OnceLock<Box<LineTables>> = OnceLock::new();

#[inline]
fn line_tables() -> &'static LineTables {
    TABLES.get_or_init(build_line_tables)
}

fn build_line_tables() -> Box<LineTables> {
    let mut tables = Box::new(LineTables {
        direction: [[None; 64]; 64],
        between: [[0; 64]; 64],
        line: [[0; 64]; 64],
    });

    for from in 0..64i32 {
        for dir in Direction::ALL {
            let (file_step, rank_step) = dir.step();
            let full_line = ray(from, file_step, rank_step)
                | ray(from, -file_step, -rank_step)
                | (1u64 << from);

            let mut file = from % 8 + file_step;
            let mut rank = from / 8 + rank_step;
            let mut passed = 0u64;
            while (0..8).contains(&file) && (0..8).contains(&rank) {
                let to = (rank * 8 + file) as usize;
                tables.direction[from as usize][to] = Some(dir);
                tables.between[from as usize][to] = passed;
                tables.line[from as usize][to] = full_line;
                passed |= 1u64 << to;
                file += file_step;
                rank += rank_step;
            }
        }
    }

    tables
}

fn ray(from: i32, file_step: i32, rank_step: i32) -> u64 {
    let mut file = from % 8 + file_step;
    let mut rank = from / 8 + rank_step;
    let mut mask = 0u64;
    while (0..8).contains(&file) && (0..8).contains(&rank) {
        mask |= 1u64 << (rank * 8 + file);
        file += file_step;
        rank += rank_step;
    }
    mask
}

/// Compass direction leading from `from` to `to`, if they share a line.
#[inline]
pub fn direction(from: Square, to: Square) -> Option<Direction> {
    line_tables().direction[from as usize][to as usize]
}

/// Squares strictly between two aligned squares; empty when not aligned.
#[inline]
pub fn between(a: Square, b: Square) -> u64 {
    line_tables().between[a as usize][b as usize]
}

/// The whole board line through both squares; empty when not aligned.
#[inline]
pub fn line(a: Square, b: Square) -> u64 {
    line_tables().line[a as usize][b as usize]
}
