//! Errors used throughout the chess core.
//!
//! Only the edges of the crate return errors: text parsers, position
//! validation and the hash-verification traversal. Move application and
//! search never fail; legality there is a contract upheld by the move
//! generator.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Color, Square};

pub type ChessResult<T> = Result<T, ChessErrors>;

/// Unified error type for the chess core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// The FEN string is malformed. Payload describes the offending field.
    InvalidFen(String),

    /// A square or move coordinate could not be parsed.
    InvalidAlgebraic(String),

    /// A square index outside `0..=63`.
    SquareOutOfRange(u8),

    /// The side has no king on the board.
    MissingKing(Color),

    /// The side has more than one king.
    TooManyKings(Color),

    /// Cached king square disagrees with the board.
    StaleKingSquare { color: Color, cached: Square, actual: Square },

    /// Mailbox and bitboards disagree on a square.
    CorruptedBoard(Square),

    /// En-passant target is not on the third or sixth rank.
    InvalidEnPassantSquare(Square),

    /// A move string does not match any legal move in the position.
    IllegalMove(String),

    /// Incremental and from-scratch zobrist keys disagree.
    HashMismatch { incremental: u64, recomputed: u64, fen: String },
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::InvalidFen(msg) => write!(f, "invalid FEN: {msg}"),
            ChessErrors::InvalidAlgebraic(msg) => write!(f, "invalid algebraic notation: {msg}"),
            ChessErrors::SquareOutOfRange(sq) => write!(f, "square index out of range: {sq}"),
            ChessErrors::MissingKing(color) => write!(f, "no {color:?} king on the board"),
            ChessErrors::TooManyKings(color) => write!(f, "more than one {color:?} king"),
            ChessErrors::StaleKingSquare {
                color,
                cached,
                actual,
            } => write!(
                f,
                "{color:?} king cached on {cached} but found on {actual}"
            ),
            ChessErrors::CorruptedBoard(sq) => {
                write!(f, "mailbox and bitboards disagree on square {sq}")
            }
            ChessErrors::InvalidEnPassantSquare(sq) => {
                write!(f, "invalid en-passant square: {sq}")
            }
            ChessErrors::IllegalMove(mv) => write!(f, "illegal move: {mv}"),
            ChessErrors::HashMismatch {
                incremental,
                recomputed,
                fen,
            } => write!(
                f,
                "zobrist mismatch at {fen}: incremental {incremental:#018x}, recomputed {recomputed:#018x}"
            ),
        }
    }
}

impl Error for ChessErrors {}
