//! Zobrist position fingerprints.
//!
//! Keys come from a fixed-seed `StdRng` so hashes are identical across runs.
//! The incremental form is checked against the full recomputation; nothing in
//! search consults the key for control flow.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{castling_rights_after, castling_rook_squares};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_stack::MoveStack;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    // One key per castling-right bit.
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random::<u64>();
            }
        }
    }

    let black_to_move = rng.random::<u64>();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.random::<u64>();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random::<u64>();
    }

    ZobristTables {
        piece_square,
        black_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square as usize]
}

/// XOR of the keys of every right set in `rights`.
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    let keys = &tables().castling;
    let mut key = 0u64;
    for (bit, bit_key) in keys.iter().enumerate() {
        if rights & (1 << bit) != 0 {
            key ^= bit_key;
        }
    }
    key
}

#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

#[inline]
pub fn black_to_move_key() -> u64 {
    tables().black_to_move
}

/// Full key from every active feature of the position.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in Color::ALL {
        for kind in PieceKind::ALL {
            let piece = Piece::new(color, kind);
            for sq in Squares(game_state.pieces_of(color, kind)) {
                key ^= piece_square_key(piece, sq);
            }
        }
    }

    if game_state.side_to_move == Color::Black {
        key ^= black_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights);

    if let Some(ep) = game_state.en_passant_square {
        key ^= en_passant_file_key(file_of(ep));
    }

    key
}

/// Key after `mv`, derived from `prior` and the position *before* the move.
pub fn update_zobrist_key(before: &GameState, prior: u64, mv: Move) -> u64 {
    let mover = before.side_to_move;
    let moving = match before.piece_at(mv.from) {
        Some(piece) => piece,
        None => unreachable!("hash update from empty square {}", mv.from),
    };

    let mut key = prior ^ piece_square_key(moving, mv.from);

    if mv.special == SpecialMove::EnPassant {
        let captured_sq = (mv.to as i8 - mover.pawn_push()) as Square;
        key ^= piece_square_key(Piece::new(mover.opposite(), PieceKind::Pawn), captured_sq);
    } else if let Some(captured) = before.piece_at(mv.to) {
        key ^= piece_square_key(captured, mv.to);
    }

    let arriving = match mv.promotion {
        Some(kind) => Piece::new(mover, kind),
        None => moving,
    };
    key ^= piece_square_key(arriving, mv.to);

    if mv.special == SpecialMove::Castling {
        let (rook_from, rook_to) = castling_rook_squares(mover, mv.to);
        let rook = Piece::new(mover, PieceKind::Rook);
        key ^= piece_square_key(rook, rook_from) ^ piece_square_key(rook, rook_to);
    }

    let rights_before = before.castling_rights;
    let rights_after = castling_rights_after(rights_before, mv.from, mv.to);
    key ^= castling_key(rights_before ^ rights_after);

    if let Some(ep) = before.en_passant_square {
        key ^= en_passant_file_key(file_of(ep));
    }
    if moving.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16 {
        key ^= en_passant_file_key(file_of(mv.from));
    }

    key ^ black_to_move_key()
}

impl GameState {
    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        compute_zobrist_key(self)
    }

    #[inline]
    pub fn zobrist_key_after(&self, prior: u64, mv: Move) -> u64 {
        update_zobrist_key(self, prior, mv)
    }
}

/// Walk the tree to `depth`, checking the incremental key against a full
/// recomputation after every move. Returns the leaf count on success.
pub fn perft_hash_checked(game_state: &mut GameState, depth: u8) -> ChessResult<u64> {
    let mut stack = MoveStack::new();
    let key = compute_zobrist_key(game_state);
    hash_checked_node(game_state, &mut stack, key, depth)
}

fn hash_checked_node(
    game_state: &mut GameState,
    stack: &mut MoveStack,
    key: u64,
    depth: u8,
) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let (_, frame) = generate_legal_moves(game_state, stack);
    let mut nodes = 0u64;
    let mut outcome = Ok(());

    for index in frame.indices() {
        let mv = stack.get(index);
        let child_key = update_zobrist_key(game_state, key, mv);
        let undo = game_state.make_move(mv);

        let recomputed = compute_zobrist_key(game_state);
        let step = if child_key != recomputed {
            Err(ChessErrors::HashMismatch {
                incremental: child_key,
                recomputed,
                fen: game_state.get_fen(),
            })
        } else {
            hash_checked_node(game_state, stack, child_key, depth - 1)
        };

        game_state.undo_move(mv, undo);
        match step {
            Ok(count) => nodes += count,
            Err(err) => {
                outcome = Err(err);
                break;
            }
        }
    }

    stack.release(frame);
    outcome.map(|_| nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        assert_eq!(a.zobrist_key(), b.zobrist_key());
        assert_ne!(a.zobrist_key(), 0);
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(w.zobrist_key() ^ b.zobrist_key(), black_to_move_key());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_eq!(
            with_rights.zobrist_key() ^ without_rights.zobrist_key(),
            castling_key(CASTLE_WHITE_SHORT | CASTLE_WHITE_LONG)
        );
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep =
            GameState::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep =
            GameState::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key(), ep.zobrist_key());
    }

    #[test]
    fn incremental_matches_full_after_double_push() {
        let mut game = GameState::new_game();
        let prior = game.zobrist_key();
        let mv = Move::normal(12, 28);
        let incremental = game.zobrist_key_after(prior, mv);
        game.make_move(mv);
        assert_eq!(incremental, game.zobrist_key());
    }

    #[test]
    fn incremental_matches_full_across_tricky_trees() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        ];
        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            let before = game.clone();
            let result = perft_hash_checked(&mut game, 3);
            assert!(result.is_ok(), "{fen}: {:?}", result.err());
            assert_eq!(game, before);
        }
    }

    #[test]
    fn hash_checked_perft_counts_leaves() {
        let mut game = GameState::new_game();
        assert_eq!(perft_hash_checked(&mut game, 3), Ok(8_902));
    }
}
