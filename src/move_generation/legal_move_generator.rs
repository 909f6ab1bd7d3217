//! Full legal move generation pipeline.
//!
//! Builds the check mask, pin set and king-danger map once per position, then
//! lets each piece generator emit only moves that satisfy them. No move is
//! applied to test legality; the single exception is en passant, which is
//! replayed on a copy of the occupancy bitboard.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::LegalityContext;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_slider::generate_slider_moves;
use crate::move_generation::move_stack::{MoveFrame, MoveStack};

/// Push every legal move for the side to move into a new frame on `stack`.
///
/// Order: pawns, knights, bishops, rooks, queens, king, castling.
pub fn generate_legal_moves(game_state: &GameState, stack: &mut MoveStack) -> (PositionState, MoveFrame) {
    let ctx = LegalityContext::new(game_state);
    let start = stack.open_frame();

    if ctx.position_state() != PositionState::DoubleCheck {
        generate_pawn_moves(game_state, &ctx, stack);
        generate_knight_moves(game_state, &ctx, stack);
        generate_slider_moves(game_state, &ctx, stack);
    }
    generate_king_moves(game_state, &ctx, stack);

    (ctx.position_state(), stack.close_frame(start))
}

/// Convenience wrapper returning an owned list.
pub fn legal_moves(game_state: &GameState) -> Vec<Move> {
    let mut stack = MoveStack::with_capacity(256);
    let (_, frame) = generate_legal_moves(game_state, &mut stack);
    stack.moves(frame).to_vec()
}

/// Check status and move count without keeping the moves.
pub fn position_status(game_state: &GameState) -> (PositionState, usize) {
    let mut stack = MoveStack::with_capacity(256);
    let (state, frame) = generate_legal_moves(game_state, &mut stack);
    (state, frame.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_square_attacked;

    #[test]
    fn starting_position_has_twenty_moves_in_generation_order() {
        let game = GameState::new_game();
        let moves = legal_moves(&game);
        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0], Move::normal(8, 16));
        assert_eq!(moves[1], Move::normal(8, 24));
        // Knights follow the sixteen pawn moves.
        assert_eq!(moves[16], Move::normal(1, 16));
        assert_eq!(moves[19], Move::normal(6, 23));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let game =
            GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .expect("fen");
        assert_eq!(position_status(&game), (PositionState::Check, 0));
    }

    #[test]
    fn smothered_corner_is_stalemate() {
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
        assert_eq!(position_status(&game), (PositionState::Quiet, 0));
    }

    #[test]
    fn double_check_only_allows_king_moves() {
        let game = GameState::from_fen("4k3/8/8/8/8/3n4/8/r3K1R1 w - - 0 1").expect("fen");
        let mut stack = MoveStack::new();
        let (state, frame) = generate_legal_moves(&game, &mut stack);
        assert_eq!(state, PositionState::DoubleCheck);
        assert!(stack.moves(frame).iter().all(|mv| mv.from == 4));
        assert!(!frame.is_empty());
    }

    #[test]
    fn frames_stack_and_release() {
        let game = GameState::new_game();
        let mut stack = MoveStack::new();
        let (_, outer) = generate_legal_moves(&game, &mut stack);
        let (_, inner) = generate_legal_moves(&game, &mut stack);
        assert_eq!(inner.start, outer.end);
        stack.release(inner);
        stack.release(outer);
        assert!(stack.is_empty());
    }

    #[test]
    fn no_generated_move_leaves_the_king_attacked() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let mut game = GameState::from_fen(fen).expect("fen");
            let mover = game.side_to_move;
            for mv in legal_moves(&game.clone()) {
                let undo = game.make_move(mv);
                let king = game.king_square(mover);
                assert!(
                    !is_square_attacked(&game, king, mover.opposite()),
                    "{fen}: {mv:?} leaves the king attacked"
                );
                game.undo_move(mv, undo);
            }
        }
    }
}
