use crate::game_state::chess_rules::castling_lanes;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::LegalityContext;
use crate::move_generation::move_stack::MoveStack;
use crate::square_tables::king_moves::king_attacks;

/// King steps, then castling (short before long).
pub fn generate_king_moves(game_state: &GameState, ctx: &LegalityContext, out: &mut MoveStack) {
    let from = ctx.king_square;
    let targets = king_attacks(from) & !ctx.own & !ctx.king_danger;
    for to in Squares(targets) {
        out.push(Move::normal(from, to));
    }

    if ctx.checkers != 0 {
        return;
    }

    for lane in castling_lanes(ctx.side) {
        if game_state.castling_rights & lane.right == 0 || from != lane.king_from {
            continue;
        }
        if ctx.occupancy & lane.empty_mask != 0 || ctx.king_danger & lane.king_path_mask != 0 {
            continue;
        }
        if game_state.piece_at(lane.rook_from) != Some(Piece::new(ctx.side, PieceKind::Rook)) {
            continue;
        }
        out.push(Move::castling(lane.king_from, lane.king_to));
    }
}
