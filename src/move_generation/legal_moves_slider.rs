use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::LegalityContext;
use crate::move_generation::move_stack::MoveStack;
use crate::square_tables::slider_moves::{bishop_attacks, queen_attacks, rook_attacks};

/// Bishops, then rooks, then queens.
pub fn generate_slider_moves(game_state: &GameState, ctx: &LegalityContext, out: &mut MoveStack) {
    let side = ctx.side;
    push_slider_moves(game_state.pieces_of(side, PieceKind::Bishop), ctx, out, bishop_attacks);
    push_slider_moves(game_state.pieces_of(side, PieceKind::Rook), ctx, out, rook_attacks);
    push_slider_moves(game_state.pieces_of(side, PieceKind::Queen), ctx, out, queen_attacks);
}

#[inline]
fn push_slider_moves(
    pieces: u64,
    ctx: &LegalityContext,
    out: &mut MoveStack,
    attacks: fn(Square, u64) -> u64,
) {
    for from in Squares(pieces) {
        let targets = attacks(from, ctx.occupancy) & !ctx.own & ctx.allowed_targets(from);
        for to in Squares(targets) {
            out.push(Move::normal(from, to));
        }
    }
}
