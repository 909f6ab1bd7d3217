use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::LegalityContext;
use crate::move_generation::move_stack::MoveStack;
use crate::square_tables::knight_moves::knight_attacks;

pub fn generate_knight_moves(game_state: &GameState, ctx: &LegalityContext, out: &mut MoveStack) {
    // A pinned knight can never stay on its pin line.
    let knights = game_state.pieces_of(ctx.side, PieceKind::Knight) & !ctx.pinned;

    for from in Squares(knights) {
        let targets = knight_attacks(from) & !ctx.own & ctx.check_mask;
        for to in Squares(targets) {
            out.push(Move::normal(from, to));
        }
    }
}
