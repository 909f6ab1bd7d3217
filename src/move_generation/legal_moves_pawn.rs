use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::LegalityContext;
use crate::move_generation::move_stack::MoveStack;
use crate::square_tables::pawn_moves::pawn_attacks;
use crate::square_tables::slider_moves::{bishop_attacks, rook_attacks};

pub fn generate_pawn_moves(game_state: &GameState, ctx: &LegalityContext, out: &mut MoveStack) {
    let side = ctx.side;
    let push = side.pawn_push();
    let (start_rank, promotion_rank) = match side {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };
    let empty = !ctx.occupancy;

    for from in Squares(game_state.pieces_of(side, PieceKind::Pawn)) {
        let one = from as i8 + push;
        if !(0..64).contains(&one) {
            continue;
        }

        let mut targets = square_bit(one as Square) & empty;
        if targets != 0 && rank_of(from) == start_rank {
            targets |= square_bit((one + push) as Square) & empty;
        }
        targets |= pawn_attacks(side, from) & ctx.enemy;
        targets &= ctx.allowed_targets(from);

        let en_passant = game_state.en_passant_square.filter(|&ep| {
            pawn_attacks(side, from) & square_bit(ep) != 0
                && en_passant_is_legal(game_state, ctx, from, ep)
        });
        if let Some(ep) = en_passant {
            targets |= square_bit(ep);
        }

        for to in Squares(targets) {
            if Some(to) == en_passant {
                out.push(Move::en_passant(from, to));
            } else if rank_of(to) == promotion_rank {
                for kind in PieceKind::PROMOTIONS {
                    out.push(Move::promotion(from, to, kind));
                }
            } else {
                out.push(Move::normal(from, to));
            }
        }
    }
}

/// Square of the pawn removed by an en-passant capture onto `ep`.
#[inline]
pub fn en_passant_victim(side: Color, ep: Square) -> Square {
    (ep as i8 - side.pawn_push()) as Square
}

/// Whether the pawn on `from` may capture en passant onto `ep`.
///
/// The capture must answer any single check, either by taking the checker or by
/// landing on the check line. Lifting both pawns off the board at once can
/// uncover a slider on the king, which the ordinary pin scan misses, so the
/// capture is replayed on a copy of the occupancy and the king re-tested.
fn en_passant_is_legal(game_state: &GameState, ctx: &LegalityContext, from: Square, ep: Square) -> bool {
    let victim = en_passant_victim(ctx.side, ep);
    if (square_bit(ep) | square_bit(victim)) & ctx.check_mask == 0 {
        return false;
    }

    let enemy = ctx.side.opposite();
    let queens = game_state.pieces_of(enemy, PieceKind::Queen);
    let straight = game_state.pieces_of(enemy, PieceKind::Rook) | queens;
    let diagonal = game_state.pieces_of(enemy, PieceKind::Bishop) | queens;

    let occupancy = (ctx.occupancy & !square_bit(from) & !square_bit(victim)) | square_bit(ep);
    rook_attacks(ctx.king_square, occupancy) & straight == 0
        && bishop_attacks(ctx.king_square, occupancy) & diagonal == 0
}
