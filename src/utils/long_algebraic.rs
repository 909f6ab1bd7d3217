//! Long algebraic move strings (`e2e4`, `e7e8q`).
//!
//! A string is accepted only when it names one of the legal moves of the
//! position, so the result can go straight into `GameState::make_move`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: Move) -> ChessResult<String> {
    let mut out = square_to_algebraic(mv.from)?;
    out.push_str(&square_to_algebraic(mv.to)?);
    if let Some(kind) = mv.promotion {
        out.push(promotion_to_char(kind));
    }
    Ok(out)
}

pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> ChessResult<Move> {
    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(ChessErrors::InvalidAlgebraic(long_algebraic.to_owned()));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;
    let promotion = match long_algebraic[4..].chars().next() {
        Some(ch) => Some(
            char_to_promotion(ch).ok_or_else(|| ChessErrors::InvalidAlgebraic(long_algebraic.to_owned()))?,
        ),
        None => None,
    };

    legal_moves(game_state)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
        .ok_or_else(|| ChessErrors::IllegalMove(long_algebraic.to_owned()))
}

fn promotion_to_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_quiet_opening_move() {
        let game = GameState::new_game();
        let mv = long_algebraic_to_move("e2e4", &game).expect("legal");
        assert_eq!(mv, Move::normal(12, 28));
        assert_eq!(move_to_long_algebraic(mv).as_deref(), Ok("e2e4"));
    }

    #[test]
    fn resolves_special_moves_from_the_position() {
        let game =
            GameState::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 2").expect("fen");
        assert_eq!(long_algebraic_to_move("e1g1", &game), Ok(Move::castling(4, 6)));
        assert_eq!(long_algebraic_to_move("e5d6", &game), Ok(Move::en_passant(36, 43)));
    }

    #[test]
    fn promotion_suffix_is_required_and_respected() {
        let game = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        assert_eq!(
            long_algebraic_to_move("b7b8n", &game),
            Ok(Move::promotion(49, 57, PieceKind::Knight))
        );
        assert_eq!(
            long_algebraic_to_move("b7b8", &game),
            Err(ChessErrors::IllegalMove("b7b8".to_owned()))
        );
        let mv = Move::promotion(49, 57, PieceKind::Rook);
        assert_eq!(move_to_long_algebraic(mv).as_deref(), Ok("b7b8r"));
    }

    #[test]
    fn rejects_illegal_and_malformed_strings() {
        let game = GameState::new_game();
        assert_eq!(
            long_algebraic_to_move("e2e5", &game),
            Err(ChessErrors::IllegalMove("e2e5".to_owned()))
        );
        assert!(matches!(
            long_algebraic_to_move("e2", &game),
            Err(ChessErrors::InvalidAlgebraic(_))
        ));
        assert!(matches!(
            long_algebraic_to_move("e7e8x", &game),
            Err(ChessErrors::InvalidAlgebraic(_))
        ));
    }
}
