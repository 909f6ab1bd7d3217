//! In-place move application and its exact inverse.
//!
//! `make_move` trusts its caller: the move must come from the legal move
//! generator for the current position.

use crate::game_state::chess_rules::{castling_rights_after, castling_rook_squares};
use crate::game_state::chess_types::*;

impl GameState {
    /// Apply `mv` and return the record needed to take it back.
    pub fn make_move(&mut self, mv: Move) -> UndoState {
        let mover = self.side_to_move;
        let moving = match self.mailbox[mv.from as usize] {
            Some(piece) => piece,
            None => unreachable!("make_move from empty square {}", mv.from),
        };

        let captured_square = captured_square(mover, mv);
        let captured_piece = self.mailbox[captured_square as usize];

        let undo = UndoState {
            captured_piece,
            prev_castling_rights: self.castling_rights,
            prev_king_squares: self.king_squares,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
        };

        if let Some(captured) = captured_piece {
            self.take_piece(captured_square, captured);
        }

        self.take_piece(mv.from, moving);
        let arriving = match mv.promotion {
            Some(kind) => Piece::new(mover, kind),
            None => moving,
        };
        self.add_piece(mv.to, arriving);

        if mv.special == SpecialMove::Castling {
            let (rook_from, rook_to) = castling_rook_squares(mover, mv.to);
            let rook = Piece::new(mover, PieceKind::Rook);
            self.take_piece(rook_from, rook);
            self.add_piece(rook_to, rook);
        }

        if moving.kind == PieceKind::King {
            self.king_squares[mover.index()] = mv.to;
        }

        self.castling_rights = castling_rights_after(self.castling_rights, mv.from, mv.to);

        self.en_passant_square = if moving.kind == PieceKind::Pawn && mv.from.abs_diff(mv.to) == 16
        {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

        if moving.kind == PieceKind::Pawn || captured_piece.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = mover.opposite();

        debug_assert!(self.validate().is_ok(), "make_move broke invariants: {:?}", self.validate());
        undo
    }

    /// Reverse `make_move(mv)` using the record it returned.
    pub fn undo_move(&mut self, mv: Move, undo: UndoState) {
        let mover = self.side_to_move.opposite();
        let arrived = match self.mailbox[mv.to as usize] {
            Some(piece) => piece,
            None => unreachable!("undo_move onto empty square {}", mv.to),
        };

        self.take_piece(mv.to, arrived);
        let original = if mv.promotion.is_some() {
            Piece::new(mover, PieceKind::Pawn)
        } else {
            arrived
        };
        self.add_piece(mv.from, original);

        if mv.special == SpecialMove::Castling {
            let (rook_from, rook_to) = castling_rook_squares(mover, mv.to);
            let rook = Piece::new(mover, PieceKind::Rook);
            self.take_piece(rook_to, rook);
            self.add_piece(rook_from, rook);
        }

        if let Some(captured) = undo.captured_piece {
            self.add_piece(captured_square(mover, mv), captured);
        }

        self.side_to_move = mover;
        self.castling_rights = undo.prev_castling_rights;
        self.king_squares = undo.prev_king_squares;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
    }
}

/// Square the captured piece (if any) stands on.
#[inline]
fn captured_square(mover: Color, mv: Move) -> Square {
    if mv.special == SpecialMove::EnPassant {
        (mv.to as i8 - mover.pawn_push()) as Square
    } else {
        mv.to
    }
}
