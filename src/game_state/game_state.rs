//! Core mutable board state.
//!
//! `GameState` keeps per-piece bitboards for attack lookups and a mailbox for
//! O(1) "what stands here" queries. Both views, the occupancy caches and the
//! cached king squares are kept in lockstep by every mutation in this crate.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Bitboard representation ---
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    // --- Square-indexed representation ---
    pub mailbox: [Option<Piece>; 64],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // [color]
    pub king_squares: [Square; 2],
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            mailbox: [None; 64],

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            king_squares: [0; 2],
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        match parse_fen(STARTING_POSITION_FEN) {
            Ok(game_state) => game_state,
            Err(err) => unreachable!("starting FEN must parse: {err}"),
        }
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Queries ---

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square as usize]
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    // --- Placement setters for external readers ---

    /// Place `piece` on `square`, replacing whatever stood there.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        if let Some(old) = self.mailbox[square as usize] {
            self.take_piece(square, old);
        }
        self.add_piece(square, piece);
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.index()] = square;
        }
    }

    /// Remove and return the piece on `square`.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let piece = self.mailbox[square as usize]?;
        self.take_piece(square, piece);
        Some(piece)
    }

    pub fn clear_board(&mut self) {
        self.pieces = [[0; 6]; 2];
        self.occupancy_by_color = [0; 2];
        self.occupancy_all = 0;
        self.mailbox = [None; 64];
    }

    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights & CASTLE_ALL;
    }

    #[inline]
    pub fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.en_passant_square = square;
    }

    #[inline]
    pub fn set_halfmove_clock(&mut self, clock: u16) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub fn set_fullmove_number(&mut self, number: u16) {
        self.fullmove_number = number;
    }

    /// Rescan the king bitboards into the cached king squares.
    pub fn refresh_king_squares(&mut self) {
        for color in Color::ALL {
            let kings = self.pieces_of(color, PieceKind::King);
            if kings != 0 {
                self.king_squares[color.index()] = kings.trailing_zeros() as Square;
            }
        }
    }

    /// Check the structural invariants the rest of the crate relies on.
    pub fn validate(&self) -> ChessResult<()> {
        for color in Color::ALL {
            let kings = self.pieces_of(color, PieceKind::King);
            match kings.count_ones() {
                0 => return Err(ChessErrors::MissingKing(color)),
                1 => {}
                _ => return Err(ChessErrors::TooManyKings(color)),
            }
            let actual = kings.trailing_zeros() as Square;
            let cached = self.king_square(color);
            if cached != actual {
                return Err(ChessErrors::StaleKingSquare {
                    color,
                    cached,
                    actual,
                });
            }
        }

        for sq in 0..64u8 {
            let bit = square_bit(sq);
            let from_bitboards = Color::ALL.iter().find_map(|&color| {
                PieceKind::ALL
                    .iter()
                    .find(|&&kind| self.pieces_of(color, kind) & bit != 0)
                    .map(|&kind| Piece::new(color, kind))
            });
            if from_bitboards != self.mailbox[sq as usize] {
                return Err(ChessErrors::CorruptedBoard(sq));
            }
        }

        let white = self.pieces[Color::White.index()].iter().fold(0, |acc, bb| acc | bb);
        let black = self.pieces[Color::Black.index()].iter().fold(0, |acc, bb| acc | bb);
        if white != self.occupancy(Color::White)
            || black != self.occupancy(Color::Black)
            || white | black != self.occupancy_all
            || white & black != 0
        {
            let sq = ((white & black) | (self.occupancy_all ^ (white | black))).trailing_zeros();
            return Err(ChessErrors::CorruptedBoard(sq.min(63) as Square));
        }

        if let Some(ep) = self.en_passant_square {
            self.validate_en_passant_square(ep)?;
        }

        Ok(())
    }

    /// The target must sit behind an enemy pawn that just double-pushed.
    fn validate_en_passant_square(&self, ep: Square) -> ChessResult<()> {
        let side = self.side_to_move;
        let expected_rank = match side {
            Color::White => 5,
            Color::Black => 2,
        };
        if ep > 63 || rank_of(ep) != expected_rank || self.piece_at(ep).is_some() {
            return Err(ChessErrors::InvalidEnPassantSquare(ep));
        }

        let victim = (ep as i8 - side.pawn_push()) as Square;
        if self.piece_at(victim) != Some(Piece::new(side.opposite(), PieceKind::Pawn)) {
            return Err(ChessErrors::InvalidEnPassantSquare(ep));
        }
        Ok(())
    }

    // --- Raw placement used by make/undo ---

    #[inline]
    pub(crate) fn add_piece(&mut self, square: Square, piece: Piece) {
        let bit = square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= bit;
        self.occupancy_by_color[piece.color.index()] |= bit;
        self.occupancy_all |= bit;
        self.mailbox[square as usize] = Some(piece);
    }

    #[inline]
    pub(crate) fn take_piece(&mut self, square: Square, piece: Piece) {
        let bit = square_bit(square);
        self.pieces[piece.color.index()][piece.kind.index()] &= !bit;
        self.occupancy_by_color[piece.color.index()] &= !bit;
        self.occupancy_all &= !bit;
        self.mailbox[square as usize] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_has_consistent_caches() {
        let game = GameState::new_game();
        assert!(game.validate().is_ok());
        assert_eq!(game.king_square(Color::White), 4);
        assert_eq!(game.king_square(Color::Black), 60);
        assert_eq!(game.occupancy_all.count_ones(), 32);
        assert_eq!(game.castling_rights, CASTLE_ALL);
    }

    #[test]
    fn put_piece_replaces_and_tracks_kings() {
        let mut game = GameState::new_game();
        game.put_piece(4, Piece::new(Color::White, PieceKind::Queen));
        game.put_piece(28, Piece::new(Color::White, PieceKind::King));

        assert_eq!(game.piece_at(4), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert_eq!(game.king_square(Color::White), 28);
        assert_eq!(game.pieces_of(Color::White, PieceKind::King), square_bit(28));
        assert!(game.validate().is_ok());
    }

    #[test]
    fn clear_board_empties_every_view() {
        let mut game = GameState::new_game();
        game.clear_board();
        assert_eq!(game.occupancy_all, 0);
        assert!(game.mailbox.iter().all(Option::is_none));
        assert_eq!(game.pieces_of(Color::Black, PieceKind::Pawn), 0);

        game.put_piece(4, Piece::new(Color::White, PieceKind::King));
        game.put_piece(60, Piece::new(Color::Black, PieceKind::King));
        assert!(game.validate().is_ok());
    }

    #[test]
    fn validate_reports_missing_king() {
        let mut game = GameState::new_game();
        game.remove_piece(60);
        assert_eq!(game.validate(), Err(ChessErrors::MissingKing(Color::Black)));
    }

    #[test]
    fn validate_reports_duplicate_king() {
        let mut game = GameState::new_game();
        game.put_piece(28, Piece::new(Color::White, PieceKind::King));
        game.add_piece(4, Piece::new(Color::White, PieceKind::King));
        assert_eq!(game.validate(), Err(ChessErrors::TooManyKings(Color::White)));
    }

    #[test]
    fn validate_reports_en_passant_off_the_capture_ranks() {
        let mut game = GameState::new_game();
        game.set_en_passant_square(Some(28));
        assert_eq!(game.validate(), Err(ChessErrors::InvalidEnPassantSquare(28)));
    }

    #[test]
    fn validate_reports_en_passant_behind_the_movers_own_pawn() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1").expect("fen");
        game.set_en_passant_square(Some(20));
        assert_eq!(game.validate(), Err(ChessErrors::InvalidEnPassantSquare(20)));
    }

    #[test]
    fn validate_reports_en_passant_without_an_enemy_pawn_to_take() {
        // Right rank for White to move, but d5 is empty.
        let mut game = GameState::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1").expect("fen");
        game.set_en_passant_square(Some(43));
        assert_eq!(game.validate(), Err(ChessErrors::InvalidEnPassantSquare(43)));

        // Target square itself occupied.
        let mut game = GameState::from_fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - - 0 1").expect("fen");
        game.set_en_passant_square(Some(43));
        assert_eq!(game.validate(), Err(ChessErrors::InvalidEnPassantSquare(43)));
    }

    #[test]
    fn validate_accepts_en_passant_after_a_double_push() {
        let game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("fen");
        assert!(game.validate().is_ok());
    }

    #[test]
    fn validate_reports_mailbox_drift() {
        let mut game = GameState::new_game();
        game.mailbox[20] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        assert_eq!(game.validate(), Err(ChessErrors::CorruptedBoard(20)));
    }
}
