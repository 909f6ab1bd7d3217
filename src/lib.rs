//! Crate root module declarations for the bitboard chess core.
//!
//! Exposes the precomputed square tables, the mutable game state with
//! make/undo, the legal move generator, zobrist hashing and tree search, plus
//! the text utilities used to build and inspect positions.

pub mod chess_errors;

pub mod square_tables {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod line_geometry;
    pub mod pawn_moves;
    pub mod slider_moves;
}

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod make_move;
    pub mod undo_state;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_slider;
    pub mod move_stack;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod negamax;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
