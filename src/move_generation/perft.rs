//! Perft: exhaustive leaf counting for move-generator verification.

use log::trace;

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_stack::MoveStack;

/// Leaf tallies by move category, matching the columns of published perft tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Number of leaf positions exactly `depth` plies below `game_state`.
pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    let mut stack = MoveStack::new();
    perft_node(game_state, &mut stack, depth)
}

fn perft_node(game_state: &mut GameState, stack: &mut MoveStack, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let (_, frame) = generate_legal_moves(game_state, stack);
    if depth == 1 {
        stack.release(frame);
        return frame.len() as u64;
    }

    let mut nodes = 0u64;
    for index in frame.indices() {
        let mv = stack.get(index);
        let undo = game_state.make_move(mv);
        nodes += perft_node(game_state, stack, depth - 1);
        game_state.undo_move(mv, undo);
    }

    stack.release(frame);
    nodes
}

/// Per-root-move leaf counts in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut stack = MoveStack::new();
    let (_, frame) = generate_legal_moves(game_state, &mut stack);
    let mut divided = Vec::with_capacity(frame.len());

    for index in frame.indices() {
        let mv = stack.get(index);
        let undo = game_state.make_move(mv);
        let nodes = perft_node(game_state, &mut stack, depth - 1);
        game_state.undo_move(mv, undo);

        trace!("perft divide {mv:?}: {nodes}");
        divided.push((mv, nodes));
    }

    stack.release(frame);
    divided
}

/// Perft with leaf classification. Slower than [`perft`]: every leaf is made.
pub fn perft_detailed(game_state: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut stack = MoveStack::new();
    let mut counts = PerftCounts::default();
    detailed_node(game_state, &mut stack, depth, &mut counts);
    counts
}

fn detailed_node(game_state: &mut GameState, stack: &mut MoveStack, depth: u8, counts: &mut PerftCounts) {
    let (_, frame) = generate_legal_moves(game_state, stack);

    for index in frame.indices() {
        let mv = stack.get(index);
        let is_capture = mv.special == SpecialMove::EnPassant || game_state.piece_at(mv.to).is_some();
        let undo = game_state.make_move(mv);

        if depth == 1 {
            counts.merge(classify_leaf(game_state, stack, mv, is_capture));
        } else {
            detailed_node(game_state, stack, depth - 1, counts);
        }

        game_state.undo_move(mv, undo);
    }

    stack.release(frame);
}

fn classify_leaf(game_state: &GameState, stack: &mut MoveStack, mv: Move, is_capture: bool) -> PerftCounts {
    let mut leaf = PerftCounts {
        nodes: 1,
        captures: is_capture as u64,
        en_passant: (mv.special == SpecialMove::EnPassant) as u64,
        castles: (mv.special == SpecialMove::Castling) as u64,
        promotions: mv.promotion.is_some() as u64,
        ..PerftCounts::default()
    };

    let (state, replies) = generate_legal_moves(game_state, stack);
    if state.is_check() {
        leaf.checks = 1;
        leaf.checkmates = replies.is_empty() as u64;
    }
    stack.release(replies);
    leaf
}
