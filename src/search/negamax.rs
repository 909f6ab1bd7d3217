//! Fixed-depth negamax search with optional alpha-beta pruning.
//!
//! Every routine applies moves in place with `make_move` and takes them back
//! with `undo_move` before returning, including on cutoffs, so the board seen
//! by the caller is unchanged.

use log::{debug, info};

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::move_stack::MoveStack;
use crate::search::board_scoring::{BoardScorer, TaperedScorer, INF, MATE_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchAlgorithm {
    /// Full-width minimax in negamax form.
    Negamax,
    #[default]
    AlphaBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub algorithm: SearchAlgorithm,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            algorithm: SearchAlgorithm::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub nodes: u64,
}

/// Score of a position with no legal moves, from the mover's perspective.
#[inline]
pub fn terminal_score(state: PositionState, ply: u8) -> i32 {
    if state.is_check() {
        -MATE_SCORE + ply as i32
    } else {
        0
    }
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_SCORE - u8::MAX as i32
}

/// Depth-first searcher bound to one board for the duration of a search.
pub struct Searcher<'a, S: BoardScorer> {
    game_state: &'a mut GameState,
    scorer: S,
    stack: MoveStack,
    nodes: u64,
}

impl<'a> Searcher<'a, TaperedScorer> {
    pub fn new(game_state: &'a mut GameState) -> Self {
        Self::with_scorer(game_state, TaperedScorer)
    }
}

impl<'a, S: BoardScorer> Searcher<'a, S> {
    pub fn with_scorer(game_state: &'a mut GameState, scorer: S) -> Self {
        Self {
            game_state,
            scorer,
            stack: MoveStack::new(),
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Plain negamax value of the position `depth` plies deep.
    pub fn negamax(&mut self, depth: u8) -> i32 {
        self.negamax_node(depth, 0)
    }

    /// Alpha-beta negamax value inside the `(alpha, beta)` window.
    pub fn negamax_ab(&mut self, depth: u8, alpha: i32, beta: i32) -> i32 {
        self.negamax_ab_node(depth, 0, alpha, beta)
    }

    /// Capture-only search from a stand-pat baseline.
    pub fn quiescence(&mut self, alpha: i32, beta: i32) -> i32 {
        self.quiescence_node(0, alpha, beta)
    }

    /// Pick the root move with the highest negated child value.
    ///
    /// Ties keep the move generated first.
    pub fn best_move(&mut self, config: SearchConfig) -> SearchResult {
        self.nodes = 0;

        if config.max_depth == 0 {
            self.nodes = 1;
            return SearchResult {
                best_move: None,
                score: self.scorer.score(self.game_state),
                nodes: self.nodes,
            };
        }

        let (state, frame) = generate_legal_moves(self.game_state, &mut self.stack);
        if frame.is_empty() {
            self.stack.release(frame);
            self.nodes = 1;
            return SearchResult {
                best_move: None,
                score: terminal_score(state, 0),
                nodes: self.nodes,
            };
        }

        let child_depth = config.max_depth - 1;
        let mut alpha = -INF;
        let mut best_score = -INF;
        let mut best_move = None;

        for index in frame.indices() {
            let mv = self.stack.get(index);
            let undo = self.game_state.make_move(mv);
            let score = match config.algorithm {
                SearchAlgorithm::Negamax => -self.negamax_node(child_depth, 1),
                SearchAlgorithm::AlphaBeta => -self.negamax_ab_node(child_depth, 1, -INF, -alpha),
            };
            self.game_state.undo_move(mv, undo);

            debug!("root {mv:?}: {score}");

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
        }

        self.stack.release(frame);

        info!(
            "depth {} {:?}: best {:?} score {} nodes {}",
            config.max_depth, config.algorithm, best_move, best_score, self.nodes
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }

    fn negamax_node(&mut self, depth: u8, ply: u8) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.scorer.score(self.game_state);
        }

        let (state, frame) = generate_legal_moves(self.game_state, &mut self.stack);
        if frame.is_empty() {
            self.stack.release(frame);
            return terminal_score(state, ply);
        }

        let mut best = -INF;
        for index in frame.indices() {
            let mv = self.stack.get(index);
            let undo = self.game_state.make_move(mv);
            let score = -self.negamax_node(depth - 1, ply + 1);
            self.game_state.undo_move(mv, undo);

            if score > best {
                best = score;
            }
        }

        self.stack.release(frame);
        best
    }

    fn negamax_ab_node(&mut self, depth: u8, ply: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if depth == 0 {
            return self.scorer.score(self.game_state);
        }

        let (state, frame) = generate_legal_moves(self.game_state, &mut self.stack);
        if frame.is_empty() {
            self.stack.release(frame);
            return terminal_score(state, ply);
        }

        for index in frame.indices() {
            let mv = self.stack.get(index);
            let undo = self.game_state.make_move(mv);
            let score = -self.negamax_ab_node(depth - 1, ply + 1, -beta, -alpha);
            self.game_state.undo_move(mv, undo);

            if score >= beta {
                self.stack.release(frame);
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        self.stack.release(frame);
        alpha
    }

    fn quiescence_node(&mut self, ply: u8, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let stand_pat = self.scorer.score(self.game_state);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let (state, frame) = generate_legal_moves(self.game_state, &mut self.stack);
        if frame.is_empty() {
            self.stack.release(frame);
            return terminal_score(state, ply);
        }

        for index in frame.indices() {
            let mv = self.stack.get(index);
            if !self.is_noisy(mv) {
                continue;
            }

            let undo = self.game_state.make_move(mv);
            let score = -self.quiescence_node(ply.saturating_add(1), -beta, -alpha);
            self.game_state.undo_move(mv, undo);

            if score >= beta {
                self.stack.release(frame);
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        self.stack.release(frame);
        alpha
    }

    #[inline]
    fn is_noisy(&self, mv: Move) -> bool {
        matches!(mv.special, SpecialMove::Promotion | SpecialMove::EnPassant)
            || self.game_state.piece_at(mv.to).is_some()
    }
}

/// Search `game_state` with the default tapered evaluation.
pub fn best_move(game_state: &mut GameState, config: SearchConfig) -> SearchResult {
    Searcher::new(game_state).best_move(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::MaterialScorer;

    const POSITIONS: [&str; 5] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 3",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ];

    fn search(fen: &str, depth: u8, algorithm: SearchAlgorithm) -> SearchResult {
        let mut game = GameState::from_fen(fen).expect("fen");
        let before = game.clone();
        let result = best_move(
            &mut game,
            SearchConfig {
                max_depth: depth,
                algorithm,
            },
        );
        assert_eq!(game, before, "search must restore the board");
        result
    }

    #[test]
    fn alpha_beta_agrees_with_negamax() {
        for fen in POSITIONS {
            for depth in 1..=3 {
                let plain = search(fen, depth, SearchAlgorithm::Negamax);
                let pruned = search(fen, depth, SearchAlgorithm::AlphaBeta);
                assert_eq!(plain.score, pruned.score, "{fen} depth {depth}");
                assert_eq!(plain.best_move, pruned.best_move, "{fen} depth {depth}");
                assert!(pruned.nodes <= plain.nodes);
            }
        }
    }

    #[test]
    fn finds_scholars_mate() {
        let fen = POSITIONS[3];
        for algorithm in [SearchAlgorithm::Negamax, SearchAlgorithm::AlphaBeta] {
            let result = search(fen, 2, algorithm);
            // Qf3xf7#
            assert_eq!(result.best_move, Some(Move::normal(21, 53)));
            assert_eq!(result.score, MATE_SCORE - 1);
            assert!(is_mate_score(result.score));
        }
    }

    #[test]
    fn mated_side_reports_no_move() {
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let result = search(fen, 3, SearchAlgorithm::AlphaBeta);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE_SCORE);
    }

    #[test]
    fn stalemate_scores_zero() {
        let result = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2, SearchAlgorithm::Negamax);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn depth_zero_returns_static_eval() {
        let mut game = GameState::from_fen(POSITIONS[1]).expect("fen");
        let expected = game.evaluate(Color::White);
        let result = best_move(
            &mut game,
            SearchConfig {
                max_depth: 0,
                algorithm: SearchAlgorithm::AlphaBeta,
            },
        );
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, expected);
    }

    #[test]
    fn window_entry_points_match_the_root_driver() {
        let mut game = GameState::from_fen(POSITIONS[2]).expect("fen");
        let before = game.clone();
        let mut searcher = Searcher::new(&mut game);
        let plain = searcher.negamax(3);
        let pruned = searcher.negamax_ab(3, -INF, INF);
        let rooted = searcher.best_move(SearchConfig {
            max_depth: 3,
            algorithm: SearchAlgorithm::AlphaBeta,
        });
        assert_eq!(plain, pruned);
        assert_eq!(plain, rooted.score);
        drop(searcher);
        assert_eq!(game, before);
    }

    #[test]
    fn quiescence_wins_the_hanging_queen() {
        // White to move; black queen on d5 is defended by nothing.
        let mut game = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("fen");
        let before = game.clone();
        let mut searcher = Searcher::with_scorer(&mut game, MaterialScorer);
        let stand_pat = MaterialScorer.score(searcher.game_state);
        let score = searcher.quiescence(-INF, INF);
        assert_eq!(stand_pat, -400);
        assert_eq!(score, 500);
        drop(searcher);
        assert_eq!(game, before);
    }

    #[test]
    fn quiescence_respects_a_failing_high_stand_pat() {
        let mut game = GameState::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("fen");
        let mut searcher = Searcher::with_scorer(&mut game, MaterialScorer);
        assert_eq!(searcher.quiescence(-INF, -1_000), -1_000);
    }

    #[test]
    fn default_config_is_depth_four_alpha_beta() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
    }
}
