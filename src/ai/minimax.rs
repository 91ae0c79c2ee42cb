//! Depth-limited minimax with alpha-beta pruning.
//!
//! The engine always searches for one side (`me`), which is the maximizing
//! player. Each trial move is made on an independent copy of the board, so
//! the caller's board is never touched.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use super::agent::Agent;
use super::heuristic::{Heuristic, HeuristicWeights, Score};
use crate::game::{Board, GameState, Piece};

pub const DEFAULT_DEPTH: u32 = 5;
/// Value of a decided game; larger than any heuristic score.
pub const DEFAULT_TERMINAL_SCORE: Score = 10_000_000;
/// Initial alpha-beta bound.
pub const INFINITY: Score = Score::MAX;

/// Whose heuristic score a depth-exhausted leaf receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafPerspective {
    /// Always score for the searching side.
    #[default]
    Searcher,
    /// Score for the side the node belongs to: the searching side at
    /// maximizing leaves, the opponent at minimizing leaves.
    SideToMove,
}

/// Search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    pub terminal_score: Score,
    pub leaf_perspective: LeafPerspective,
    pub weights: HeuristicWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            terminal_score: DEFAULT_TERMINAL_SCORE,
            leaf_perspective: LeafPerspective::default(),
            weights: HeuristicWeights::default(),
        }
    }
}

/// Column chosen at a node and its minimax value. Leaves carry no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub value: Score,
}

impl SearchResult {
    fn leaf(value: Score) -> Self {
        SearchResult {
            column: None,
            value,
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub heuristic_leaves: u64,
    pub terminal_leaves: u64,
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Minimax search engine, generic over the leaf heuristic.
#[derive(Debug, Clone)]
pub struct SearchEngine<H = HeuristicWeights> {
    config: SearchConfig,
    heuristic: H,
}

impl SearchEngine<HeuristicWeights> {
    pub fn new(config: SearchConfig) -> Self {
        let heuristic = config.weights;
        SearchEngine { config, heuristic }
    }
}

impl Default for SearchEngine<HeuristicWeights> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<H: Heuristic> SearchEngine<H> {
    /// Use a custom heuristic; `config.weights` is ignored.
    pub fn with_heuristic(config: SearchConfig, heuristic: H) -> Self {
        SearchEngine { config, heuristic }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best column for `me` at the configured depth
    pub fn best_move(&self, board: &Board, me: Piece) -> Option<usize> {
        self.choose_move(board, me, self.config.depth)
    }

    /// Best column for `me` searching `depth` plies.
    ///
    /// Returns `None` only when the board is already decided or full.
    pub fn choose_move(&self, board: &Board, me: Piece, depth: u32) -> Option<usize> {
        self.search(board, me, depth).result.column
    }

    /// Top-level alpha-beta search with statistics
    pub fn search(&self, board: &Board, me: Piece, depth: u32) -> SearchOutcome {
        let _span = debug_span!("search", piece = me.name(), depth).entered();
        let start = Instant::now();

        let mut search = Search::new(self, me, true);
        let result = search.node(board, depth, -INFINITY, INFINITY, true);
        let elapsed = start.elapsed();

        debug!(
            column = ?result.column,
            value = result.value,
            nodes = search.stats.nodes,
            cutoffs = search.stats.cutoffs,
            elapsed_us = elapsed.as_micros() as u64,
            "search finished"
        );

        SearchOutcome {
            result,
            stats: search.stats,
            elapsed,
        }
    }

    /// Minimax with alpha-beta pruning from an arbitrary node
    pub fn minimax(
        &self,
        board: &Board,
        me: Piece,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        Search::new(self, me, true).node(board, depth, alpha, beta, maximizing)
    }

    /// Plain minimax: visits every node, no pruning
    pub fn minimax_unpruned(
        &self,
        board: &Board,
        me: Piece,
        depth: u32,
        maximizing: bool,
    ) -> SearchResult {
        Search::new(self, me, false).node(board, depth, -INFINITY, INFINITY, maximizing)
    }

    /// Exact value of a decided board, or `None` if play can continue
    fn terminal_value(&self, board: &Board, me: Piece) -> Option<Score> {
        if board.has_win(me) {
            Some(self.config.terminal_score)
        } else if board.has_win(me.other()) {
            Some(-self.config.terminal_score)
        } else if board.is_full() {
            Some(0)
        } else {
            None
        }
    }

    fn leaf_value(&self, board: &Board, me: Piece, maximizing: bool) -> Score {
        let piece = match self.config.leaf_perspective {
            LeafPerspective::Searcher => me,
            LeafPerspective::SideToMove if maximizing => me,
            LeafPerspective::SideToMove => me.other(),
        };
        self.heuristic.score_position(board, piece)
    }
}

/// State for one recursive search.
struct Search<'e, H> {
    engine: &'e SearchEngine<H>,
    me: Piece,
    prune: bool,
    stats: SearchStats,
}

impl<'e, H: Heuristic> Search<'e, H> {
    fn new(engine: &'e SearchEngine<H>, me: Piece, prune: bool) -> Self {
        Search {
            engine,
            me,
            prune,
            stats: SearchStats::default(),
        }
    }

    fn node(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> SearchResult {
        self.stats.nodes += 1;

        if let Some(value) = self.engine.terminal_value(board, self.me) {
            self.stats.terminal_leaves += 1;
            return SearchResult::leaf(value);
        }
        if depth == 0 {
            self.stats.heuristic_leaves += 1;
            return SearchResult::leaf(self.engine.leaf_value(board, self.me, maximizing));
        }

        let mover = if maximizing { self.me } else { self.me.other() };
        // Lowest playable column stands until some child improves on it
        let mut best = SearchResult {
            column: board.playable_columns().next(),
            value: if maximizing { -INFINITY } else { INFINITY },
        };

        for col in board.playable_columns() {
            let mut child = board.clone_for_lookahead();
            if child.drop_piece(col, mover).is_err() {
                continue;
            }
            let value = self.node(&child, depth - 1, alpha, beta, !maximizing).value;

            if maximizing {
                if value > best.value {
                    best = SearchResult {
                        column: Some(col),
                        value,
                    };
                }
                alpha = alpha.max(value);
            } else {
                if value < best.value {
                    best = SearchResult {
                        column: Some(col),
                        value,
                    };
                }
                beta = beta.min(value);
            }

            if self.prune && alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }
}

/// Agent backed by the alpha-beta search engine.
pub struct MinimaxAgent {
    engine: SearchEngine,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        MinimaxAgent {
            engine: SearchEngine::new(config),
        }
    }

    pub fn depth(&self) -> u32 {
        self.engine.config().depth
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> Option<usize> {
        if state.is_terminal() {
            return None;
        }
        let outcome = self
            .engine
            .search(state.board(), state.current_player(), self.depth());
        debug!(
            piece = state.current_player().name(),
            column = ?outcome.result.column,
            nodes = outcome.stats.nodes,
            "minimax agent moved"
        );
        outcome.result.column
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::GameOutcome;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const WIN: Score = DEFAULT_TERMINAL_SCORE;

    fn board_with(pieces: &[(usize, Piece)]) -> Board {
        let mut board = Board::new();
        for &(col, piece) in pieces {
            board.drop_piece(col, piece).unwrap();
        }
        board
    }

    /// Full board with no four-in-a-row for either side
    fn drawn_board() -> Board {
        let mut state = GameState::initial();
        let moves = [
            0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1, //
            2, 3, 2, 3, 3, 2, 3, 2, 2, 3, 2, 3, //
            4, 5, 4, 5, 5, 4, 5, 4, 4, 5, 4, 5, //
            6, 6, 6, 6, 6, 6,
        ];
        for col in moves {
            state.apply_move_mut(col).unwrap();
        }
        state.board().clone()
    }

    /// Seeded mid-game positions where nobody has won yet
    fn random_positions(seed: u64, count: usize, plies: usize) -> Vec<Board> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut boards = Vec::new();
        while boards.len() < count {
            let mut state = GameState::initial();
            for _ in 0..plies {
                let legal = state.legal_actions();
                if legal.is_empty() {
                    break;
                }
                let col = legal[rng.random_range(0..legal.len())];
                state.apply_move_mut(col).unwrap();
            }
            if !state.is_terminal() {
                boards.push(state.board().clone());
            }
        }
        boards
    }

    fn engine() -> SearchEngine {
        SearchEngine::default()
    }

    fn side_to_move_engine() -> SearchEngine {
        SearchEngine::new(SearchConfig {
            leaf_perspective: LeafPerspective::SideToMove,
            ..SearchConfig::default()
        })
    }

    // --- End-to-end move choice ---

    #[test]
    fn depth_one_on_empty_board_picks_center() {
        let engine = engine();
        let board = Board::new();
        assert_eq!(engine.choose_move(&board, Piece::Yellow, 1), Some(3));
        assert_eq!(engine.choose_move(&board, Piece::Red, 1), Some(3));
    }

    #[test]
    fn takes_winning_move_at_any_depth() {
        // Red: bottom row cols 0-2. Yellow stacked on top.
        let board = board_with(&[
            (0, Piece::Red),
            (0, Piece::Yellow),
            (1, Piece::Red),
            (1, Piece::Yellow),
            (2, Piece::Red),
            (2, Piece::Yellow),
        ]);
        let engine = engine();
        for depth in 1..=5 {
            let outcome = engine.search(&board, Piece::Red, depth);
            assert_eq!(outcome.result.column, Some(3), "depth {depth}");
            assert_eq!(outcome.result.value, WIN, "depth {depth}");
        }
    }

    #[test]
    fn blocks_open_three_at_any_depth() {
        // Red threatens (0, 3); Yellow holds (0, 5), (0, 6), (1, 6)
        let board = board_with(&[
            (6, Piece::Yellow),
            (0, Piece::Red),
            (6, Piece::Yellow),
            (1, Piece::Red),
            (5, Piece::Yellow),
            (2, Piece::Red),
        ]);
        let engine = engine();
        for depth in 1..=5 {
            assert_eq!(
                engine.choose_move(&board, Piece::Yellow, depth),
                Some(3),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn prefers_win_over_block() {
        // Red threatens (3, 0) vertically; Yellow can complete the bottom row
        // at column 2 or 6.
        let board = board_with(&[
            (0, Piece::Red),
            (3, Piece::Yellow),
            (0, Piece::Red),
            (4, Piece::Yellow),
            (0, Piece::Red),
            (5, Piece::Yellow),
        ]);
        let engine = engine();
        for depth in 1..=2 {
            let result = engine.search(&board, Piece::Yellow, depth).result;
            assert_eq!(result.column, Some(2), "depth {depth}");
            assert_eq!(result.value, WIN);
        }
        // Deeper searches also see slower forced wins, which score the same
        for depth in 3..=4 {
            assert_eq!(engine.search(&board, Piece::Yellow, depth).result.value, WIN);
        }
    }

    #[test]
    fn lost_position_falls_back_to_lowest_column() {
        // Red's bottom row 1-3 is open at both ends
        let board = board_with(&[
            (1, Piece::Red),
            (1, Piece::Yellow),
            (2, Piece::Red),
            (6, Piece::Yellow),
            (3, Piece::Red),
        ]);
        let engine = engine();
        let result = engine.search(&board, Piece::Yellow, 2).result;
        assert_eq!(result.column, Some(0));
        assert_eq!(result.value, -WIN);
    }

    #[test]
    fn no_move_on_decided_or_full_board() {
        let engine = engine();
        assert_eq!(engine.choose_move(&drawn_board(), Piece::Red, 3), None);

        let won = board_with(&[
            (4, Piece::Red),
            (4, Piece::Red),
            (4, Piece::Red),
            (4, Piece::Red),
        ]);
        assert_eq!(engine.choose_move(&won, Piece::Yellow, 3), None);
    }

    // --- Terminal scoring ---

    #[test]
    fn terminal_scores_ignore_remaining_depth() {
        let engine = engine();
        let yellow_won = board_with(&[
            (2, Piece::Yellow),
            (2, Piece::Yellow),
            (2, Piece::Yellow),
            (2, Piece::Yellow),
        ]);
        let drawn = drawn_board();

        for depth in 0..=5 {
            for maximizing in [true, false] {
                let win = engine.minimax(&yellow_won, Piece::Yellow, depth, -INFINITY, INFINITY, maximizing);
                assert_eq!(win, SearchResult { column: None, value: WIN });

                let loss = engine.minimax(&yellow_won, Piece::Red, depth, -INFINITY, INFINITY, maximizing);
                assert_eq!(loss, SearchResult { column: None, value: -WIN });

                let draw = engine.minimax(&drawn, Piece::Red, depth, -INFINITY, INFINITY, maximizing);
                assert_eq!(draw, SearchResult { column: None, value: 0 });
            }
        }
    }

    #[test]
    fn terminal_score_is_configurable() {
        let engine = SearchEngine::new(SearchConfig {
            terminal_score: 1_000,
            ..SearchConfig::default()
        });
        let board = board_with(&[
            (0, Piece::Red),
            (1, Piece::Red),
            (2, Piece::Red),
        ]);
        let result = engine.search(&board, Piece::Red, 1).result;
        assert_eq!(result, SearchResult { column: Some(3), value: 1_000 });
    }

    // --- Leaf perspective ---

    #[test]
    fn leaf_perspective_selects_scored_side() {
        // Red open three: +7 for Red, -4 for Yellow
        let board = board_with(&[
            (0, Piece::Red),
            (1, Piece::Red),
            (2, Piece::Red),
        ]);

        let searcher = engine();
        assert_eq!(searcher.minimax(&board, Piece::Yellow, 0, -INFINITY, INFINITY, true).value, -4);
        assert_eq!(searcher.minimax(&board, Piece::Yellow, 0, -INFINITY, INFINITY, false).value, -4);

        let side_to_move = side_to_move_engine();
        assert_eq!(side_to_move.minimax(&board, Piece::Yellow, 0, -INFINITY, INFINITY, true).value, -4);
        assert_eq!(side_to_move.minimax(&board, Piece::Yellow, 0, -INFINITY, INFINITY, false).value, 7);
    }

    // --- Pruning ---

    #[test]
    fn alpha_beta_matches_plain_minimax() {
        let mut boards = vec![
            Board::new(),
            board_with(&[(3, Piece::Red), (3, Piece::Yellow), (2, Piece::Red)]),
            board_with(&[
                (6, Piece::Yellow),
                (0, Piece::Red),
                (6, Piece::Yellow),
                (1, Piece::Red),
                (5, Piece::Yellow),
                (2, Piece::Red),
            ]),
        ];
        boards.extend(random_positions(11, 5, 12));

        for engine in [engine(), side_to_move_engine()] {
            for board in &boards {
                for me in [Piece::Red, Piece::Yellow] {
                    for depth in 1..=4 {
                        let pruned = engine.minimax(board, me, depth, -INFINITY, INFINITY, true);
                        let plain = engine.minimax_unpruned(board, me, depth, true);
                        assert_eq!(pruned, plain, "depth {depth}, {me:?} on\n{board}");
                    }
                }
            }
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let engine = engine();
        let board = Board::new();
        let pruned = engine.search(&board, Piece::Red, 4);

        let mut plain = Search::new(&engine, Piece::Red, false);
        plain.node(&board, 4, -INFINITY, INFINITY, true);

        assert!(pruned.stats.cutoffs > 0);
        assert_eq!(plain.stats.cutoffs, 0);
        assert_eq!(plain.stats.nodes, 1 + 7 + 49 + 343 + 2401);
        assert!(pruned.stats.nodes < plain.stats.nodes);
    }

    // --- Symmetry ---

    #[test]
    fn empty_board_search_is_piece_symmetric() {
        let engine = engine();
        let board = Board::new();
        for depth in 1..=5 {
            let red = engine.search(&board, Piece::Red, depth).result;
            let yellow = engine.search(&board, Piece::Yellow, depth).result;
            assert_eq!(red, yellow, "depth {depth}");
            assert_eq!(red.column, Some(3), "depth {depth}");
        }
    }

    #[test]
    fn mirrored_board_mirrors_forced_block() {
        // Red threatens column 1 vertically
        let board = board_with(&[
            (1, Piece::Red),
            (3, Piece::Yellow),
            (1, Piece::Red),
            (4, Piece::Yellow),
            (1, Piece::Red),
        ]);
        let mirrored = board.mirrored();
        let engine = engine();
        for depth in 2..=4 {
            let left = engine.search(&board, Piece::Yellow, depth).result;
            let right = engine.search(&mirrored, Piece::Yellow, depth).result;
            assert_eq!(left.column, Some(1), "depth {depth}");
            assert_eq!(right.column, Some(5), "depth {depth}");
            assert_eq!(left.value, right.value);
        }
    }

    #[test]
    fn mirrored_positions_have_equal_values() {
        let engine = engine();
        for board in random_positions(5, 6, 10) {
            let mirrored = board.mirrored();
            for me in [Piece::Red, Piece::Yellow] {
                let a = engine.search(&board, me, 3).result.value;
                let b = engine.search(&mirrored, me, 3).result.value;
                assert_eq!(a, b, "\n{board}");
            }
        }
    }

    #[test]
    fn search_does_not_mutate_board() {
        let board = board_with(&[(3, Piece::Red), (4, Piece::Yellow)]);
        let before = board.clone();
        engine().search(&board, Piece::Red, 4);
        assert_eq!(board, before);
    }

    #[test]
    fn custom_heuristic_is_used() {
        struct PreferRight;
        impl Heuristic for PreferRight {
            fn score_position(&self, board: &Board, piece: Piece) -> Score {
                let cell = crate::game::Cell::from(piece);
                (0..board.cols())
                    .filter(|&col| board.get(0, col) == cell)
                    .map(|col| col as Score)
                    .sum()
            }
        }

        let engine = SearchEngine::with_heuristic(SearchConfig::default(), PreferRight);
        assert_eq!(engine.choose_move(&Board::new(), Piece::Red, 1), Some(6));
    }

    // --- Agent ---

    fn play(red: &mut dyn Agent, yellow: &mut dyn Agent) -> GameState {
        let mut state = GameState::initial();
        while !state.is_terminal() {
            let action = match state.current_player() {
                Piece::Red => red.select_action(&state),
                Piece::Yellow => yellow.select_action(&state),
            };
            state.apply_move_mut(action.unwrap()).unwrap();
        }
        state
    }

    #[test]
    fn agent_plays_for_side_to_move() {
        let mut agent = MinimaxAgent::new(SearchConfig {
            depth: 3,
            ..SearchConfig::default()
        });
        assert_eq!(agent.name(), "Minimax");
        assert_eq!(agent.depth(), 3);

        let mut state = GameState::initial();
        for col in [0, 6, 1, 6, 2] {
            state.apply_move_mut(col).unwrap();
        }
        // Yellow to move must block the bottom row
        assert_eq!(agent.select_action(&state), Some(3));
    }

    #[test]
    fn full_game_vs_self_completes() {
        let config = SearchConfig {
            depth: 3,
            ..SearchConfig::default()
        };
        let mut red = MinimaxAgent::new(config.clone());
        let mut yellow = MinimaxAgent::new(config);
        let state = play(&mut red, &mut yellow);
        assert!(state.outcome().is_some());
        assert_eq!(red.select_action(&state), None);
    }

    #[test]
    fn beats_random_agent() {
        let config = SearchConfig {
            depth: 3,
            ..SearchConfig::default()
        };
        let games_per_color = 10;
        let mut wins = 0;

        for seed in 0..games_per_color {
            let mut minimax = MinimaxAgent::new(config.clone());
            let mut random = RandomAgent::with_seed(seed);
            let state = play(&mut minimax, &mut random);
            if state.outcome() == Some(GameOutcome::Winner(Piece::Red)) {
                wins += 1;
            }

            let mut random = RandomAgent::with_seed(seed + 100);
            let state = play(&mut random, &mut minimax);
            if state.outcome() == Some(GameOutcome::Winner(Piece::Yellow)) {
                wins += 1;
            }
        }

        let total = games_per_color * 2;
        assert!(
            wins * 10 >= total * 9,
            "Minimax should beat random at least 90% of the time, got {wins}/{total}"
        );
    }
}
