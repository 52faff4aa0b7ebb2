//! Budgeted best-move search using Monte Carlo playouts.
//!
//! Every legal root move is tried. The opponent's replies to it are each
//! estimated by averaging playout scores, and the move is valued by its worst
//! reply (the opponent is assumed to answer well). The best-valued move wins;
//! equal values go to the move that comes first in board-scan order.
//!
//! The playout budget (`num_try`) is the total number of playouts for the
//! whole search. It is split evenly over the root moves, and each move's share
//! evenly over its replies. A reply that gets no playouts is valued by the
//! static evaluator instead.
//!
//! Root moves are searched in parallel on a dedicated thread pool. Each
//! (move, reply) pair owns a random number generator derived from the seed and
//! the two squares, so results do not depend on scheduling or thread count.

use fastrand::Rng;
use rayon::prelude::*;

use crate::board::{Board, Move, Player};
use crate::constants::{DEFAULT_NUM_TRY, DEFAULT_SEED};
use crate::evaluate::score;
use crate::playout::playout;
use crate::position::{is_finished, legal_moves, play_unchecked};

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Total number of playouts.
    pub num_try: usize,
    /// Seed for the playout random number generators.
    pub seed: u64,
    /// Worker threads; 0 uses all available cores.
    pub threads: usize,
    /// Maximum moves per playout; `None` plays to the end of the game.
    pub max_depth: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_try: DEFAULT_NUM_TRY,
            seed: DEFAULT_SEED,
            threads: 0,
            max_depth: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("failed to start search threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Statistics for one root move.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    /// Board after the move.
    pub board: Board,
    /// Estimated score for the mover (worst reply).
    pub value: f64,
    /// Playouts spent on this move.
    pub playouts: usize,
}

/// The chosen move.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMove {
    pub mv: Move,
    /// Board after the move.
    pub board: Board,
    pub value: f64,
    /// All root moves in board-scan order.
    pub candidates: Vec<Candidate>,
}

impl BestMove {
    /// Total playouts spent by the search.
    pub fn playouts(&self) -> usize {
        self.candidates.iter().map(|c| c.playouts).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Best(BestMove),
    /// The player to move must pass.
    NoLegalMove,
}

/// A search engine bound to a configuration and a worker pool.
pub struct Searcher {
    config: SearchConfig,
    pool: rayon::ThreadPool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        Ok(Self { config, pool })
    }

    /// Find the best move for `player`.
    pub fn best_move(&self, board: &Board, player: Player) -> SearchResult {
        let moves = legal_moves(board, player);
        if moves.is_empty() {
            return SearchResult::NoLegalMove;
        }

        let budget = self.config.num_try;
        let n = moves.len();
        let candidates: Vec<Candidate> = self.pool.install(|| {
            moves
                .par_iter()
                .enumerate()
                .map(|(i, &mv)| self.evaluate_move(board, player, mv, share(budget, n, i)))
                .collect()
        });

        // Strictly greater only, so ties stay with the earliest move.
        let mut best = 0;
        for (i, c) in candidates.iter().enumerate().skip(1) {
            if c.value > candidates[best].value {
                best = i;
            }
        }

        let chosen = &candidates[best];
        SearchResult::Best(BestMove {
            mv: chosen.mv,
            board: chosen.board,
            value: chosen.value,
            candidates,
        })
    }

    /// Value `mv` by its worst opponent reply, spending at most `budget`
    /// playouts.
    fn evaluate_move(&self, board: &Board, player: Player, mv: Move, budget: usize) -> Candidate {
        let after = play_unchecked(board, player, mv);
        if is_finished(&after) {
            return Candidate {
                mv,
                board: after,
                value: score(&after, player) as f64,
                playouts: 0,
            };
        }

        let opponent = player.opponent();
        let mut replies: Vec<Option<Move>> =
            legal_moves(&after, opponent).into_iter().map(Some).collect();
        if replies.is_empty() {
            // Opponent passes; we move again.
            replies.push(None);
        }

        let m = replies.len();
        let mut value = f64::INFINITY;
        let mut spent = 0;
        for (j, &reply) in replies.iter().enumerate() {
            let next = match reply {
                Some(r) => play_unchecked(&after, opponent, r),
                None => after,
            };
            let tries = share(budget, m, j);
            let estimate = if tries == 0 {
                score(&next, player) as f64
            } else {
                let mut rng = Rng::with_seed(branch_seed(self.config.seed, mv, reply));
                let total: i64 = (0..tries)
                    .map(|_| playout(&next, player, player, self.config.max_depth, &mut rng) as i64)
                    .sum();
                total as f64 / tries as f64
            };
            spent += tries;
            value = value.min(estimate);
        }

        Candidate {
            mv,
            board: after,
            value,
            playouts: spent,
        }
    }
}

/// The `index`-th of `parts` near-equal shares of `total`; earlier shares get
/// the remainder.
fn share(total: usize, parts: usize, index: usize) -> usize {
    total / parts + usize::from(index < total % parts)
}

/// Seed for the generator of one (move, reply) pair.
fn branch_seed(seed: u64, mv: Move, reply: Option<Move>) -> u64 {
    let reply = reply.map_or(64, |r| r.square() as u64);
    let key = ((mv.square() as u64) << 8) | reply;
    splitmix64(seed ^ splitmix64(key))
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
