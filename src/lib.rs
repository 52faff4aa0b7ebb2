//! othello-solver: a bitboard Othello engine.
//!
//! This crate provides Othello move generation, a static evaluator and a
//! playout-based move search, together with the stdin/stdout command layer
//! used by the `othello-solver` binary.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, evaluation weights and search defaults
//! - [`board`] - Board, player and move types, and the text encoding
//! - [`position`] - Rules: legal moves, move application, game result
//! - [`evaluate`] - Static evaluation
//! - [`playout`] - Random game simulation for position evaluation
//! - [`search`] - Budgeted best-move search
//! - [`cli`] - `solve` and `move` command execution
//!
//! ## Example
//!
//! ```
//! use othello_solver::board::{Board, Player};
//! use othello_solver::position::legal_moves;
//! use othello_solver::search::{SearchConfig, SearchResult, Searcher};
//!
//! let board = Board::initial();
//! assert_eq!(legal_moves(&board, Player::X).len(), 4);
//!
//! let searcher = Searcher::new(SearchConfig { num_try: 100, ..SearchConfig::default() }).unwrap();
//! if let SearchResult::Best(best) = searcher.best_move(&board, Player::X) {
//!     println!("Best move: {}", best.mv);
//!     println!("{}", best.board);
//! }
//! ```

pub mod board;
pub mod cli;
pub mod constants;
pub mod evaluate;
pub mod playout;
pub mod position;
pub mod search;
