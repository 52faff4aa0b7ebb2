//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays weighted random legal moves until the game ends or a depth
//! cutoff is reached, then scores the final board with the static evaluator.
//! Corners are favoured and squares next to a corner avoided, which keeps the
//! simulated games closer to reasonable play than a uniform choice.

use fastrand::Rng;

use crate::board::{Board, Move, Player};
use crate::constants::{
    CORNERS, CORNER_NEIGHBORS, PLAYOUT_WEIGHT_CORNER, PLAYOUT_WEIGHT_CORNER_NEIGHBOR,
    PLAYOUT_WEIGHT_OTHER,
};
use crate::evaluate::score;
use crate::position::{move_mask, play_unchecked, squares};

/// Relative probability of a playout choosing square `sq`.
#[inline]
fn square_weight(sq: usize) -> u32 {
    let bit = 1u64 << sq;
    if CORNERS & bit != 0 {
        PLAYOUT_WEIGHT_CORNER
    } else if CORNER_NEIGHBORS & bit != 0 {
        PLAYOUT_WEIGHT_CORNER_NEIGHBOR
    } else {
        PLAYOUT_WEIGHT_OTHER
    }
}

/// Pick one square of a non-empty move mask, weighted by [`square_weight`].
fn choose_weighted(mask: u64, rng: &mut Rng) -> Move {
    debug_assert!(mask != 0);
    let total: u32 = squares(mask).map(square_weight).sum();
    let mut r = rng.u32(0..total);
    for sq in squares(mask) {
        let w = square_weight(sq);
        if r < w {
            return Move::from_square(sq);
        }
        r -= w;
    }
    unreachable!("weighted choice ran past the total weight")
}

/// Perform a playout from `board` with `to_move` to play.
///
/// Plays until neither side can move or `max_depth` moves have been made
/// (passes do not count). Returns the evaluator's score of the last board
/// from `perspective`'s point of view.
pub fn playout(
    board: &Board,
    to_move: Player,
    perspective: Player,
    max_depth: Option<usize>,
    rng: &mut Rng,
) -> i32 {
    // Every move fills a square, so the game cannot outlast the empty squares.
    let limit = max_depth.unwrap_or(board.vacant().count_ones() as usize);
    let mut board = *board;
    let mut player = to_move;
    let mut plies = 0;
    let mut passed = false;

    while plies < limit {
        let mask = move_mask(&board, player);
        if mask == 0 {
            if passed {
                break;
            }
            passed = true;
        } else {
            passed = false;
            let mv = choose_weighted(mask, rng);
            board = play_unchecked(&board, player, mv);
            plies += 1;
        }
        player = player.opponent();
    }

    score(&board, perspective)
}
