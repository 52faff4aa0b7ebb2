//! Static position evaluation.
//!
//! The score combines disc differential, corner ownership and mobility
//! differential. Finished games are scored as a win, loss or draw so that a
//! decided ending always outweighs any heuristic value.

use crate::board::{Board, Player};
use crate::constants::{CORNERS, CORNER_WEIGHT, DISC_WEIGHT, MOBILITY_WEIGHT, WIN_SCORE};
use crate::position::mobility;

/// Score `board` from `player`'s point of view. Higher is better.
pub fn score(board: &Board, player: Player) -> i32 {
    let opponent = player.opponent();
    let discs = disc_differential(board, player);

    let own_mobility = mobility(board, player) as i32;
    let opp_mobility = mobility(board, opponent) as i32;
    if own_mobility == 0 && opp_mobility == 0 {
        return final_score(discs);
    }

    let corners = (board.discs(player) & CORNERS).count_ones() as i32
        - (board.discs(opponent) & CORNERS).count_ones() as i32;

    DISC_WEIGHT * discs + CORNER_WEIGHT * corners + MOBILITY_WEIGHT * (own_mobility - opp_mobility)
}

fn disc_differential(board: &Board, player: Player) -> i32 {
    board.count(player) as i32 - board.count(player.opponent()) as i32
}

fn final_score(discs: i32) -> i32 {
    match discs.signum() {
        1 => WIN_SCORE + discs,
        -1 => -WIN_SCORE + discs,
        _ => 0,
    }
}
