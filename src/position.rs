//! Othello rules: legal move generation and move execution.
//!
//! All operations work on whole bitboards. A direction is a shift of the
//! bitboard plus a mask that clears the squares which wrapped around from the
//! opposite edge of the board.

use crate::board::{Board, Move, OutOfRange, Player};
use crate::constants::{NOT_COL_0, NOT_COL_7};

/// The eight compass directions as (shift, mask) pairs.
///
/// A positive shift moves towards higher square indices (down or right).
const DIRECTIONS: [(i32, u64); 8] = [
    (1, NOT_COL_0),  // East
    (-1, NOT_COL_7), // West
    (8, !0),         // South
    (-8, !0),        // North
    (9, NOT_COL_0),  // South-east
    (7, NOT_COL_7),  // South-west
    (-7, NOT_COL_0), // North-east
    (-9, NOT_COL_7), // North-west
];

/// Shift every disc of `bb` one step in a direction.
#[inline]
fn shift(bb: u64, (amount, mask): (i32, u64)) -> u64 {
    if amount > 0 {
        (bb << amount) & mask
    } else {
        (bb >> -amount) & mask
    }
}

/// Result of attempting to play a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),

    /// The square is occupied or captures nothing.
    #[error("illegal move {mv} for player {player}")]
    IllegalMove { mv: Move, player: Player },

    /// The player has no legal move anywhere and must pass.
    #[error("player {player} has no legal move and must pass")]
    NoLegalMove { player: Player },
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win { winner: Player, winner_discs: u32, loser_discs: u32 },
    Draw { discs: u32 },
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win { winner, winner_discs, loser_discs } => {
                write!(f, "{winner} wins {winner_discs}-{loser_discs}")
            }
            GameResult::Draw { discs } => write!(f, "draw {discs}-{discs}"),
        }
    }
}

/// Bitboard of the squares where `player` may play.
pub fn move_mask(board: &Board, player: Player) -> u64 {
    let own = board.discs(player);
    let opp = board.discs(player.opponent());
    let empty = board.vacant();

    let mut moves = 0;
    for dir in DIRECTIONS {
        // An opponent run can be at most 6 discs long.
        let mut run = shift(own, dir) & opp;
        for _ in 0..5 {
            run |= shift(run, dir) & opp;
        }
        moves |= shift(run, dir) & empty;
    }
    moves
}

/// All legal moves for `player`, in board-scan order.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    squares(move_mask(board, player)).map(Move::from_square).collect()
}

/// Iterate over the set squares of a bitboard, lowest index first.
pub fn squares(mut bb: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if bb == 0 {
            return None;
        }
        let sq = bb.trailing_zeros() as usize;
        bb &= bb - 1;
        Some(sq)
    })
}

/// Number of legal moves for `player`.
pub fn mobility(board: &Board, player: Player) -> u32 {
    move_mask(board, player).count_ones()
}

pub fn has_legal_move(board: &Board, player: Player) -> bool {
    move_mask(board, player) != 0
}

/// A game is finished when neither player can move.
pub fn is_finished(board: &Board) -> bool {
    !has_legal_move(board, Player::O) && !has_legal_move(board, Player::X)
}

/// Discs that playing `mv` would flip. Zero for an occupied square or a
/// move that brackets nothing.
pub fn flips(board: &Board, player: Player, mv: Move) -> u64 {
    let placed = mv.bit();
    if board.occupied() & placed != 0 {
        return 0;
    }
    let own = board.discs(player);
    let opp = board.discs(player.opponent());

    let mut flipped = 0;
    for dir in DIRECTIONS {
        let mut line = 0;
        let mut cur = shift(placed, dir);
        while cur & opp != 0 {
            line |= cur;
            cur = shift(cur, dir);
        }
        if cur & own != 0 {
            flipped |= line;
        }
    }
    flipped
}

/// Play `mv` for `player`, returning the new board.
///
/// Coordinates are checked when the [`Move`] is built; use [`play_at`] for
/// raw row and column numbers.
///
/// Fails with [`MoveError::NoLegalMove`] when the player has to pass, and with
/// [`MoveError::IllegalMove`] when `mv` captures nothing or is occupied.
pub fn apply_move(board: &Board, player: Player, mv: Move) -> Result<Board, MoveError> {
    let mask = move_mask(board, player);
    if mask == 0 {
        return Err(MoveError::NoLegalMove { player });
    }
    if mask & mv.bit() == 0 {
        return Err(MoveError::IllegalMove { mv, player });
    }
    Ok(play_unchecked(board, player, mv))
}

/// Play the square at row `x`, column `y` for `player`.
///
/// Fails with [`MoveError::OutOfRange`] when the coordinate is off the board,
/// otherwise as [`apply_move`].
pub fn play_at(board: &Board, player: Player, x: usize, y: usize) -> Result<Board, MoveError> {
    apply_move(board, player, Move::new(x, y)?)
}

/// Play a move already known to be legal.
pub(crate) fn play_unchecked(board: &Board, player: Player, mv: Move) -> Board {
    let flipped = flips(board, player, mv);
    debug_assert!(flipped != 0, "move {mv} flips nothing");
    let own = board.discs(player) | flipped | mv.bit();
    let opp = board.discs(player.opponent()) & !flipped;
    match player {
        Player::O => Board::from_bitboards(own, opp),
        Player::X => Board::from_bitboards(opp, own),
    }
}

/// (o, x) disc counts.
pub fn disc_counts(board: &Board) -> (u32, u32) {
    (board.count(Player::O), board.count(Player::X))
}

/// The result of the game, or `None` while either player can still move.
pub fn game_result(board: &Board) -> Option<GameResult> {
    if !is_finished(board) {
        return None;
    }
    let (o, x) = disc_counts(board);
    Some(if o > x {
        GameResult::Win { winner: Player::O, winner_discs: o, loser_discs: x }
    } else if x > o {
        GameResult::Win { winner: Player::X, winner_discs: x, loser_discs: o }
    } else {
        GameResult::Draw { discs: o }
    })
}
