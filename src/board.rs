//! Othello board representation and its text encoding.
//!
//! A [`Board`] is a value type holding one 64-bit bitboard per player. Every
//! move produces a new board, so search branches never share mutable state.
//!
//! The text encoding is the wire contract with the calling facade: 8 rows of
//! 8 characters from `{o, x, .}`, rows separated by a newline (or by `;` in
//! the facade's single-line form).

use std::fmt;
use std::str::FromStr;

use crate::constants::{CELLS, JOINED_SEPARATOR, LINE_SEPARATOR, N};

/// A player (disc color).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    O,
    X,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::O => 'o',
            Player::X => 'x',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Error for a player marker other than `o` or `x`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid player {0:?}: expected 'o' or 'x'")]
pub struct ParsePlayerError(pub String);

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o" => Ok(Player::O),
            "x" => Ok(Player::X),
            other => Err(ParsePlayerError(other.to_string())),
        }
    }
}

/// Contents of a single square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Disc(Player),
}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'o' => Some(Cell::Disc(Player::O)),
            'x' => Some(Cell::Disc(Player::X)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Disc(p) => p.to_char(),
        }
    }
}

/// A coordinate was outside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("coordinate ({x}, {y}) is outside the board (0-{max})", max = N - 1)]
pub struct OutOfRange {
    pub x: usize,
    pub y: usize,
}

/// Board text that is not 8 rows of 8 cells from `{o, x, .}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("expected {expected} rows, found {found}", expected = N)]
    RowCount { found: usize },

    #[error("row {row}: expected {expected} cells, found {found}", expected = N)]
    RowLength { row: usize, found: usize },

    #[error("row {row}, column {col}: invalid cell {ch:?} (expected 'o', 'x' or '.')")]
    InvalidCell { row: usize, col: usize, ch: char },
}

/// A square on the board: `x` is the row, `y` the column, both 0-based.
///
/// Only [`Move::new`] builds a move from coordinates, so every `Move` is on
/// the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    x: usize,
    y: usize,
}

impl Move {
    /// Create a move, checking that it lies on the board.
    pub fn new(x: usize, y: usize) -> Result<Move, OutOfRange> {
        if x >= N || y >= N {
            return Err(OutOfRange { x, y });
        }
        Ok(Move { x, y })
    }

    #[inline]
    pub fn x(self) -> usize {
        self.x
    }

    #[inline]
    pub fn y(self) -> usize {
        self.y
    }

    /// Square index (row-major). Ordering by square is board-scan order.
    #[inline]
    pub fn square(self) -> usize {
        self.x * N + self.y
    }

    #[inline]
    pub(crate) fn from_square(sq: usize) -> Move {
        debug_assert!(sq < CELLS);
        Move { x: sq / N, y: sq % N }
    }

    /// Single-bit bitboard for this square.
    #[inline]
    pub fn bit(self) -> u64 {
        1u64 << self.square()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An 8x8 Othello board.
///
/// Bit `x * 8 + y` of `o` (resp. `x`) is set when the square at row `x`,
/// column `y` holds an `o` (resp. `x`) disc. The two bitboards never overlap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    o: u64,
    x: u64,
}

impl Board {
    /// A board with no discs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard opening position.
    pub fn initial() -> Self {
        let sq = |x: usize, y: usize| 1u64 << (x * N + y);
        Board {
            o: sq(3, 3) | sq(4, 4),
            x: sq(3, 4) | sq(4, 3),
        }
    }

    /// Build a board from raw bitboards.
    ///
    /// In debug builds, panics if the two bitboards overlap.
    pub fn from_bitboards(o: u64, x: u64) -> Self {
        debug_assert!(o & x == 0, "o and x bitboards must not overlap");
        Board { o, x }
    }

    /// Bitboard of `player`'s discs.
    #[inline]
    pub fn discs(&self, player: Player) -> u64 {
        match player {
            Player::O => self.o,
            Player::X => self.x,
        }
    }

    /// Bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> u64 {
        self.o | self.x
    }

    /// Bitboard of all empty squares.
    #[inline]
    pub fn vacant(&self) -> u64 {
        !self.occupied()
    }

    /// Number of discs of `player`.
    pub fn count(&self, player: Player) -> u32 {
        self.discs(player).count_ones()
    }

    /// Total number of discs on the board.
    pub fn disc_count(&self) -> u32 {
        self.occupied().count_ones()
    }

    /// Contents of the square at row `x`, column `y`.
    pub fn at(&self, x: usize, y: usize) -> Result<Cell, OutOfRange> {
        Ok(self.cell(Move::new(x, y)?))
    }

    /// Contents of the square at `mv`.
    #[inline]
    pub fn cell(&self, mv: Move) -> Cell {
        let bit = mv.bit();
        if self.o & bit != 0 {
            Cell::Disc(Player::O)
        } else if self.x & bit != 0 {
            Cell::Disc(Player::X)
        } else {
            Cell::Empty
        }
    }

    /// Parse the newline-separated wire format.
    ///
    /// Surrounding whitespace on each row is ignored, so a trailing newline or
    /// `\r\n` line endings are accepted.
    pub fn parse(text: &str) -> Result<Board, FormatError> {
        Self::parse_rows(text.lines())
    }

    /// Parse the facade's `;`-separated single-line form.
    pub fn from_joined(text: &str) -> Result<Board, FormatError> {
        Self::parse_rows(text.trim().split(JOINED_SEPARATOR))
    }

    fn parse_rows<'a>(rows: impl Iterator<Item = &'a str>) -> Result<Board, FormatError> {
        let rows: Vec<&str> = rows.collect();
        if rows.len() != N {
            return Err(FormatError::RowCount { found: rows.len() });
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let line = line.trim();
            let found = line.chars().count();
            if found != N {
                return Err(FormatError::RowLength { row, found });
            }
            for (col, ch) in line.chars().enumerate() {
                let bit = 1u64 << (row * N + col);
                match Cell::from_char(ch) {
                    Some(Cell::Empty) => {}
                    Some(Cell::Disc(Player::O)) => board.o |= bit,
                    Some(Cell::Disc(Player::X)) => board.x |= bit,
                    None => return Err(FormatError::InvalidCell { row, col, ch }),
                }
            }
        }
        Ok(board)
    }

    /// Serialize to the newline-separated wire format (no trailing newline).
    pub fn serialize(&self) -> String {
        self.rows().join(&LINE_SEPARATOR.to_string())
    }

    /// Serialize to the facade's `;`-separated single-line form.
    pub fn to_joined(&self) -> String {
        self.rows().join(&JOINED_SEPARATOR.to_string())
    }

    fn rows(&self) -> Vec<String> {
        (0..N)
            .map(|x| (0..N).map(|y| self.cell(Move { x, y }).to_char()).collect())
            .collect()
    }
}

impl FromStr for Board {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENING: &str = "........\n\
                           ........\n\
                           ........\n\
                           ...ox...\n\
                           ...xo...\n\
                           ........\n\
                           ........\n\
                           ........";

    #[test]
    fn test_parse_opening() {
        let board = Board::parse(OPENING).unwrap();
        assert_eq!(board, Board::initial());
        assert_eq!(board.at(3, 3), Ok(Cell::Disc(Player::O)));
        assert_eq!(board.at(3, 4), Ok(Cell::Disc(Player::X)));
        assert_eq!(board.at(0, 0), Ok(Cell::Empty));
        assert_eq!(board.disc_count(), 4);
    }

    #[test]
    fn test_serialize_is_inverse_of_parse() {
        let board = Board::parse(OPENING).unwrap();
        assert_eq!(board.serialize(), OPENING);
        assert_eq!(board.to_string(), OPENING);
    }

    #[test]
    fn test_joined_form() {
        let joined = Board::initial().to_joined();
        assert_eq!(
            joined,
            "........;........;........;...ox...;...xo...;........;........;........"
        );
        assert_eq!(Board::from_joined(&joined), Ok(Board::initial()));
    }

    #[test]
    fn test_parse_accepts_trailing_newline_and_crlf() {
        let text = format!("{}\n", OPENING.replace('\n', "\r\n"));
        assert_eq!(Board::parse(&text), Ok(Board::initial()));
    }

    #[test]
    fn test_parse_wrong_row_count() {
        let seven = OPENING.lines().take(7).collect::<Vec<_>>().join("\n");
        assert_eq!(Board::parse(&seven), Err(FormatError::RowCount { found: 7 }));

        let nine = format!("{OPENING}\n........");
        assert_eq!(Board::parse(&nine), Err(FormatError::RowCount { found: 9 }));
    }

    #[test]
    fn test_parse_wrong_row_length() {
        let text = OPENING.replacen("........", ".......", 1);
        assert_eq!(
            Board::parse(&text),
            Err(FormatError::RowLength { row: 0, found: 7 })
        );
    }

    #[test]
    fn test_parse_invalid_cell() {
        let text = OPENING.replacen("...ox...", "...oX...", 1);
        assert_eq!(
            Board::parse(&text),
            Err(FormatError::InvalidCell { row: 3, col: 4, ch: 'X' })
        );
    }

    #[test]
    fn test_at_out_of_range() {
        let board = Board::initial();
        assert_eq!(board.at(8, 0), Err(OutOfRange { x: 8, y: 0 }));
        assert_eq!(board.at(0, 8), Err(OutOfRange { x: 0, y: 8 }));
    }

    #[test]
    fn test_player_parse() {
        assert_eq!("o".parse::<Player>(), Ok(Player::O));
        assert_eq!("x".parse::<Player>(), Ok(Player::X));
        assert!("O".parse::<Player>().is_err());
        assert!("".parse::<Player>().is_err());
        assert_eq!(Player::O.opponent(), Player::X);
        assert_eq!(Player::X.opponent(), Player::O);
    }

    #[test]
    fn test_move_square_order() {
        let mv = Move::new(2, 5).unwrap();
        assert_eq!(mv.square(), 21);
        assert_eq!(Move::from_square(21), mv);
        assert!(Move::new(0, 7).unwrap() < Move::new(1, 0).unwrap());
        assert_eq!(Move::new(7, 8), Err(OutOfRange { x: 7, y: 8 }));
    }

    #[test]
    fn test_moves_stay_on_the_board() {
        assert_eq!(Move::new(8, 0), Err(OutOfRange { x: 8, y: 0 }));
        assert_eq!(Move::new(9, 0), Err(OutOfRange { x: 9, y: 0 }));
        assert_eq!(Move::new(usize::MAX, 0), Err(OutOfRange { x: usize::MAX, y: 0 }));

        let corner = Move::new(7, 7).unwrap();
        assert_eq!((corner.x(), corner.y()), (7, 7));
        assert_eq!(corner.bit(), 1 << 63);
        assert_eq!(Board::initial().cell(corner), Cell::Empty);
    }
}
