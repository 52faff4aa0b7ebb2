//! Board geometry, heuristic weights, and search defaults.
//!
//! Squares are numbered row-major: square `x * 8 + y` holds the cell at row
//! `x`, column `y`, so bit 0 is the top-left corner and bit 63 the
//! bottom-right one.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Othello is always played on 8x8.
pub const N: usize = 8;

/// Number of squares on the board.
pub const CELLS: usize = N * N;

/// Row separator used by the stdin/stdout wire format.
pub const LINE_SEPARATOR: char = '\n';

/// Row separator used by the HTTP facade's single-line encoding.
pub const JOINED_SEPARATOR: char = ';';

/// Every square except column 0.
pub const NOT_COL_0: u64 = 0xfefe_fefe_fefe_fefe;

/// Every square except column 7.
pub const NOT_COL_7: u64 = 0x7f7f_7f7f_7f7f_7f7f;

/// The four corners: (0,0), (0,7), (7,0), (7,7).
pub const CORNERS: u64 = 0x8100_0000_0000_0081;

/// Squares orthogonally adjacent to a corner (Manhattan distance 1).
pub const CORNER_NEIGHBORS: u64 = 0x4281_0000_0000_8142;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Weight of each disc of difference.
pub const DISC_WEIGHT: i32 = 1;

/// Weight of each corner held (or conceded, negatively).
pub const CORNER_WEIGHT: i32 = 25;

/// Weight of each legal move of difference.
pub const MOBILITY_WEIGHT: i32 = 5;

/// Score of a finished game won by the evaluated player, before the disc
/// differential is added. Larger than any heuristic value.
pub const WIN_SCORE: i32 = 10_000;

// =============================================================================
// Playout Move Weights
// =============================================================================

/// Relative chance of a playout picking a corner.
pub const PLAYOUT_WEIGHT_CORNER: u32 = 5;

/// Relative chance of a playout picking a square next to a corner.
pub const PLAYOUT_WEIGHT_CORNER_NEIGHBOR: u32 = 1;

/// Relative chance of a playout picking any other square.
pub const PLAYOUT_WEIGHT_OTHER: u32 = 2;

// =============================================================================
// Search Defaults
// =============================================================================

/// Default number of playouts per `solve` invocation.
pub const DEFAULT_NUM_TRY: usize = 200;

/// Default seed for the playout random number generators.
pub const DEFAULT_SEED: u64 = 1;
