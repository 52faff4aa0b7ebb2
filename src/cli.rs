//! Command execution for the `solve` and `move` subcommands.
//!
//! The binary is driven by an HTTP facade: the board arrives on standard
//! input as 8 lines of `o`, `x` and `.`, and the resulting board is written
//! to standard output in the same format. Anything meant for humans goes to
//! the diagnostic stream held by [`Context`], never to the output.
//!
//! A run goes through four stages: read the whole input, parse the board,
//! execute the command, then write the rendered board in a single write. Every
//! error is detected before the write, so a failed run produces no output.
//!
//! ## Example
//!
//! ```
//! use othello_solver::board::Player;
//! use othello_solver::cli::{run, Command, Context};
//!
//! let input = "........\n........\n........\n...ox...\n...xo...\n........\n........\n........\n";
//! let mut output = Vec::new();
//! let mut ctx = Context::new(false, std::io::sink());
//! let command = Command::Move { player: Player::X, x: 2, y: 3 };
//! run(&command, input.as_bytes(), &mut output, &mut ctx).unwrap();
//! assert!(String::from_utf8(output).unwrap().starts_with("........\n........\n...x....\n"));
//! ```

use std::fmt;
use std::io::{self, Read, Write};
use std::time::Instant;

use crate::board::{Board, FormatError, Player};
use crate::position::{MoveError, game_result, play_at};
use crate::search::{SearchConfig, SearchError, SearchResult, Searcher};

/// A fully parsed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for a good move and play it.
    Solve { player: Player, config: SearchConfig },
    /// Play the given move.
    Move { player: Player, x: usize, y: usize },
}

/// Errors that end an invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read board from input")]
    Read(#[source] io::Error),

    #[error("invalid board input")]
    InputFormat(#[from] FormatError),

    #[error("unknown command {0:?} (expected 'solve' or 'move')")]
    UnknownCommand(String),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to write output")]
    Write(#[source] io::Error),
}

impl CliError {
    /// Process exit code: 2 for usage errors, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::UnknownCommand(_) => 2,
            _ => 1,
        }
    }
}

/// Per-invocation state: the diagnostic stream and its verbosity.
///
/// Created at process start and flushed with [`Context::finish`] at exit.
pub struct Context<W: Write> {
    verbose: bool,
    diag: W,
}

impl<W: Write> Context<W> {
    pub fn new(verbose: bool, diag: W) -> Self {
        Self { verbose, diag }
    }

    /// Write a diagnostic line. Diagnostics are best effort.
    pub fn note(&mut self, msg: impl fmt::Display) {
        let _ = writeln!(self.diag, "{msg}");
    }

    /// Write a diagnostic line only in verbose mode.
    pub fn detail(&mut self, msg: impl fmt::Display) {
        if self.verbose {
            self.note(msg);
        }
    }

    /// Flush diagnostics and give back the underlying writer.
    pub fn finish(mut self) -> W {
        let _ = self.diag.flush();
        self.diag
    }
}

/// Read a board from `input`, execute `command`, and write the resulting
/// board to `output`.
pub fn run<R, O, W>(
    command: &Command,
    mut input: R,
    mut output: O,
    ctx: &mut Context<W>,
) -> Result<(), CliError>
where
    R: Read,
    O: Write,
    W: Write,
{
    let board = read_board(&mut input)?;
    let result = execute(command, &board, ctx)?;

    let rendered = format!("{}\n", result.serialize());
    output
        .write_all(rendered.as_bytes())
        .and_then(|()| output.flush())
        .map_err(CliError::Write)
}

/// Read all of `input` and parse it as a board. Trailing blank lines are
/// ignored.
pub fn read_board(input: &mut impl Read) -> Result<Board, CliError> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(CliError::Read)?;
    Ok(Board::parse(text.trim_end())?)
}

/// Execute `command` on `board` and return the board to print.
pub fn execute<W: Write>(
    command: &Command,
    board: &Board,
    ctx: &mut Context<W>,
) -> Result<Board, CliError> {
    match command {
        Command::Move { player, x, y } => play(board, *player, *x, *y, ctx),
        Command::Solve { player, config } => solve(board, *player, config, ctx),
    }
}

fn play<W: Write>(
    board: &Board,
    player: Player,
    x: usize,
    y: usize,
    ctx: &mut Context<W>,
) -> Result<Board, CliError> {
    match play_at(board, player, x, y) {
        Ok(next) => {
            report_game_over(&next, ctx);
            Ok(next)
        }
        Err(MoveError::NoLegalMove { player }) => {
            report_pass(board, player, ctx);
            Ok(*board)
        }
        Err(err) => Err(err.into()),
    }
}

fn solve<W: Write>(
    board: &Board,
    player: Player,
    config: &SearchConfig,
    ctx: &mut Context<W>,
) -> Result<Board, CliError> {
    let searcher = Searcher::new(config.clone())?;
    let start = Instant::now();
    let result = searcher.best_move(board, player);
    let elapsed = start.elapsed();

    match result {
        SearchResult::Best(best) => {
            for c in &best.candidates {
                ctx.detail(format_args!(
                    "move {} value={:.3} playouts={}",
                    c.mv, c.value, c.playouts
                ));
            }
            ctx.detail(format_args!(
                "{player} plays {} ({} playouts in {elapsed:.2?})",
                best.mv,
                best.playouts()
            ));
            report_game_over(&best.board, ctx);
            Ok(best.board)
        }
        SearchResult::NoLegalMove => {
            report_pass(board, player, ctx);
            Ok(*board)
        }
    }
}

fn report_pass<W: Write>(board: &Board, player: Player, ctx: &mut Context<W>) {
    match game_result(board) {
        Some(result) => ctx.note(format_args!("game over: {result}")),
        None => ctx.note(format_args!("{player} has no legal move: pass")),
    }
}

fn report_game_over<W: Write>(board: &Board, ctx: &mut Context<W>) {
    if let Some(result) = game_result(board) {
        ctx.note(format_args!("game over: {result}"));
    }
}
