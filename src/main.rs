//! othello-solver: an Othello engine driven over stdin/stdout.
//!
//! ## Usage
//!
//! - `othello-solver solve <o|x> [--num-try N]` - search for a move and print
//!   the board after it
//! - `othello-solver move <o|x> <x> <y>` - play the given move (row `x`,
//!   column `y`) and print the new board
//!
//! The board is read from standard input as 8 lines of `o`, `x` and `.`.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use othello_solver::board::Player;
use othello_solver::cli::{self, CliError, Command, Context};
use othello_solver::constants::{DEFAULT_NUM_TRY, DEFAULT_SEED};
use othello_solver::search::SearchConfig;

/// othello-solver: Othello move search and simulation
#[derive(Parser)]
#[command(name = "othello-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print search statistics to standard error
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a good move and print the board after playing it
    Solve {
        /// Player to move: 'o' or 'x'
        player: Player,
        /// Total number of random playouts
        #[arg(long, default_value_t = DEFAULT_NUM_TRY)]
        num_try: usize,
        /// Seed for the playouts (same seed, same move)
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Worker threads (0 = all cores)
        #[arg(long, default_value_t = 0)]
        threads: usize,
        /// Stop each playout after this many moves
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Play a move and print the resulting board
    Move {
        /// Player to move: 'o' or 'x'
        player: Player,
        /// Row number (0-based)
        x: usize,
        /// Column number (0-based)
        y: usize,
    },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut ctx = Context::new(cli.verbose, io::stderr());

    let result = run(cli.command, &mut ctx);
    ctx.finish();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(command: Commands, ctx: &mut Context<io::Stderr>) -> anyhow::Result<()> {
    let command = match command {
        Commands::Solve {
            player,
            num_try,
            seed,
            threads,
            depth,
        } => Command::Solve {
            player,
            config: SearchConfig {
                num_try,
                seed,
                threads,
                max_depth: depth,
            },
        },
        Commands::Move { player, x, y } => Command::Move { player, x, y },
        Commands::Unknown(args) => {
            let name = args.into_iter().next().unwrap_or_default();
            return Err(CliError::UnknownCommand(name).into());
        }
    };

    cli::run(&command, io::stdin().lock(), io::stdout().lock(), ctx)?;
    Ok(())
}
