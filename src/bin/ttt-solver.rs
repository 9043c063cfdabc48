//! ttt-solver - one-shot position analysis from the command line
//!
//! Boards are given as 9 row-major cells, e.g. `XX.OO....` or `XX./OO./...`.
//! Results are printed as JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use ttt_solver::{Board, Minimax, Move, Outcome, Player, SearchConfig};

#[derive(Parser)]
#[command(name = "ttt-solver")]
#[command(version, about = "Exhaustive minimax solver for Tic-Tac-Toe", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the optimal move for the side to move
    BestMove(BestMoveArgs),

    /// Show whose turn it is, the game status and the legal moves
    Status {
        /// Board in 9-cell row-major form
        board: String,
    },
}

#[derive(Args)]
struct BestMoveArgs {
    /// Board in 9-cell row-major form
    board: String,

    /// JSON search configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the tie-break between equally good moves
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate root moves in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Serialize)]
struct StatusReport {
    board: Board,
    to_move: Player,
    status: Outcome,
    legal_moves: Vec<Move>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_board(input: &str) -> Result<Board> {
    Board::from_string(input).with_context(|| format!("invalid board '{input}'"))
}

fn best_move(args: BestMoveArgs) -> Result<()> {
    let board = parse_board(&args.board)?;

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_json_file(path)?,
        None => SearchConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.parallel {
        config.parallel = true;
    }

    let mut searcher = Minimax::from_config(config);
    let report = searcher.analyze(&board)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn status(input: &str) -> Result<()> {
    let board = parse_board(input)?;
    let report = StatusReport {
        board,
        to_move: board.whose_turn(),
        status: board.status(),
        legal_moves: board.legal_moves(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::BestMove(args) => best_move(args),
        Commands::Status { board } => status(&board),
    }
}
