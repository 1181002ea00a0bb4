//! Chess - command-line front end for the rules engine.
//!
//! Plays games interactively on stdin, replays TOML move scripts and runs
//! perft counts. Logs go to stderr; `-v` raises the level.

mod repl;
mod script;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chess_engine::{perft, perft_divide, Board, Game};
use clap::{ArgAction, Parser, Subcommand};
use script::Script;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Two-player chess rules engine")]
struct Cli {
    /// Print game states as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short opening and print the result
    Demo,
    /// Play a game interactively on stdin
    Play,
    /// Replay the moves listed in a TOML script
    Replay {
        /// Path to the script file
        script: PathBuf,
    },
    /// Count leaf nodes of the move tree
    Perft {
        /// Search depth in plies
        #[arg(short, long, default_value = "3")]
        depth: u32,
        /// Starting position (piece placement and side to move)
        #[arg(long)]
        fen: Option<String>,
        /// Break the count down by first move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Demo => demo(cli.json),
        Commands::Play => {
            let stdin = io::stdin();
            let game = repl::run(stdin.lock(), io::stdout())?;
            tracing::info!(plies = game.ply_count(), status = %game.status(), "session ended");
            Ok(())
        }
        Commands::Replay { script } => replay(&script, cli.json),
        Commands::Perft { depth, fen, divide } => run_perft(depth, fen.as_deref(), divide),
    }
}

fn demo(json: bool) -> anyhow::Result<()> {
    let mut game = Game::new();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
        game.make_move(from, to)?;
    }
    report(&game, json)
}

fn replay(path: &Path, json: bool) -> anyhow::Result<()> {
    let script = Script::load(path).with_context(|| format!("loading {}", path.display()))?;
    let replay = script.replay()?;
    report(&replay.game, json)?;
    if let Some((index, error)) = replay.rejected {
        anyhow::bail!("move {} rejected: {}", index + 1, error);
    }
    Ok(())
}

fn run_perft(depth: u32, fen: Option<&str>, divide: bool) -> anyhow::Result<()> {
    let game = match fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };
    let board: &Board = game.board();
    let side = game.current_player();

    if divide {
        let breakdown = perft_divide(board, side, depth);
        let mut total = 0;
        for (mv, nodes) in &breakdown {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nNodes searched: {total}");
    } else {
        let start = std::time::Instant::now();
        let nodes = perft(board, side, depth);
        tracing::info!(depth, nodes, elapsed = ?start.elapsed(), "perft finished");
        println!("{nodes}");
    }
    Ok(())
}

fn report(game: &Game, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&game.state())?);
        return Ok(());
    }
    println!("{}", game.board());
    println!("{}", game.history_string());
    println!("status: {}", game.status());
    println!("to move: {}", game.current_player());
    Ok(())
}
