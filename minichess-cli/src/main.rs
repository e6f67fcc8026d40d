//! MINICHESS CLI - Two-player 5x5 mini chess on the console
//!
//! Moves are typed as `B2 B3`; `exit` quits. A game trace is written when
//! the game ends.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use minichess_cli::play::{self, PlayArgs};

#[derive(Parser)]
#[command(name = "minichess")]
#[command(about = "Two-player 5x5 mini chess")]
struct Cli {
    #[command(flatten)]
    play: PlayArgs,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    play::run(cli.play)
}
