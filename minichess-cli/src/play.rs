//! Play command - two humans alternate moves on one console
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_game(), finish()
//! - Level 3: Console (console + trace output), turn handling
//! - Level 4: formatting utilities (see `render`)

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use minichess_core::board::parse_move;
use minichess_core::{GameConfig, GameEngine, GameStatus, MoveRecord, Outcome};

use crate::render::{move_line, outcome_line, render_board};
use crate::trace::{GameTrace, TraceParams};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args, Clone, Debug)]
pub struct PlayArgs {
    /// Per-move time budget in seconds (recorded in the trace)
    #[arg(long, default_value = "5")]
    pub timeout: u64,

    /// Turn limit before the game is drawn (overrides --config)
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Game configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read moves from a file instead of the console
    #[arg(long, value_name = "FILE")]
    pub moves: Option<PathBuf>,

    /// Directory the game trace is written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub trace_dir: PathBuf,

    /// Do not write a game trace
    #[arg(long)]
    pub no_trace: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// What happened in a game, for the JSON summary
#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub params: TraceParams,
    /// `None` if the players quit before the game ended
    pub outcome: Option<Outcome>,
    /// Accepted half-moves
    pub moves_played: usize,
    pub rejected_moves: usize,
    pub history: Vec<MoveRecord>,
    pub trace_file: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run the play command
///
/// 1. Build the game configuration
/// 2. Play until the game ends or the players quit
/// 3. Write the trace and report
pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args)?;
    let params = TraceParams {
        timeout: args.timeout,
        max_turns: config.max_turns,
    };

    tracing::info!(
        "Starting game: timeout={}s, max_turns={}, quiet_move_limit={}",
        params.timeout,
        config.max_turns,
        config.quiet_move_limit
    );

    let engine = GameEngine::with_config(config)?;
    let mut trace = GameTrace::new(params);
    let stdout = io::stdout();

    let mut summary = match &args.moves {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open moves file: {}", path.display()))?;
            play_game(BufReader::new(file), stdout.lock(), engine, &mut trace)?
        }
        None => play_game(io::stdin().lock(), stdout.lock(), engine, &mut trace)?,
    };

    finish(&mut summary, &trace, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Defaults, then the config file, then explicit flags
fn build_config(args: &PlayArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load game config: {}", path.display()))?,
        None => GameConfig::default(),
    };

    if let Some(max_turns) = args.max_turns {
        anyhow::ensure!(max_turns > 0, "--max-turns must be positive");
        config = config.with_max_turns(max_turns);
    }

    Ok(config)
}

/// Play one game, reading move lines from `input` and echoing to `output`.
///
/// Every line shown to the players except prompts and the welcome banner is
/// also recorded in `trace`.
pub fn play_game<R: BufRead, W: Write>(
    input: R,
    output: W,
    mut engine: GameEngine,
    trace: &mut GameTrace,
) -> Result<GameSummary> {
    let mut console = Console { out: output, trace };
    let mut lines = input.lines();
    let mut rejected_moves = 0;
    let timeout = Duration::from_secs(console.trace.params().timeout);

    console.say("Welcome to Mini Chess! Enter moves as 'B2 B3'. Type 'exit' to quit.")?;
    console.say("\nGame Parameters:")?;
    for line in console.trace.params().lines() {
        console.say(&line)?;
    }
    console.emit("Initial Board:")?;
    console.emit(&render_board(engine.board()))?;

    loop {
        console.emit(&format!("\nTurn {}", engine.turn_number()))?;
        console.emit(&render_board(engine.board()))?;
        console.prompt(&format!("{} to move: ", engine.active_color()))?;

        let started = Instant::now();
        let line = match lines.next() {
            Some(line) => line.context("Failed to read move input")?,
            None => {
                tracing::warn!("Input ended before the game finished");
                console.emit("Game exited by user.")?;
                break;
            }
        };
        if started.elapsed() > timeout {
            tracing::warn!(
                "{} took {:.1}s, over the {}s budget",
                engine.active_color(),
                started.elapsed().as_secs_f32(),
                timeout.as_secs()
            );
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            console.emit("Game exited by user.")?;
            break;
        }

        let submitted = parse_move(line)
            .map_err(|e| e.to_string())
            .and_then(|(from, to)| engine.submit_move(from, to).map_err(|e| e.to_string()));

        let outcome = match submitted {
            Ok(outcome) => outcome,
            Err(reason) => {
                tracing::debug!("Rejected '{}': {}", line, reason);
                rejected_moves += 1;
                console.emit(&format!("Invalid move. {}. Try again.", reason))?;
                continue;
            }
        };

        console.emit(&move_line(&outcome.record))?;
        if let Some(captured) = outcome.captured() {
            console.emit(&format!("Captured {}!", captured))?;
        }
        if outcome.promoted() {
            console.emit(&format!("Pawn promoted to Queen at {}!", outcome.record.to))?;
        }

        if let GameStatus::Terminated(result) = outcome.status {
            console.emit(&outcome_line(result, &outcome.record, engine.config()))?;
            console.emit("Final Board:")?;
            console.emit(&render_board(engine.board()))?;
            break;
        }
    }

    Ok(GameSummary {
        params: console.trace.params(),
        outcome: engine.state().result(),
        moves_played: engine.history().len(),
        rejected_moves,
        history: engine.history().to_vec(),
        trace_file: None,
    })
}

/// Write the trace and print the closing report
fn finish(summary: &mut GameSummary, trace: &GameTrace, args: &PlayArgs) -> Result<()> {
    if !args.no_trace {
        let path = trace.write_to(&args.trace_dir)?;
        println!("\nGame Trace generated: {}", path.display());
        summary.trace_file = Some(path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - CONSOLE
// ============================================================================

/// Console output that is mirrored into the trace
struct Console<'a, W: Write> {
    out: W,
    trace: &'a mut GameTrace,
}

impl<W: Write> Console<'_, W> {
    /// Console and trace
    fn emit(&mut self, text: &str) -> io::Result<()> {
        self.trace.record(text);
        writeln!(self.out, "{}", text)
    }

    /// Console only
    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }
}
