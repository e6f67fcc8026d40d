//! Game trace file
//!
//! The trace repeats everything shown on the console during the game, after
//! a header with the game parameters. It is written once when the game ends.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Parameters recorded in the trace header and file name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceParams {
    /// Per-move time budget in seconds
    pub timeout: u64,
    pub max_turns: u32,
}

impl TraceParams {
    /// Header lines, without the `Game Parameters:` title
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("    Timeout: {} seconds", self.timeout),
            format!("    Maximum Turns: {}", self.max_turns),
            "    Play Mode: H-H".to_string(),
            "    Search Algorithm: None (Human vs Human)".to_string(),
        ]
    }
}

/// Accumulated trace text
#[derive(Clone, Debug)]
pub struct GameTrace {
    params: TraceParams,
    body: String,
}

impl GameTrace {
    pub fn new(params: TraceParams) -> Self {
        Self {
            params,
            body: String::new(),
        }
    }

    pub fn params(&self) -> TraceParams {
        self.params
    }

    /// Append one line (may itself contain newlines)
    pub fn record(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    /// `gameTrace-<timeout>-<maxTurns>.txt`
    pub fn file_name(&self) -> String {
        format!("gameTrace-{}-{}.txt", self.params.timeout, self.params.max_turns)
    }

    /// Full file contents
    pub fn render(&self) -> String {
        let mut out = String::from("Game Parameters:\n");
        for line in self.params.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("\nGame Trace:\n");
        out.push_str(&self.body);
        out
    }

    /// Write the trace into `dir` and return the file path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create trace directory: {}", dir.display()))?;

        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render())
            .with_context(|| format!("Failed to write game trace: {}", path.display()))?;

        tracing::info!("Saved game trace to {}", path.display());
        Ok(path)
    }
}
