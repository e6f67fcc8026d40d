//! MINICHESS CLI library
//!
//! The console front end around `minichess-core`:
//! - play: interactive game loop over any line reader
//! - render: board and result text
//! - trace: game trace file writer

pub mod play;
pub mod render;
pub mod trace;

pub use play::{play_game, GameSummary, PlayArgs};
pub use trace::{GameTrace, TraceParams};
