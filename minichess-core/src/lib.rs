//! MINICHESS Core - Rule engine for 5x5 mini chess
//!
//! This crate provides the core game logic for MINICHESS:
//! - Board geometry (5x5 grid, files A-E, ranks 1-5)
//! - Piece kinds and colors
//! - Per-piece move legality with path blocking
//! - Game engine: move application, promotion, draw counters and history
//! - Game configuration

pub mod board;
pub mod pieces;
pub mod rules;
pub mod game;
pub mod error;
pub mod config;

// Re-exports for convenient access
pub use board::{Board, Square, BOARD_SIZE};
pub use pieces::{Color, Piece, PieceKind};
pub use rules::{legal_moves, validate_move};
pub use game::{GameEngine, GameState, GameStatus, MoveOutcome, MoveRecord, Outcome};
pub use error::{MoveError, ParseMoveError, ParseSquareError, SetupError};
pub use config::GameConfig;
