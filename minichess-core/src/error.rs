//! Move rejection and input parsing errors
//!
//! Display text is the reason shown to the player; callers wrap it as
//! "Invalid move. <reason>. Try again."

use crate::board::Square;
use crate::pieces::{Color, PieceKind};

/// Why a submitted move was rejected. Rejections never change game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Coordinate {0} is out of bounds")]
    OutOfBounds(Square),

    #[error("No piece at the starting square {0}")]
    EmptyOrigin(Square),

    #[error("It's {0}'s turn, but the selected piece is not {0}")]
    NotYourTurn(Color),

    #[error("Cannot move to a square occupied by your own piece")]
    OwnPieceBlocked,

    #[error("Path is blocked at {0}")]
    PathBlocked(Square),

    #[error("Pawn can only move forward one square into an empty space")]
    PawnBlocked,

    #[error("Pawn can only move forward one square, or capture diagonally one square")]
    InvalidPawnMove,

    #[error("{}", invalid_move_reason(.0))]
    InvalidMove(PieceKind),

    #[error("The game is over")]
    GameOver,
}

fn invalid_move_reason(kind: &PieceKind) -> &'static str {
    match *kind {
        PieceKind::King => "King can only move one square in any direction",
        PieceKind::Queen => "Queen must move in a straight line or diagonally",
        PieceKind::Bishop => "Bishop can only move diagonally",
        PieceKind::Knight => {
            "Knight moves in an L-shape (2 squares in one direction and 1 in the other)"
        }
        PieceKind::Pawn => "Invalid pawn move",
    }
}

/// Invalid starting position or game configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("Coordinate {0} is out of bounds")]
    OutOfBounds(Square),

    #[error("Square {0} is placed twice")]
    SquareTaken(Square),

    #[error("{0} has more than one King")]
    ExtraKing(Color),

    #[error("{0} must be positive")]
    ZeroLimit(&'static str),
}

/// Malformed square text
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Malformed square '{0}', expected a letter and a digit like 'B2'")]
pub struct ParseSquareError(pub String);

/// Malformed move line
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("Move format incorrect. Please use the format 'B2 B3'")]
    Format(String),

    #[error(transparent)]
    Square(#[from] ParseSquareError),
}
