//! Move legality per piece kind
//!
//! Validation is a pure function of the board and the side to move. Sliding
//! pieces walk the open interval between origin and destination on every
//! call; with 25 squares there is nothing worth caching.

use crate::board::{Board, Square};
use crate::error::MoveError;
use crate::pieces::{Color, Piece, PieceKind};

/// Check a move for `active` and return the piece it would capture.
///
/// Checks run in a fixed order so the first failing one names the error:
/// origin bounds, destination bounds, empty origin, turn, own-piece destination, then the piece rule.
pub fn validate_move(
    board: &Board,
    active: Color,
    from: Square,
    to: Square,
) -> Result<Option<Piece>, MoveError> {
    let origin = board.occupant_at(from)?;
    let target = board.occupant_at(to)?;
    let piece = origin.ok_or(MoveError::EmptyOrigin(from))?;

    if piece.color != active {
        return Err(MoveError::NotYourTurn(active));
    }
    if board.is_friendly(to, active) {
        return Err(MoveError::OwnPieceBlocked);
    }

    let dfile = to.file - from.file;
    let drank = to.rank - from.rank;

    match piece.kind {
        PieceKind::King => {
            if from.distance_to(to) != 1 {
                return Err(MoveError::InvalidMove(PieceKind::King));
            }
        }
        PieceKind::Knight => {
            if !matches!((dfile.abs(), drank.abs()), (1, 2) | (2, 1)) {
                return Err(MoveError::InvalidMove(PieceKind::Knight));
            }
        }
        PieceKind::Bishop => {
            if !is_diagonal(dfile, drank) {
                return Err(MoveError::InvalidMove(PieceKind::Bishop));
            }
            check_path(board, from, to)?;
        }
        PieceKind::Queen => {
            if !is_diagonal(dfile, drank) && !is_straight(dfile, drank) {
                return Err(MoveError::InvalidMove(PieceKind::Queen));
            }
            check_path(board, from, to)?;
        }
        PieceKind::Pawn => check_pawn(board, piece.color, dfile, drank, to)?,
    }

    Ok(target)
}

fn is_diagonal(dfile: i8, drank: i8) -> bool {
    dfile != 0 && dfile.abs() == drank.abs()
}

fn is_straight(dfile: i8, drank: i8) -> bool {
    (dfile == 0) != (drank == 0)
}

/// Every square strictly between `from` and `to` must be empty, whatever color blocks it
fn check_path(board: &Board, from: Square, to: Square) -> Result<(), MoveError> {
    match from.between(to).find(|&sq| !board.is_empty(sq)) {
        Some(blocker) => Err(MoveError::PathBlocked(blocker)),
        None => Ok(()),
    }
}

fn check_pawn(board: &Board, color: Color, dfile: i8, drank: i8, to: Square) -> Result<(), MoveError> {
    if drank != color.forward() {
        return Err(MoveError::InvalidPawnMove);
    }
    match dfile.abs() {
        // Straight ahead: never captures
        0 if board.is_empty(to) => Ok(()),
        0 => Err(MoveError::PawnBlocked),
        // Diagonal: only as a capture
        1 if board.is_enemy(to, color) => Ok(()),
        _ => Err(MoveError::InvalidPawnMove),
    }
}

/// All legal (origin, destination) pairs for `color`
pub fn legal_moves(board: &Board, color: Color) -> Vec<(Square, Square)> {
    let mut moves = Vec::new();

    for (from, piece) in board.pieces() {
        if piece.color != color {
            continue;
        }
        for to in Square::all() {
            if validate_move(board, color, from, to).is_ok() {
                moves.push((from, to));
            }
        }
    }

    moves
}
