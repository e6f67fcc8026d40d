//! 5x5 board geometry and the occupant grid

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MoveError, ParseMoveError, ParseSquareError, SetupError};
use crate::pieces::{Color, Piece, PieceKind};

/// Board width and height
pub const BOARD_SIZE: i8 = 5;

/// Board coordinates, zero-based: file 0 = A, rank 0 = 1
///
/// Off-board coordinates are representable so that callers can hand the
/// engine any parsed pair and get an `OutOfBounds` error back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Check if this square is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.file) && (0..BOARD_SIZE).contains(&self.rank)
    }

    /// Square shifted by (dfile, drank)
    pub fn offset(&self, dfile: i8, drank: i8) -> Square {
        Square::new(self.file + dfile, self.rank + drank)
    }

    /// Chebyshev (king-step) distance between two squares
    pub fn distance_to(&self, other: Square) -> i8 {
        (self.file - other.file).abs().max((self.rank - other.rank).abs())
    }

    /// All 25 squares, rank 1 first, files A to E within a rank
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square::new(file, rank)))
    }

    /// Squares strictly between `self` and `to` along a straight or diagonal line.
    ///
    /// Returns an empty iterator for adjacent squares. The caller must have
    /// checked that the two squares share a line.
    pub fn between(&self, to: Square) -> impl Iterator<Item = Square> {
        let dfile = (to.file - self.file).signum();
        let drank = (to.rank - self.rank).signum();
        let steps = self.distance_to(to);
        let from = *self;
        (1..steps).map(move |i| from.offset(dfile * i, drank * i))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (b'A' + self.file as u8) as char, self.rank + 1)
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parse algebraic notation like `B3` (case-insensitive).
    ///
    /// Any letter/digit pair is accepted; `F3` or `A0` parse to off-board
    /// squares that the engine rejects as out of bounds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseSquareError(s.to_string()));
        }
        let (letter, digit) = (bytes[0].to_ascii_uppercase(), bytes[1]);
        if !letter.is_ascii_uppercase() || !digit.is_ascii_digit() {
            return Err(ParseSquareError(s.to_string()));
        }
        Ok(Square::new((letter - b'A') as i8, (digit - b'0') as i8 - 1))
    }
}

/// Parse a move line of the form `B2 B3` into (origin, destination)
pub fn parse_move(input: &str) -> Result<(Square, Square), ParseMoveError> {
    let mut tokens = input.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(from), Some(to), None) => {
            let from = from.parse::<Square>()?;
            let to = to.parse::<Square>()?;
            Ok((from, to))
        }
        _ => Err(ParseMoveError::Format(input.trim().to_string())),
    }
}

/// Occupant grid, indexed `[rank][file]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Starting position: white on ranks 1-2, black mirrored on ranks 4-5
    pub fn initial() -> Self {
        use PieceKind::*;

        let back_rank = [(1, Knight), (2, Bishop), (3, Queen), (4, King)];
        let pawns = [1, 2];

        let mut board = Self::empty();
        for &(file, kind) in &back_rank {
            board.place(Square::new(file, 0), Piece::new(kind, Color::White));
            board.place(
                Square::new(BOARD_SIZE - 1 - file, BOARD_SIZE - 1),
                Piece::new(kind, Color::Black),
            );
        }
        for &file in &pawns {
            board.place(Square::new(file, 1), Piece::new(Pawn, Color::White));
            board.place(
                Square::new(BOARD_SIZE - 1 - file, BOARD_SIZE - 2),
                Piece::new(Pawn, Color::Black),
            );
        }
        board
    }

    /// Build a board from explicit placements
    ///
    /// Each square may be named once and each color may have at most one King.
    pub fn from_pieces(pieces: &[(Square, Piece)]) -> Result<Self, SetupError> {
        let mut board = Self::empty();
        for &(square, piece) in pieces {
            if !square.is_valid() {
                return Err(SetupError::OutOfBounds(square));
            }
            if board.get(square).is_some() {
                return Err(SetupError::SquareTaken(square));
            }
            if piece.is_king() && board.king_square(piece.color).is_some() {
                return Err(SetupError::ExtraKing(piece.color));
            }
            board.place(square, piece);
        }
        Ok(board)
    }

    /// Get the occupant of a square
    pub fn occupant_at(&self, square: Square) -> Result<Option<Piece>, MoveError> {
        if !square.is_valid() {
            return Err(MoveError::OutOfBounds(square));
        }
        Ok(self.get(square))
    }

    /// Occupant of an on-board square; off-board squares read as empty
    pub(crate) fn get(&self, square: Square) -> Option<Piece> {
        if !square.is_valid() {
            return None;
        }
        self.squares[square.rank as usize][square.file as usize]
    }

    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.rank as usize][square.file as usize] = Some(piece);
    }

    pub(crate) fn clear(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.rank as usize][square.file as usize].take()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(p) if p.color != color)
    }

    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(p) if p.color == color)
    }

    /// Iterate occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Location of the king of `color`, if it is still on the board
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }
}
