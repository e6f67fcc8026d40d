//! Piece kinds and colors

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this color moves by
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Zero-based rank on which pawns of this color promote
    pub fn promotion_rank(self) -> i8 {
        match self {
            Color::White => crate::board::BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }

    fn code(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// The closed set of piece kinds in this variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
        }
    }

    fn code(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'p',
        }
    }

    /// Bishop and Queen need every intervening square empty
    pub fn is_sliding(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}

/// Two-character board code: `wK`, `bp`, ...
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.code(), self.kind.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_codes() {
        assert_eq!(Piece::new(PieceKind::King, Color::White).to_string(), "wK");
        assert_eq!(Piece::new(PieceKind::Pawn, Color::Black).to_string(), "bp");
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black).to_string(), "bN");
    }

    #[test]
    fn test_pawn_direction() {
        assert_eq!(Color::White.forward(), 1);
        assert_eq!(Color::Black.forward(), -1);
        assert_eq!(Color::White.promotion_rank(), 4);
        assert_eq!(Color::Black.promotion_rank(), 0);
        assert_eq!(Color::White.opponent(), Color::Black);
    }

    #[test]
    fn test_sliding() {
        assert!(PieceKind::Bishop.is_sliding());
        assert!(PieceKind::Queen.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert!(!PieceKind::King.is_sliding());
    }
}
