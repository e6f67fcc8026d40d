//! Game state, move application and the termination state machine

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square};
use crate::config::GameConfig;
use crate::error::{MoveError, SetupError};
use crate::pieces::{Color, Piece, PieceKind};
use crate::rules::{legal_moves, validate_move};

// ============================================================================
// CORE TYPES
// ============================================================================

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    DrawNoCaptures,
    DrawMaxTurns,
}

impl Outcome {
    /// Outcome for the side that captured the enemy king
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::White => Outcome::WhiteWins,
            Color::Black => Outcome::BlackWins,
        }
    }

    /// The winning side, if any
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::WhiteWins => Some(Color::White),
            Outcome::BlackWins => Some(Color::Black),
            Outcome::DrawNoCaptures | Outcome::DrawMaxTurns => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

/// Game status after a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Terminated(Outcome),
}

/// One accepted move, as logged in the history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number the move was played on (first move is turn 1)
    pub turn: u32,
    pub mover: Color,
    pub from: Square,
    pub to: Square,
    /// Piece as it stood on the origin square
    pub piece: Piece,
    pub captured: Option<Piece>,
    /// Pawn reached the far rank and became a Queen
    pub promoted: bool,
}

/// Result of an accepted `submit_move`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    pub status: GameStatus,
}

impl MoveOutcome {
    pub fn mover(&self) -> Color {
        self.record.mover
    }

    pub fn captured(&self) -> Option<Piece> {
        self.record.captured
    }

    pub fn promoted(&self) -> bool {
        self.record.promoted
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Turn bookkeeping, owned by the engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    active_color: Color,
    /// Starts at 1, increments once per accepted half-move
    turn_number: u32,
    /// Half-moves since the last capture
    turns_since_capture: u32,
    history: Vec<MoveRecord>,
    result: Option<Outcome>,
}

impl GameState {
    fn new(active_color: Color) -> Self {
        Self {
            active_color,
            turn_number: 1,
            turns_since_capture: 0,
            history: Vec::new(),
            result: None,
        }
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn turns_since_capture(&self) -> u32 {
        self.turns_since_capture
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn status(&self) -> GameStatus {
        match self.result {
            Some(outcome) => GameStatus::Terminated(outcome),
            None => GameStatus::InProgress,
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Owns the board and the game state; every change goes through `submit_move`
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    state: GameState,
    config: GameConfig,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game from the standard layout, White to move
    pub fn new() -> Self {
        Self::build(Board::initial(), Color::White, GameConfig::default())
    }

    /// Standard layout with custom draw thresholds
    pub fn with_config(config: GameConfig) -> Result<Self, SetupError> {
        Self::from_position(Board::initial(), Color::White, config)
    }

    /// New game from an arbitrary position
    pub fn from_position(
        board: Board,
        active_color: Color,
        config: GameConfig,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        Ok(Self::build(board, active_color, config))
    }

    fn build(board: Board, active_color: Color, config: GameConfig) -> Self {
        Self {
            board,
            state: GameState::new(active_color),
            config,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Copy of the board for rendering
    pub fn current_board_snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Read-only view of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Accepted moves in order
    pub fn history(&self) -> &[MoveRecord] {
        self.state.history()
    }

    pub fn active_color(&self) -> Color {
        self.state.active_color
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn is_over(&self) -> bool {
        self.state.result.is_some()
    }

    /// All legal moves for the side to move (none once the game is over)
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        if self.is_over() {
            return vec![];
        }
        legal_moves(&self.board, self.state.active_color)
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Validate and apply a move for the side to move.
    ///
    /// On error nothing changes and the same side must try again.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let mover = self.state.active_color;
        let captured = validate_move(&self.board, mover, from, to)?;
        let piece = self.board.clear(from).ok_or(MoveError::EmptyOrigin(from))?;

        let promoted = piece.kind == PieceKind::Pawn && to.rank == mover.promotion_rank();
        let placed = if promoted {
            Piece::new(PieceKind::Queen, mover)
        } else {
            piece
        };
        self.board.place(to, placed);

        let record = MoveRecord {
            turn: self.state.turn_number,
            mover,
            from,
            to,
            piece,
            captured,
            promoted,
        };

        tracing::debug!(
            "Turn {}: {} {} {} -> {}{}",
            record.turn,
            mover,
            piece.kind,
            from,
            to,
            captured.map(|p| format!(" captures {}", p)).unwrap_or_default()
        );

        self.end_turn(record);

        Ok(MoveOutcome {
            record,
            status: self.state.status(),
        })
    }

    fn end_turn(&mut self, record: MoveRecord) {
        let state = &mut self.state;

        if record.captured.is_some() {
            state.turns_since_capture = 0;
        } else {
            state.turns_since_capture += 1;
        }
        state.history.push(record);
        state.active_color = state.active_color.opponent();
        state.turn_number += 1;

        state.result = if record.captured.is_some_and(|p| p.is_king()) {
            Some(Outcome::win_for(record.mover))
        } else if state.turns_since_capture >= self.config.quiet_move_limit {
            Some(Outcome::DrawNoCaptures)
        } else if state.turn_number >= self.config.max_turns {
            Some(Outcome::DrawMaxTurns)
        } else {
            None
        };

        if let Some(outcome) = state.result {
            tracing::info!("Game over on turn {}: {:?}", record.turn, outcome);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;
    use PieceKind::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn play(engine: &mut GameEngine, from: &str, to: &str) -> Result<MoveOutcome, MoveError> {
        engine.submit_move(sq(from), sq(to))
    }

    fn position(pieces: &[(&str, PieceKind, Color)], active: Color, config: GameConfig) -> GameEngine {
        let placed: Vec<_> = pieces
            .iter()
            .map(|&(s, kind, color)| (sq(s), Piece::new(kind, color)))
            .collect();
        GameEngine::from_position(Board::from_pieces(&placed).unwrap(), active, config).unwrap()
    }

    /// Knights hop out and back without ever capturing
    const KNIGHT_SHUFFLE: [(&str, &str); 4] = [("B1", "A3"), ("D5", "E3"), ("A3", "B1"), ("E3", "D5")];

    #[test]
    fn test_game_creation() {
        let engine = GameEngine::new();
        assert_eq!(engine.active_color(), White);
        assert_eq!(engine.turn_number(), 1);
        assert_eq!(engine.state().turns_since_capture(), 0);
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_simple_move() {
        let mut engine = GameEngine::new();
        let outcome = play(&mut engine, "B2", "B3").unwrap();

        assert_eq!(outcome.mover(), White);
        assert_eq!(outcome.captured(), None);
        assert!(!outcome.promoted());
        assert_eq!(outcome.status, GameStatus::InProgress);

        let board = engine.current_board_snapshot();
        assert!(board.is_empty(sq("B2")));
        assert_eq!(board.occupant_at(sq("B3")).unwrap(), Some(Piece::new(Pawn, White)));
        assert_eq!(engine.active_color(), Black);
        assert_eq!(engine.turn_number(), 2);
        assert_eq!(engine.state().turns_since_capture(), 1);
        assert_eq!(engine.history(), &[outcome.record]);
        assert_eq!(outcome.record.turn, 1);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut engine = GameEngine::new();
        play(&mut engine, "B2", "B3").unwrap();
        let before = engine.state().clone();
        let board_before = engine.current_board_snapshot();

        assert_eq!(play(&mut engine, "C2", "C3"), Err(MoveError::NotYourTurn(Black)));
        assert_eq!(play(&mut engine, "C4", "C2"), Err(MoveError::InvalidPawnMove));
        assert_eq!(play(&mut engine, "B5", "B1"), Err(MoveError::PathBlocked(sq("B3"))));
        assert_eq!(play(&mut engine, "E4", "E3"), Err(MoveError::EmptyOrigin(sq("E4"))));
        assert_eq!(
            engine.submit_move(sq("A5"), Square::new(-1, 4)),
            Err(MoveError::OutOfBounds(Square::new(-1, 4)))
        );

        assert_eq!(engine.state(), &before);
        assert_eq!(engine.current_board_snapshot(), board_before);
    }

    #[test]
    fn test_capture_resets_counter() {
        let mut engine = GameEngine::new();
        play(&mut engine, "C2", "C3").unwrap();
        play(&mut engine, "D4", "D3").unwrap();
        assert_eq!(engine.state().turns_since_capture(), 2);

        // Rejections leave the counter alone
        assert_eq!(play(&mut engine, "C3", "D4"), Err(MoveError::InvalidPawnMove));
        assert_eq!(play(&mut engine, "C3", "C4"), Err(MoveError::PawnBlocked));
        assert_eq!(engine.state().turns_since_capture(), 2);
        assert_eq!(engine.turn_number(), 3);

        let outcome = play(&mut engine, "D1", "D3").unwrap();
        assert_eq!(outcome.captured(), Some(Piece::new(Pawn, Black)));
        assert_eq!(engine.state().turns_since_capture(), 0);

        let outcome = play(&mut engine, "C4", "D3").unwrap();
        assert_eq!(outcome.captured(), Some(Piece::new(Queen, White)));
        assert_eq!(engine.state().turns_since_capture(), 0);

        play(&mut engine, "B1", "A3").unwrap();
        assert_eq!(engine.state().turns_since_capture(), 1);
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_king_capture_wins_and_game_is_over() {
        let mut engine = position(
            &[("B4", Pawn, White), ("E1", King, White), ("A5", King, Black), ("E5", Knight, Black)],
            White,
            GameConfig::default(),
        );

        let outcome = play(&mut engine, "B4", "A5").unwrap();
        assert_eq!(outcome.captured(), Some(Piece::new(King, Black)));
        assert_eq!(outcome.status, GameStatus::Terminated(Outcome::WhiteWins));
        // The pawn still reached the far rank
        assert!(outcome.promoted());
        assert_eq!(engine.board().occupant_at(sq("A5")).unwrap(), Some(Piece::new(Queen, White)));

        assert_eq!(engine.state().result(), Some(Outcome::WhiteWins));
        assert!(engine.legal_moves().is_empty());
        assert_eq!(play(&mut engine, "E5", "D3"), Err(MoveError::GameOver));
        assert_eq!(play(&mut engine, "E1", "E2"), Err(MoveError::GameOver));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_black_wins() {
        let mut engine = position(
            &[("A1", King, White), ("A5", Queen, Black), ("E5", King, Black)],
            Black,
            GameConfig::default(),
        );
        let outcome = play(&mut engine, "A5", "A1").unwrap();
        assert_eq!(outcome.status, GameStatus::Terminated(Outcome::BlackWins));
        assert_eq!(Outcome::BlackWins.winner(), Some(Black));
    }

    #[test]
    fn test_promotion() {
        let mut engine = position(
            &[("D4", Pawn, White), ("E1", King, White), ("B2", Pawn, Black), ("A5", King, Black)],
            White,
            GameConfig::default(),
        );

        let outcome = play(&mut engine, "D4", "D5").unwrap();
        assert!(outcome.promoted());
        assert_eq!(outcome.record.piece, Piece::new(Pawn, White));
        assert_eq!(engine.board().occupant_at(sq("D5")).unwrap(), Some(Piece::new(Queen, White)));
        assert!(engine.board().is_empty(sq("D4")));

        let outcome = play(&mut engine, "B2", "B1").unwrap();
        assert!(outcome.promoted());
        assert_eq!(engine.board().occupant_at(sq("B1")).unwrap(), Some(Piece::new(Queen, Black)));
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_every_legal_move_lands() {
        let engine = GameEngine::new();
        for (from, to) in engine.legal_moves() {
            let mut next = engine.clone();
            let moved = next.board().occupant_at(from).unwrap().unwrap();
            let outcome = next.submit_move(from, to).unwrap();

            assert!(next.board().is_empty(from));
            let landed = next.board().occupant_at(to).unwrap().unwrap();
            if outcome.promoted() {
                assert_eq!(landed, Piece::new(Queen, moved.color));
            } else {
                assert_eq!(landed, moved);
            }
        }
    }

    #[test]
    fn test_draw_no_captures() {
        let mut engine = GameEngine::new();
        for i in 0..10 {
            assert_eq!(engine.status(), GameStatus::InProgress, "move {}", i + 1);
            let (from, to) = KNIGHT_SHUFFLE[i % 4];
            let outcome = play(&mut engine, from, to).unwrap();
            assert_eq!(engine.state().turns_since_capture(), i as u32 + 1);
            if i < 9 {
                assert_eq!(outcome.status, GameStatus::InProgress);
            }
        }
        assert_eq!(engine.status(), GameStatus::Terminated(Outcome::DrawNoCaptures));
        assert!(Outcome::DrawNoCaptures.is_draw());
        assert_eq!(play(&mut engine, "B1", "A3"), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_max_turns() {
        let config = GameConfig::default().with_quiet_move_limit(1000);
        let mut engine = GameEngine::with_config(config).unwrap();

        for i in 0..98 {
            let (from, to) = KNIGHT_SHUFFLE[i % 4];
            play(&mut engine, from, to).unwrap();
        }
        assert_eq!(engine.turn_number(), 99);
        assert_eq!(engine.status(), GameStatus::InProgress);

        let (from, to) = KNIGHT_SHUFFLE[98 % 4];
        let outcome = play(&mut engine, from, to).unwrap();
        assert_eq!(engine.turn_number(), 100);
        assert_eq!(outcome.status, GameStatus::Terminated(Outcome::DrawMaxTurns));
    }

    #[test]
    fn test_no_capture_draw_takes_priority_over_turn_limit() {
        let config = GameConfig::default().with_max_turns(3).with_quiet_move_limit(2);
        let mut engine = GameEngine::with_config(config).unwrap();
        play(&mut engine, "B1", "A3").unwrap();
        let outcome = play(&mut engine, "D5", "E3").unwrap();
        assert_eq!(outcome.status, GameStatus::Terminated(Outcome::DrawNoCaptures));
    }

    #[test]
    fn test_king_capture_takes_priority_over_turn_limit() {
        let mut engine = position(
            &[("C3", Queen, White), ("E1", King, White), ("C5", King, Black)],
            White,
            GameConfig::default().with_max_turns(2),
        );
        let outcome = play(&mut engine, "C3", "C5").unwrap();
        assert_eq!(engine.turn_number(), 2);
        assert_eq!(outcome.status, GameStatus::Terminated(Outcome::WhiteWins));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let quiet = GameConfig::default().with_quiet_move_limit(0);
        assert_eq!(
            GameEngine::with_config(quiet).unwrap_err(),
            SetupError::ZeroLimit("quiet_move_limit")
        );

        let turns = GameConfig::default().with_max_turns(0);
        assert!(GameEngine::from_position(Board::initial(), Color::Black, turns).is_err());
    }

    #[test]
    fn test_history_is_ordered() {
        let mut engine = GameEngine::new();
        play(&mut engine, "B2", "B3").unwrap();
        play(&mut engine, "C4", "C3").unwrap();
        play(&mut engine, "B3", "B4").unwrap();

        let history = engine.history();
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.iter().map(|r| (r.turn, r.mover)).collect::<Vec<_>>(),
            vec![(1, White), (2, Black), (3, White)]
        );
        assert_eq!(history[1].from, sq("C4"));
        assert_eq!(history[1].to, sq("C3"));
    }
}
