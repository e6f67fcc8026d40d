//! Board and result text

use minichess_core::{Board, GameConfig, MoveRecord, Outcome, Square, BOARD_SIZE};

/// File legend printed under the board
const FILE_LEGEND: &str = "     A   B   C   D   E";

/// Render the board, rank 5 at the top, each cell right-aligned to width 3.
///
/// The text starts with a blank line and ends with the file legend followed
/// by one more blank line when printed with a trailing newline.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("\n");

    for rank in (0..BOARD_SIZE).rev() {
        let cells: Vec<String> = (0..BOARD_SIZE)
            .map(|file| {
                let code = board
                    .occupant_at(Square::new(file, rank))
                    .ok()
                    .flatten()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| ".".to_string());
                format!("{:>3}", code)
            })
            .collect();
        out.push_str(&format!("{}  {}\n", rank + 1, cells.join(" ")));
    }

    out.push('\n');
    out.push_str(FILE_LEGEND);
    out.push('\n');
    out
}

/// Accepted move line: `White move: from B2 to B3`
pub fn move_line(record: &MoveRecord) -> String {
    format!("{} move: from {} to {}", record.mover, record.from, record.to)
}

/// Closing line for a finished game
pub fn outcome_line(outcome: Outcome, last: &MoveRecord, config: &GameConfig) -> String {
    match outcome {
        Outcome::WhiteWins | Outcome::BlackWins => {
            format!("{} wins in turn {}!", last.mover, last.turn)
        }
        Outcome::DrawNoCaptures => format!(
            "No captures in {} turns. Game is a draw.",
            config.quiet_move_limit
        ),
        Outcome::DrawMaxTurns => "Maximum number of turns reached. Game is a draw.".to_string(),
    }
}
