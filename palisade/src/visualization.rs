use crate::{Board, Cell, Color, BOARD_WIDTH};

/// Renders a board as plain text for trace logs and debugging.
///
/// Blue pieces print as `B`, red as `R`; a guard is `B*`, a stack of three
/// is `B3`, an empty square is `. `.
pub fn render_board(board: &Board) -> String {
    let mut result = String::from("    A  B  C  D  E  F  G\n");
    result += "  ╭─────────────────────╮\n";
    for r in 0..BOARD_WIDTH {
        result += &format!("{} │", BOARD_WIDTH - r);
        for c in 0..BOARD_WIDTH {
            match board.get(r * BOARD_WIDTH + c) {
                None => result += " . ",
                Some(cell) => {
                    let side = match cell.player() {
                        Color::Blue => 'B',
                        Color::Red => 'R',
                    };
                    match cell {
                        Cell::Guard { .. } => result += &format!(" {}*", side),
                        Cell::Stack { count, .. } => result += &format!(" {}{}", side, count),
                    }
                }
            }
        }
        result += "│\n";
    }
    result += "  ╰─────────────────────╯";
    result
}
