use crate::{Board, Color};

/// Decides whether the move just committed by `mover` ended the match.
///
/// Runs on the post-move board, before any turn flip. Capturing the
/// opposing guard is checked before the home-cell condition, so a move that
/// does both wins by capture. A board on which *neither* guard exists
/// cannot arise from validated play; it falls back to a blue win, a quirk
/// the protocol has always had and that clients may rely on.
pub fn winner_after_move(board: &Board, mover: Color) -> Option<Color> {
    let blue_guard = board.guard_position(Color::Blue);
    let red_guard = board.guard_position(Color::Red);
    if blue_guard.is_none() && red_guard.is_none() {
        return Some(Color::Blue);
    }

    let opponent = mover.flip();
    let (own_guard, opposing_guard) = match mover {
        Color::Blue => (blue_guard, red_guard),
        Color::Red => (red_guard, blue_guard),
    };
    if opposing_guard.is_none() {
        return Some(mover);
    }
    if own_guard == Some(Board::home_cell(opponent)) {
        return Some(mover);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{validate, Cell, BLUE_HOME, RED_HOME};

    #[test]
    fn capturing_the_guard_wins() {
        let mut board = Board::empty();
        board.set(RED_HOME, Some(Cell::Guard { player: Color::Red }));
        board.set(BLUE_HOME, Some(Cell::Guard { player: Color::Blue }));
        board.set(
            10,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 1,
            }),
        );
        let outcome = validate(&board, 10, RED_HOME, Color::Blue).unwrap();
        assert_eq!(winner_after_move(&outcome.board, Color::Blue), Some(Color::Blue));
    }

    #[test]
    fn reaching_the_opposing_home_cell_wins() {
        let mut board = Board::empty();
        // Red's guard has fled its home square; blue's guard steps in.
        board.set(RED_HOME + 1, Some(Cell::Guard { player: Color::Red }));
        board.set(RED_HOME, Some(Cell::Guard { player: Color::Blue }));
        assert_eq!(winner_after_move(&board, Color::Blue), Some(Color::Blue));
        // The stationed guard does not hand red a win on red's own move.
        assert_eq!(winner_after_move(&board, Color::Red), None);
    }

    #[test]
    fn capture_takes_priority_over_home_cell() {
        // Blue's guard captures the red guard standing on red's own home
        // square: both win conditions hold at once on the post-move board.
        let mut board = Board::empty();
        board.set(RED_HOME, Some(Cell::Guard { player: Color::Red }));
        board.set(RED_HOME + 1, Some(Cell::Guard { player: Color::Blue }));
        let outcome = validate(&board, RED_HOME + 1, RED_HOME, Color::Blue).unwrap();
        assert_eq!(outcome.board.guard_position(Color::Red), None);
        assert_eq!(outcome.board.guard_position(Color::Blue), Some(RED_HOME));
        assert_eq!(winner_after_move(&outcome.board, Color::Blue), Some(Color::Blue));
    }

    #[test]
    fn no_winner_on_a_quiet_board() {
        assert_eq!(winner_after_move(&Board::starting(), Color::Blue), None);
        assert_eq!(winner_after_move(&Board::starting(), Color::Red), None);
    }

    #[test]
    fn guardless_board_defaults_to_blue() {
        let board = Board::empty();
        assert_eq!(winner_after_move(&board, Color::Red), Some(Color::Blue));
        assert_eq!(winner_after_move(&board, Color::Blue), Some(Color::Blue));
    }
}
