use serde::{Deserialize, Serialize};

/// The board is always 7x7.
pub const BOARD_WIDTH: usize = 7;
pub const NUM_CELLS: usize = BOARD_WIDTH * BOARD_WIDTH;

/// Red's guard starts here; blue wins by walking its guard onto this square.
pub const RED_HOME: usize = 3;
/// Blue's guard starts here; red wins by walking its guard onto this square.
pub const BLUE_HOME: usize = 45;

/// The side a player is on. Blue always sits first and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
}

impl Color {
    /// The opposing side.
    pub fn flip(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Blue => write!(f, "blue"),
            Color::Red => write!(f, "red"),
        }
    }
}

/// A single occupied square.
///
/// Each player has exactly one guard for the whole match, and a zero-count
/// stack does not exist: a square with no tokens on it is `None` in the
/// surrounding [`Board`], never a `Stack { count: 0 }`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cell {
    Guard { player: Color },
    Stack { player: Color, count: u8 },
}

impl Cell {
    pub fn player(&self) -> Color {
        match self {
            Cell::Guard { player } => *player,
            Cell::Stack { player, .. } => *player,
        }
    }
}

/// The full 7x7 playing field, row-major: index = row * 7 + col.
///
/// Column 0 is file A, and row 0 is rank 7 (rank labels decrease downward,
/// so index 48 is G1).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Cell>; NUM_CELLS],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_CELLS],
        }
    }

    /// The layout both players start from: seven single-token stacks in a
    /// wedge formation plus one guard per side, mirrored across the board.
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (col, row) in [(0, 0), (1, 0), (2, 1), (3, 2), (4, 1), (5, 0), (6, 0)] {
            board.cells[row * BOARD_WIDTH + col] = Some(Cell::Stack {
                player: Color::Red,
                count: 1,
            });
        }
        board.cells[RED_HOME] = Some(Cell::Guard { player: Color::Red });
        for (col, row) in [(0, 6), (1, 6), (2, 5), (3, 4), (4, 5), (5, 6), (6, 6)] {
            board.cells[row * BOARD_WIDTH + col] = Some(Cell::Stack {
                player: Color::Blue,
                count: 1,
            });
        }
        board.cells[BLUE_HOME] = Some(Cell::Guard {
            player: Color::Blue,
        });
        board
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells[index]
    }

    pub fn set(&mut self, index: usize, cell: Option<Cell>) {
        self.cells[index] = cell;
    }

    pub fn cells(&self) -> impl Iterator<Item = Option<Cell>> + '_ {
        self.cells.iter().copied()
    }

    /// The square a player's guard occupies, if it is still on the board.
    pub fn guard_position(&self, player: Color) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| matches!(cell, Some(Cell::Guard { player: p }) if *p == player))
    }

    /// The original guard square of `player`, which the opposing guard must
    /// reach to win.
    pub fn home_cell(player: Color) -> usize {
        match player {
            Color::Blue => BLUE_HOME,
            Color::Red => RED_HOME,
        }
    }

    /// Total tokens in `player`'s stacks. Guards carry no tokens.
    pub fn token_total(&self, player: Color) -> u32 {
        self.cells
            .iter()
            .filter_map(|cell| match cell {
                Some(Cell::Stack { player: p, count }) if *p == player => Some(*count as u32),
                _ => None,
            })
            .sum()
    }

    /// The board as it appears on the wire: 49 entries, `null` for an empty
    /// square.
    pub fn to_wire(&self) -> Vec<Option<Cell>> {
        self.cells.to_vec()
    }
}

pub fn col(index: usize) -> usize {
    index % BOARD_WIDTH
}

pub fn row(index: usize) -> usize {
    index / BOARD_WIDTH
}

/// Renders a square index as its display label, e.g. 0 -> "A7", 48 -> "G1".
pub fn index_to_label(index: usize) -> String {
    let file = (b'A' + col(index) as u8) as char;
    let rank = BOARD_WIDTH - row(index);
    format!("{}{}", file, rank)
}

/// The move-log entry for a committed move.
pub fn move_notation(from: usize, to: usize, amount: u8) -> String {
    format!("{}-{}-{}", index_to_label(from), index_to_label(to), amount)
}
