use quickcheck::{Arbitrary, Gen};

use crate::{Board, Cell, Color, NUM_CELLS};

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Color::Blue, Color::Red]).unwrap()
    }
}

/// A random board plus a random proposed move.
///
/// The board always satisfies the structural invariants (at most one guard
/// per side, stack counts >= 1), but the move is unconstrained; most
/// generated moves are illegal, which is exactly what the validation
/// properties need.
#[derive(Clone, Debug)]
pub struct MoveInput {
    pub board: Board,
    pub from: usize,
    pub to: usize,
    pub mover: Color,
}

impl Arbitrary for MoveInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut board = Board::empty();
        for index in 0..NUM_CELLS {
            if u8::arbitrary(g) % 3 == 0 {
                board.set(
                    index,
                    Some(Cell::Stack {
                        player: Color::arbitrary(g),
                        count: u8::arbitrary(g) % 4 + 1,
                    }),
                );
            }
        }
        // Placing red's guard second may overwrite blue's; a board can
        // legitimately have zero, one, or two guards on it.
        if bool::arbitrary(g) {
            board.set(
                usize::arbitrary(g) % NUM_CELLS,
                Some(Cell::Guard {
                    player: Color::Blue,
                }),
            );
        }
        if bool::arbitrary(g) {
            board.set(
                usize::arbitrary(g) % NUM_CELLS,
                Some(Cell::Guard { player: Color::Red }),
            );
        }

        MoveInput {
            board,
            from: usize::arbitrary(g) % NUM_CELLS,
            to: usize::arbitrary(g) % NUM_CELLS,
            mover: Color::arbitrary(g),
        }
    }
}
