use crate::{col, row, Board, Cell, Color, IllegalMove, BOARD_WIDTH, NUM_CELLS};

/// The result of a legal move: how many tokens travelled (always 1 for a
/// guard) and the board after the move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub amount: u8,
    pub board: Board,
}

/// Decides whether `mover` may move the piece on `from` to `to`, and if so,
/// computes the resulting board. Pure: the input board is never touched.
///
/// A guard steps exactly one orthogonal square and captures any opposing
/// piece. A stack slides `amount` squares along a row or column, where
/// `amount` is the distance travelled and may not exceed the stack's count;
/// every square in between must be empty. The destination then resolves as:
/// occupy (empty), merge (friendly stack), all-or-nothing capture (opposing
/// stack of count <= `amount`, or any opposing guard). There is no player
/// choice beyond the destination square; the outcome is deterministic.
pub fn validate(
    board: &Board,
    from: usize,
    to: usize,
    mover: Color,
) -> Result<MoveOutcome, IllegalMove> {
    if from >= NUM_CELLS {
        return Err(IllegalMove::OutOfBounds { index: from });
    }
    if to >= NUM_CELLS {
        return Err(IllegalMove::OutOfBounds { index: to });
    }
    let source = board.get(from).ok_or(IllegalMove::SourceEmpty)?;
    if source.player() != mover {
        return Err(IllegalMove::NotMoversPiece {
            owner: source.player(),
        });
    }
    if from == to {
        return Err(IllegalMove::ZeroDistance);
    }

    let dx = col(to).abs_diff(col(from));
    let dy = row(to).abs_diff(row(from));
    let destination = board.get(to);

    match source {
        Cell::Guard { .. } => {
            if dx + dy != 1 {
                return Err(IllegalMove::GuardStepTooFar { distance: dx + dy });
            }
            if destination.is_some_and(|cell| cell.player() == mover) {
                return Err(IllegalMove::FriendlyPieceAtDestination);
            }
            let mut next = board.clone();
            next.set(to, Some(source));
            next.set(from, None);
            Ok(MoveOutcome { amount: 1, board: next })
        }
        Cell::Stack { count, .. } => {
            if dx != 0 && dy != 0 {
                return Err(IllegalMove::NotAStraightLine);
            }
            let distance = dx + dy;
            if distance > count as usize {
                return Err(IllegalMove::BeyondStackRange { count, distance });
            }

            let step: isize = if dy == 0 {
                if col(to) > col(from) { 1 } else { -1 }
            } else if row(to) > row(from) {
                BOARD_WIDTH as isize
            } else {
                -(BOARD_WIDTH as isize)
            };
            let mut path = from as isize;
            for _ in 1..distance {
                path += step;
                if board.get(path as usize).is_some() {
                    return Err(IllegalMove::PathBlocked {
                        index: path as usize,
                    });
                }
            }

            let amount = distance as u8;
            let mut next = board.clone();
            match destination {
                None => next.set(
                    to,
                    Some(Cell::Stack {
                        player: mover,
                        count: amount,
                    }),
                ),
                Some(Cell::Stack {
                    player,
                    count: existing,
                }) if player == mover => next.set(
                    to,
                    Some(Cell::Stack {
                        player: mover,
                        count: amount + existing,
                    }),
                ),
                Some(Cell::Guard { player }) if player == mover => {
                    return Err(IllegalMove::FriendlyGuardAtDestination);
                }
                Some(Cell::Stack {
                    count: defender, ..
                }) => {
                    if defender > amount {
                        return Err(IllegalMove::DefenderTooStrong { defender, amount });
                    }
                    // All-or-nothing: the defending tokens vanish entirely.
                    next.set(
                        to,
                        Some(Cell::Stack {
                            player: mover,
                            count: amount,
                        }),
                    );
                }
                Some(Cell::Guard { .. }) => next.set(
                    to,
                    Some(Cell::Stack {
                        player: mover,
                        count: amount,
                    }),
                ),
            }
            if amount == count {
                next.set(from, None);
            } else {
                next.set(
                    from,
                    Some(Cell::Stack {
                        player: mover,
                        count: count - amount,
                    }),
                );
            }
            Ok(MoveOutcome { amount, board: next })
        }
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::MoveInput;

    fn guards(board: &Board, player: Color) -> usize {
        board
            .cells()
            .filter(|cell| matches!(cell, Some(Cell::Guard { player: p }) if *p == player))
            .count()
    }

    quickcheck! {
        fn accepted_moves_preserve_single_guards(input: MoveInput) -> bool {
            match validate(&input.board, input.from, input.to, input.mover) {
                Ok(outcome) => {
                    guards(&outcome.board, Color::Blue) <= 1
                        && guards(&outcome.board, Color::Red) <= 1
                }
                Err(_) => true,
            }
        }

        fn mover_tokens_are_conserved(input: MoveInput) -> bool {
            let before = input.board.token_total(input.mover);
            match validate(&input.board, input.from, input.to, input.mover) {
                Ok(outcome) => outcome.board.token_total(input.mover) == before,
                Err(_) => true,
            }
        }

        fn captured_tokens_vanish_rather_than_transfer(input: MoveInput) -> bool {
            let opponent = input.mover.flip();
            let before = input.board.token_total(opponent);
            let captured = match input.board.get(input.to) {
                Some(Cell::Stack { player, count }) if player == opponent => count as u32,
                _ => 0,
            };
            match validate(&input.board, input.from, input.to, input.mover) {
                Ok(outcome) => outcome.board.token_total(opponent) == before - captured,
                Err(_) => true,
            }
        }

        fn validation_is_deterministic(input: MoveInput) -> bool {
            validate(&input.board, input.from, input.to, input.mover)
                == validate(&input.board, input.from, input.to, input.mover)
        }
    }

    #[test]
    fn stack_slides_through_empty_path_and_captures() {
        // A stack of 3 slides 3 squares over two empty cells onto a
        // defending stack of 2.
        let mut board = Board::empty();
        board.set(
            21,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 3,
            }),
        );
        board.set(
            24,
            Some(Cell::Stack {
                player: Color::Red,
                count: 2,
            }),
        );
        let outcome = validate(&board, 21, 24, Color::Blue).unwrap();
        assert_eq!(outcome.amount, 3);
        assert_eq!(outcome.board.get(21), None);
        assert_eq!(
            outcome.board.get(24),
            Some(Cell::Stack {
                player: Color::Blue,
                count: 3,
            })
        );
    }

    #[test]
    fn capture_compares_defender_to_amount_not_source_count() {
        // A stack of 5 sliding only 2 squares brings 2 tokens; a defender
        // of 3 holds, even though the source stack outnumbers it.
        let mut board = Board::empty();
        board.set(
            7,
            Some(Cell::Stack {
                player: Color::Red,
                count: 5,
            }),
        );
        board.set(
            9,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 3,
            }),
        );
        assert_eq!(
            validate(&board, 7, 9, Color::Red),
            Err(IllegalMove::DefenderTooStrong {
                defender: 3,
                amount: 2,
            })
        );
    }

    #[test]
    fn equal_counts_capture() {
        let mut board = Board::empty();
        board.set(
            0,
            Some(Cell::Stack {
                player: Color::Red,
                count: 2,
            }),
        );
        board.set(
            2,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 2,
            }),
        );
        let outcome = validate(&board, 0, 2, Color::Red).unwrap();
        assert_eq!(
            outcome.board.get(2),
            Some(Cell::Stack {
                player: Color::Red,
                count: 2,
            })
        );
        assert_eq!(outcome.board.token_total(Color::Blue), 0);
    }

    #[test]
    fn merging_adds_counts() {
        let mut board = Board::empty();
        board.set(
            10,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 2,
            }),
        );
        board.set(
            12,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 3,
            }),
        );
        let outcome = validate(&board, 10, 12, Color::Blue).unwrap();
        assert_eq!(outcome.amount, 2);
        assert_eq!(outcome.board.get(10), None);
        assert_eq!(
            outcome.board.get(12),
            Some(Cell::Stack {
                player: Color::Blue,
                count: 5,
            })
        );
    }

    #[test]
    fn partial_slide_splits_the_stack() {
        let mut board = Board::empty();
        board.set(
            14,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 3,
            }),
        );
        let outcome = validate(&board, 14, 15, Color::Blue).unwrap();
        assert_eq!(outcome.amount, 1);
        assert_eq!(
            outcome.board.get(14),
            Some(Cell::Stack {
                player: Color::Blue,
                count: 2,
            })
        );
        assert_eq!(
            outcome.board.get(15),
            Some(Cell::Stack {
                player: Color::Blue,
                count: 1,
            })
        );
    }

    #[test]
    fn any_intervening_piece_blocks() {
        let mut board = Board::empty();
        board.set(
            0,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 3,
            }),
        );
        // Friendly pieces block just like hostile ones.
        board.set(
            1,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 1,
            }),
        );
        assert_eq!(
            validate(&board, 0, 2, Color::Blue),
            Err(IllegalMove::PathBlocked { index: 1 })
        );
    }

    #[test]
    fn stack_cannot_outrun_its_count() {
        let mut board = Board::empty();
        board.set(
            0,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 2,
            }),
        );
        assert_eq!(
            validate(&board, 0, 3, Color::Blue),
            Err(IllegalMove::BeyondStackRange {
                count: 2,
                distance: 3,
            })
        );
    }

    #[test]
    fn stack_cannot_slide_diagonally() {
        let mut board = Board::empty();
        board.set(
            0,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 4,
            }),
        );
        assert_eq!(
            validate(&board, 0, 8, Color::Blue),
            Err(IllegalMove::NotAStraightLine)
        );
    }

    #[test]
    fn guard_steps_one_square_and_captures_any_stack() {
        let mut board = Board::empty();
        board.set(24, Some(Cell::Guard { player: Color::Blue }));
        board.set(
            25,
            Some(Cell::Stack {
                player: Color::Red,
                count: 6,
            }),
        );
        let outcome = validate(&board, 24, 25, Color::Blue).unwrap();
        assert_eq!(outcome.amount, 1);
        assert_eq!(outcome.board.get(24), None);
        assert_eq!(
            outcome.board.get(25),
            Some(Cell::Guard { player: Color::Blue })
        );
    }

    #[test]
    fn guard_cannot_step_twice_or_diagonally() {
        let mut board = Board::empty();
        board.set(24, Some(Cell::Guard { player: Color::Blue }));
        assert_eq!(
            validate(&board, 24, 26, Color::Blue),
            Err(IllegalMove::GuardStepTooFar { distance: 2 })
        );
        assert_eq!(
            validate(&board, 24, 32, Color::Blue),
            Err(IllegalMove::GuardStepTooFar { distance: 2 })
        );
    }

    #[test]
    fn wrong_color_and_empty_source_are_rejected() {
        let board = Board::starting();
        assert_eq!(
            validate(&board, 0, 7, Color::Blue),
            Err(IllegalMove::NotMoversPiece { owner: Color::Red })
        );
        assert_eq!(
            validate(&board, 24, 25, Color::Blue),
            Err(IllegalMove::SourceEmpty)
        );
        assert_eq!(
            validate(&board, 0, 49, Color::Red),
            Err(IllegalMove::OutOfBounds { index: 49 })
        );
    }

    #[test]
    fn stack_cannot_land_on_own_guard() {
        let mut board = Board::empty();
        board.set(
            40,
            Some(Cell::Stack {
                player: Color::Blue,
                count: 2,
            }),
        );
        board.set(41, Some(Cell::Guard { player: Color::Blue }));
        assert_eq!(
            validate(&board, 40, 41, Color::Blue),
            Err(IllegalMove::FriendlyGuardAtDestination)
        );
    }
}
