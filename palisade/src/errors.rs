use crate::Color;

/// The error type for [`validate()`](crate::validate), i.e. for a single
/// proposed move. The server treats every variant as a silent rejection;
/// the reasons exist for logs and tests.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds { index: usize },
    SourceEmpty,
    NotMoversPiece { owner: Color },
    ZeroDistance,
    GuardStepTooFar { distance: usize },
    FriendlyPieceAtDestination,
    NotAStraightLine,
    BeyondStackRange { count: u8, distance: usize },
    PathBlocked { index: usize },
    FriendlyGuardAtDestination,
    DefenderTooStrong { defender: u8, amount: u8 },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds { index } => {
                write!(f, "Square index {} is outside the board", index)
            }
            IllegalMove::SourceEmpty => write!(f, "The source square is empty"),
            IllegalMove::NotMoversPiece { owner } => {
                write!(f, "The source piece belongs to {}", owner)
            }
            IllegalMove::ZeroDistance => write!(f, "Source and destination are the same square"),
            IllegalMove::GuardStepTooFar { distance } => write!(
                f,
                "A guard moves exactly one orthogonal step, not {}",
                distance
            ),
            IllegalMove::FriendlyPieceAtDestination => {
                write!(f, "A guard cannot move onto a friendly piece")
            }
            IllegalMove::NotAStraightLine => {
                write!(f, "A stack slides along a single row or column")
            }
            IllegalMove::BeyondStackRange { count, distance } => write!(
                f,
                "A stack of {} cannot slide {} squares",
                count, distance
            ),
            IllegalMove::PathBlocked { index } => write!(
                f,
                "The path is blocked by a piece on {}",
                crate::index_to_label(*index)
            ),
            IllegalMove::FriendlyGuardAtDestination => {
                write!(f, "A stack cannot land on its own guard")
            }
            IllegalMove::DefenderTooStrong { defender, amount } => write!(
                f,
                "A defending stack of {} withstands {} attacking tokens",
                defender, amount
            ),
        }
    }
}
