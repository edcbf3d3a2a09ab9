use palisade::{
    move_notation, render_board, validate, winner_after_move, Board, Color, PlayerInfo,
    ServerMessage,
};
use tracing::{debug, trace};

use crate::ConnectionId;

/// One seated player. Blue is seated by the room's creator, red by whoever
/// joins with the room code.
pub struct Seat {
    pub conn: ConnectionId,
    pub name: String,
    pub color: Color,
}

/// One in-progress match.
///
/// All mutation goes through the operations below, each of which either
/// commits a validated change and says what to broadcast, or leaves the
/// session untouched. Out-of-turn, unseated, and rule-breaking requests are
/// silent no-ops by design; only the transport boundary ever answers them.
pub struct GameSession {
    id: String,
    board: Board,
    seats: Vec<Seat>,
    turn: Color,
    move_log: Vec<String>,
    history: Vec<Board>,
    winner: Option<Color>,
    pending_undo: Option<Color>,
    pending_new_game: Option<Color>,
}

impl GameSession {
    /// A fresh match with the creator in the blue seat.
    pub fn new(id: String, conn: ConnectionId, name: String) -> Self {
        Self {
            id,
            board: Board::starting(),
            seats: vec![Seat {
                conn,
                name,
                color: Color::Blue,
            }],
            turn: Color::Blue,
            move_log: Vec::new(),
            history: Vec::new(),
            winner: None,
            pending_undo: None,
            pending_new_game: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn move_log(&self) -> &[String] {
        &self.move_log
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The seated players in seating order, as shown to clients.
    pub fn players(&self) -> Vec<PlayerInfo> {
        self.seats
            .iter()
            .map(|seat| PlayerInfo {
                name: seat.name.clone(),
                color: seat.color,
            })
            .collect()
    }

    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.seats.iter().map(|seat| seat.conn)
    }

    fn seat_of(&self, conn: ConnectionId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.conn == conn)
    }

    fn other_seat(&self, conn: ConnectionId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.conn != conn)
    }

    /// Seats `conn` as red. Fails when both seats are already taken.
    pub fn join(&mut self, conn: ConnectionId, name: String) -> bool {
        if self.seats.len() >= 2 {
            return false;
        }
        self.seats.push(Seat {
            conn,
            name,
            color: Color::Red,
        });
        true
    }

    /// Validates and commits a move, returning the message to broadcast.
    ///
    /// `None` means nothing happened: the match is over, the connection is
    /// not seated, it is not that seat's turn, or the rules reject the
    /// move. Nothing is broadcast in any of those cases.
    pub fn apply_move(
        &mut self,
        conn: ConnectionId,
        from: usize,
        to: usize,
    ) -> Option<ServerMessage> {
        if self.winner.is_some() {
            return None;
        }
        let color = self.seat_of(conn)?.color;
        if self.turn != color {
            return None;
        }
        let outcome = match validate(&self.board, from, to, color) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(game = %self.id, player = %color, %err, "rejected move");
                return None;
            }
        };

        self.history.push(self.board.clone());
        self.board = outcome.board;
        let notation = move_notation(from, to, outcome.amount);
        debug!(game = %self.id, player = %color, last_move = %notation, "committed move");
        trace!(game = %self.id, "\n{}", render_board(&self.board));
        self.move_log.push(notation.clone());

        if let Some(winner) = winner_after_move(&self.board, color) {
            // The turn deliberately stays with the mover: a terminal board
            // is frozen until an undo or a new game.
            self.winner = Some(winner);
            debug!(game = %self.id, winner = %winner, "match over");
            Some(ServerMessage::Winner {
                winner,
                board: self.board.to_wire(),
            })
        } else {
            self.turn = self.turn.flip();
            Some(ServerMessage::Update {
                board: self.board.to_wire(),
                turn: self.turn,
                last_move: notation,
            })
        }
    }

    /// Records an undo request and names the seat to forward it to.
    ///
    /// A request with nothing to undo, or from an unseated connection, or
    /// without an opponent to grant it, is dropped. The pending flag has no
    /// expiry; it lives until granted or until the session resets.
    pub fn request_undo(&mut self, conn: ConnectionId) -> Option<ConnectionId> {
        if self.history.is_empty() {
            return None;
        }
        let color = self.seat_of(conn)?.color;
        let other = self.other_seat(conn)?.conn;
        self.pending_undo = Some(color);
        Some(other)
    }

    /// Grants the opponent's pending undo request and rolls back one move.
    ///
    /// Only the seat that did *not* request the undo can grant it. The
    /// rollback restores board, move log, turn, and winner to their exact
    /// pre-move values.
    pub fn confirm_undo(&mut self, conn: ConnectionId) -> Option<ServerMessage> {
        let color = self.seat_of(conn)?.color;
        if self.pending_undo? == color {
            return None;
        }
        let board = self.history.pop()?;
        self.pending_undo = None;
        self.board = board;
        self.move_log.pop();
        // A winning move never flipped the turn, so undoing one must not
        // flip it back either.
        if self.winner.take().is_none() {
            self.turn = self.turn.flip();
        }
        debug!(game = %self.id, "undid last move");
        Some(ServerMessage::Update {
            board: self.board.to_wire(),
            turn: self.turn,
            last_move: "(undo)".to_string(),
        })
    }

    /// Records a new-game request and names the seat to forward it to.
    /// Unlike an undo, this is accepted even before any move was made.
    pub fn request_new_game(&mut self, conn: ConnectionId) -> Option<ConnectionId> {
        let color = self.seat_of(conn)?.color;
        let other = self.other_seat(conn)?.conn;
        self.pending_new_game = Some(color);
        Some(other)
    }

    /// Grants the opponent's pending new-game request and resets the match.
    pub fn confirm_new_game(&mut self, conn: ConnectionId) -> Option<ServerMessage> {
        let color = self.seat_of(conn)?.color;
        if self.pending_new_game? == color {
            return None;
        }
        self.board = Board::starting();
        self.turn = Color::Blue;
        self.move_log.clear();
        self.history.clear();
        self.winner = None;
        self.pending_undo = None;
        self.pending_new_game = None;
        debug!(game = %self.id, "started new game");
        Some(ServerMessage::Start {
            board: self.board.to_wire(),
            players: self.players(),
            turn: self.turn,
            last_move: Some("(new game)".to_string()),
        })
    }

    /// Clears the seat held by `conn`, if any.
    pub fn remove_connection(&mut self, conn: ConnectionId) {
        self.seats.retain(|seat| seat.conn != conn);
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}
