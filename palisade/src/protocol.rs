use serde::{Deserialize, Serialize};

use crate::{Cell, Color};

/// A request from a connected client.
///
/// Clients are trusted to send well-formed JSON; anything that does not
/// parse into this enum is dropped at the transport boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientRequest {
    /// Open a new room. The creator takes the blue seat.
    Create { name: String },
    /// Take the red seat in an existing room.
    #[serde(rename_all = "camelCase")]
    Join { game_id: String, name: String },
    /// Move the piece on `move_index` to `to_index`.
    #[serde(rename_all = "camelCase")]
    Move {
        game_id: String,
        move_index: usize,
        to_index: usize,
    },
    /// Ask the other seat to take back the last move.
    #[serde(rename_all = "camelCase")]
    UndoRequest { game_id: String },
    /// Grant the other seat's undo request.
    #[serde(rename_all = "camelCase")]
    UndoConfirm { game_id: String },
    /// Ask the other seat to restart the match.
    #[serde(rename_all = "camelCase")]
    NewGameRequest { game_id: String },
    /// Grant the other seat's new-game request.
    #[serde(rename_all = "camelCase")]
    NewGameConfirm { game_id: String },
}

/// One seated player as shown to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
    pub color: Color,
}

/// A message to one or both seats of a room.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Direct reply to `create`.
    #[serde(rename_all = "camelCase")]
    Created { game_id: String, color: Color },
    /// Both seats are filled (or the match was restarted); play begins.
    #[serde(rename_all = "camelCase")]
    Start {
        board: Vec<Option<Cell>>,
        players: Vec<PlayerInfo>,
        turn: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(default)]
        last_move: Option<String>,
    },
    /// A move was committed (or undone) and the match continues.
    #[serde(rename_all = "camelCase")]
    Update {
        board: Vec<Option<Cell>>,
        turn: Color,
        last_move: String,
    },
    /// The match is over. No further moves are accepted until a new game.
    Winner {
        winner: Color,
        board: Vec<Option<Cell>>,
    },
    /// Forwarded to the seat that did not ask for the undo.
    UndoRequest {},
    /// Forwarded to the seat that did not ask for the restart.
    NewGameRequest {},
    /// Direct reply when joining a full or unknown room.
    Error { message: String },
}
