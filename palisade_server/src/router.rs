use palisade::{ClientRequest, Color, ServerMessage};
use tracing::info;

use crate::{ConnectionId, GameRegistry, GameSession};

/// One message addressed to one connection. The transport owns delivery;
/// a send to a dead connection is dropped without retry.
#[derive(Debug)]
pub struct Outbound {
    pub to: ConnectionId,
    pub msg: ServerMessage,
}

/// Turns decoded client requests into session operations and collects the
/// resulting messages.
///
/// The router holds all match state but performs no I/O, so the whole
/// request/broadcast cycle is testable without a socket in sight. The
/// caller must feed it requests one at a time; that serialization is what
/// keeps sessions race-free.
#[derive(Default)]
pub struct MessageRouter {
    registry: GameRegistry,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, conn: ConnectionId, request: ClientRequest) -> Vec<Outbound> {
        match request {
            ClientRequest::Create { name } => {
                let session = self.registry.create(conn, name);
                vec![Outbound {
                    to: conn,
                    msg: ServerMessage::Created {
                        game_id: session.id().to_string(),
                        color: Color::Blue,
                    },
                }]
            }
            ClientRequest::Join { game_id, name } => {
                if let Some(session) = self.registry.get_mut(&game_id) {
                    if session.join(conn, name) {
                        info!(game = %game_id, "second seat filled");
                        let msg = ServerMessage::Start {
                            board: session.board().to_wire(),
                            players: session.players(),
                            turn: session.turn(),
                            last_move: None,
                        };
                        return broadcast(session, msg);
                    }
                }
                vec![Outbound {
                    to: conn,
                    msg: ServerMessage::Error {
                        message: "Game full or not found.".to_string(),
                    },
                }]
            }
            ClientRequest::Move {
                game_id,
                move_index,
                to_index,
            } => {
                let Some(session) = self.registry.get_mut(&game_id) else {
                    return Vec::new();
                };
                match session.apply_move(conn, move_index, to_index) {
                    Some(msg) => broadcast(session, msg),
                    None => Vec::new(),
                }
            }
            ClientRequest::UndoRequest { game_id } => {
                let Some(session) = self.registry.get_mut(&game_id) else {
                    return Vec::new();
                };
                match session.request_undo(conn) {
                    Some(to) => vec![Outbound {
                        to,
                        msg: ServerMessage::UndoRequest {},
                    }],
                    None => Vec::new(),
                }
            }
            ClientRequest::UndoConfirm { game_id } => {
                let Some(session) = self.registry.get_mut(&game_id) else {
                    return Vec::new();
                };
                match session.confirm_undo(conn) {
                    Some(msg) => broadcast(session, msg),
                    None => Vec::new(),
                }
            }
            ClientRequest::NewGameRequest { game_id } => {
                let Some(session) = self.registry.get_mut(&game_id) else {
                    return Vec::new();
                };
                match session.request_new_game(conn) {
                    Some(to) => vec![Outbound {
                        to,
                        msg: ServerMessage::NewGameRequest {},
                    }],
                    None => Vec::new(),
                }
            }
            ClientRequest::NewGameConfirm { game_id } => {
                let Some(session) = self.registry.get_mut(&game_id) else {
                    return Vec::new();
                };
                match session.confirm_new_game(conn) {
                    Some(msg) => broadcast(session, msg),
                    None => Vec::new(),
                }
            }
        }
    }

    /// The transport calls this when a connection goes away, however it
    /// went away. Deserted rooms disappear with it.
    pub fn connection_closed(&mut self, conn: ConnectionId) {
        self.registry.connection_closed(conn);
    }

    #[cfg(test)]
    fn registry(&self) -> &GameRegistry {
        &self.registry
    }
}

fn broadcast(session: &GameSession, msg: ServerMessage) -> Vec<Outbound> {
    session
        .connections()
        .map(|to| Outbound {
            to,
            msg: msg.clone(),
        })
        .collect()
}
