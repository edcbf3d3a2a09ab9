use std::collections::HashMap;

use rand::Rng;
use tracing::info;

use crate::{ConnectionId, GameSession};

const CODE_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// All live matches in this process, keyed by room code.
///
/// Sessions come into being on `create`, and go away the moment the last
/// seated connection closes. Nothing here is persisted; a process restart
/// forgets every room.
#[derive(Default)]
pub struct GameRegistry {
    sessions: HashMap<String, GameSession>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new room with the creator seated as blue.
    pub fn create(&mut self, conn: ConnectionId, name: String) -> &GameSession {
        let id = loop {
            let id = random_code();
            if !self.sessions.contains_key(&id) {
                break id;
            }
        };
        info!(game = %id, player = %name, "created room");
        self.sessions
            .entry(id.clone())
            .or_insert_with(|| GameSession::new(id, conn, name))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut GameSession> {
        self.sessions.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Clears `conn`'s seat wherever it is seated and drops any session
    /// left without occupants.
    pub fn connection_closed(&mut self, conn: ConnectionId) {
        self.sessions.retain(|id, session| {
            session.remove_connection(conn);
            if session.is_empty() {
                info!(game = %id, "removing deserted room");
                false
            } else {
                true
            }
        });
    }
}

fn random_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}
