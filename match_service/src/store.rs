use std::collections::HashMap;

use game_core::{GameSession, SessionStore};

/// Session store kept in process memory
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: HashMap<String, GameSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&mut self, session: GameSession) -> String {
        let id = session.id().to_string();
        self.sessions.insert(id.clone(), session);
        id
    }

    fn get(&self, id: &str) -> Option<&GameSession> {
        self.sessions.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut GameSession> {
        self.sessions.get_mut(id)
    }

    fn remove(&mut self, id: &str) -> Option<GameSession> {
        self.sessions.remove(id)
    }
}
