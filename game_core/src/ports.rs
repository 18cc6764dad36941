//! Collaborators the core depends on but does not implement.

use glam::Vec2;

use crate::player::PlayerType;
use crate::session::GameSession;

/// Keeps sessions addressable by id
pub trait SessionStore {
    /// Store a session and return its id
    fn create(&mut self, session: GameSession) -> String;

    fn get(&self, id: &str) -> Option<&GameSession>;

    fn get_mut(&mut self, id: &str) -> Option<&mut GameSession>;

    fn remove(&mut self, id: &str) -> Option<GameSession>;
}

/// Source of serve directions
pub trait DirectionSource {
    /// Direction for the next serve. The X component points toward the side
    /// that was just scored against (`last_scorer`'s opponent); with no
    /// scorer either side may be picked.
    fn next_direction(&mut self, last_scorer: Option<PlayerType>) -> Vec2;
}

/// Always serves the same way. Handy for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedDirection(pub Vec2);

impl DirectionSource for FixedDirection {
    fn next_direction(&mut self, last_scorer: Option<PlayerType>) -> Vec2 {
        let dir = self.0;
        match last_scorer {
            Some(PlayerType::Player1) => Vec2::new(dir.x.abs(), dir.y),
            Some(PlayerType::Player2) => Vec2::new(-dir.x.abs(), dir.y),
            None => dir,
        }
    }
}
