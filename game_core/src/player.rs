use serde::{Deserialize, Serialize};

use crate::error::{require_non_blank, DomainError};
use crate::events::{DomainEvent, EventQueue, EventSource, PlayerMoved, PlayerScored};

/// Seat of a player, decided by join order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerType {
    /// Left paddle, scores past the right edge
    Player1,
    /// Right paddle, scores past the left edge
    Player2,
}

impl PlayerType {
    pub fn opponent(self) -> Self {
        match self {
            PlayerType::Player1 => PlayerType::Player2,
            PlayerType::Player2 => PlayerType::Player1,
        }
    }
}

/// A seated player and their paddle
#[derive(Debug, Clone)]
pub struct Player {
    id: String,
    username: String,
    player_type: PlayerType,
    score: u32,
    paddle_y: f32,
    events: EventQueue,
}

impl Player {
    /// Create a player waiting to be seated. The seat is assigned on join.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let username = username.into();
        require_non_blank(&id, "player id")?;
        require_non_blank(&username, "username")?;

        Ok(Self {
            id,
            username,
            player_type: PlayerType::Player1,
            score: 0,
            paddle_y: 0.0,
            events: EventQueue::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn paddle_y(&self) -> f32 {
        self.paddle_y
    }

    /// Seat the player. Done once, on admission, without an event.
    pub(crate) fn seat(&mut self, player_type: PlayerType, paddle_y: f32) {
        self.player_type = player_type;
        self.paddle_y = paddle_y;
    }

    pub(crate) fn move_paddle(&mut self, y: f32) {
        self.paddle_y = y;
        self.events.push(PlayerMoved {
            player_id: self.id.clone(),
            paddle_y: y,
        });
    }

    /// Add one point and return the new score
    pub(crate) fn score_point(&mut self) -> u32 {
        self.score += 1;
        self.events.push(PlayerScored {
            player_type: self.player_type,
            score: self.score,
        });
        self.score
    }
}

impl EventSource for Player {
    fn take_events(&mut self) -> Vec<DomainEvent> {
        self.events.drain()
    }

    fn pending_events(&self) -> usize {
        self.events.len()
    }
}
