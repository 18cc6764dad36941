// Use-case inputs and outputs for a match.

use game_core::{PlayerType, SessionConfig};
use glam::Vec2;

#[derive(Debug, Clone, Default)]
pub struct CreateGame {
    pub config: SessionConfig,
}

/// Ids of a freshly created game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameHandle {
    pub game_id: String,
    pub ball_id: String,
}

#[derive(Debug, Clone)]
pub struct JoinGame {
    pub game_id: String,
    pub player_id: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct LeaveGame {
    pub game_id: String,
    pub player_id: String,
}

#[derive(Debug, Clone)]
pub struct MovePlayer {
    pub game_id: String,
    pub player_id: String,
    pub new_y: f32,
}

#[derive(Debug, Clone)]
pub struct MoveBall {
    pub game_id: String,
    pub position: Vec2,
}

/// How the ball's direction should change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectionChange {
    /// Explicit new direction, e.g. after a wall or paddle bounce
    Bounce { direction: Vec2, hit_by_player: bool },
    /// Fresh random serve toward the side `scorer` just scored against
    Serve { scorer: Option<PlayerType> },
}

#[derive(Debug, Clone)]
pub struct UpdateBallDirection {
    pub game_id: String,
    pub change: DirectionChange,
}
