//! Authoritative state for a two-player Pong match.
//!
//! A [`GameSession`] owns the field, the ball and both players and enforces
//! every gameplay rule. Commands on the session queue [`DomainEvent`]s; an
//! [`EventDispatcher`] harvests them afterwards and fans them out to
//! subscribers. Everything here is synchronous and single-threaded.

pub mod ball;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod field;
pub mod params;
pub mod player;
pub mod ports;
pub mod session;

pub use ball::Ball;
pub use config::SessionConfig;
pub use dispatch::{Event, EventDispatcher, EventHandler};
pub use error::DomainError;
pub use events::*;
pub use field::Field;
pub use params::Params;
pub use player::{Player, PlayerType};
pub use ports::{DirectionSource, FixedDirection, SessionStore};
pub use session::{BallOutcome, GameSession, SessionStatus};

pub use glam::Vec2;

/// Build a session with a fresh ball served from the field center.
pub fn create_session(
    id: impl Into<String>,
    ball_id: impl Into<String>,
    config: &SessionConfig,
    initial_direction: Vec2,
) -> Result<GameSession, DomainError> {
    config.validate()?;
    let ball = Ball::new(
        ball_id,
        config.ball_initial_speed,
        config.ball_max_speed,
        initial_direction,
        config.field.center(),
    )?;
    GameSession::new(id, config, ball)
}
