use glam::Vec2;

use crate::error::{require_non_blank, require_positive, DomainError};
use crate::events::{BallDirectionUpdated, BallMoved, DomainEvent, EventQueue, EventSource};
use crate::params::Params;

/// The ball. Speed ratchets up on paddle hits and drops back on every serve.
#[derive(Debug, Clone)]
pub struct Ball {
    id: String,
    initial_speed: f32,
    current_speed: f32,
    max_speed: f32,
    direction: Vec2, // not normalized
    position: Vec2,
    events: EventQueue,
}

impl Ball {
    pub fn new(
        id: impl Into<String>,
        initial_speed: f32,
        max_speed: f32,
        direction: Vec2,
        position: Vec2,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        require_non_blank(&id, "ball id")?;
        require_positive(initial_speed, "ball_initial_speed")?;
        require_positive(max_speed, "ball_max_speed")?;

        Ok(Self {
            id,
            initial_speed,
            current_speed: initial_speed,
            max_speed,
            direction,
            position,
            events: EventQueue::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn initial_speed(&self) -> f32 {
        self.initial_speed
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Velocity a physics driver should integrate
    pub fn velocity(&self) -> Vec2 {
        self.direction.normalize_or_zero() * self.current_speed
    }

    /// Place the ball without raising an event (construction only)
    pub(crate) fn place(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.events.push(BallMoved {
            ball_id: self.id.clone(),
            position,
        });
    }

    /// Set a new direction. A paddle hit speeds the ball up by one step, capped at max speed.
    pub(crate) fn update_direction(&mut self, direction: Vec2, hit_by_player: bool) -> f32 {
        if hit_by_player && self.current_speed < self.max_speed {
            self.current_speed = (self.current_speed + Params::BALL_SPEED_STEP).min(self.max_speed);
        }
        self.direction = direction;
        self.events.push(BallDirectionUpdated {
            ball_id: self.id.clone(),
            direction,
            speed: self.current_speed,
        });
        self.current_speed
    }

    /// Back to serve speed at `center`. Raises a single `BallMoved`.
    pub(crate) fn serve_from(&mut self, center: Vec2) {
        self.current_speed = self.initial_speed;
        self.move_to(center);
    }
}

impl EventSource for Ball {
    fn take_events(&mut self) -> Vec<DomainEvent> {
        self.events.drain()
    }

    fn pending_events(&self) -> usize {
        self.events.len()
    }
}
