//! The session aggregate.
//!
//! `GameSession` owns the field, the ball and up to two players, and is the
//! only thing allowed to mutate them. Callers get read-only views; every
//! change goes through one of the commands below and leaves its events
//! queued until the next dispatch.

use glam::Vec2;

use crate::ball::Ball;
use crate::config::SessionConfig;
use crate::error::{require_non_blank, require_positive, DomainError};
use crate::events::{DomainEvent, EventQueue, EventSource, PlayerJoined, PlayerLeft, PlayerWon};
use crate::field::Field;
use crate::params::Params;
use crate::player::{Player, PlayerType};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Fewer than two players seated
    WaitingForPlayers,
    /// Both seats taken, rally in progress
    Active,
    /// Someone reached the target score. Terminal.
    Finished,
}

/// What a ball move led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    /// Ball stayed inside the scoring edges
    Moved,
    /// Point scored, ball served again from the center
    Scored(PlayerType),
    /// Point scored and it ended the match; ball left where it was
    Won(PlayerType),
}

/// Authoritative state of one two-player match
#[derive(Debug, Clone)]
pub struct GameSession {
    id: String,
    field: Field,
    paddle_speed: f32,
    paddle_length: f32,
    target_score: u32,
    ball: Ball,
    players: Vec<Player>, // seat order, at most MAX_PLAYERS
    finished: bool,
    events: EventQueue,
}

impl GameSession {
    /// Build a session around `ball`, which is moved to the field center.
    pub fn new(
        id: impl Into<String>,
        config: &SessionConfig,
        mut ball: Ball,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        require_non_blank(&id, "session id")?;
        require_positive(config.paddle_speed, "paddle_speed")?;
        require_positive(config.paddle_length, "paddle_length")?;
        if config.target_score == 0 {
            return Err(DomainError::NonPositive {
                field: "target_score",
            });
        }

        ball.place(config.field.center());

        Ok(Self {
            id,
            field: config.field,
            paddle_speed: config.paddle_speed,
            paddle_length: config.paddle_length,
            target_score: config.target_score,
            ball,
            players: Vec::with_capacity(Params::MAX_PLAYERS),
            finished: false,
            events: EventQueue::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn paddle_speed(&self) -> f32 {
        self.paddle_speed
    }

    pub fn paddle_length(&self) -> f32 {
        self.paddle_length
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Seated players in seat order
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    pub fn player_by_type(&self, player_type: PlayerType) -> Option<&Player> {
        self.players.iter().find(|p| p.player_type() == player_type)
    }

    /// Inclusive range a paddle center may occupy
    pub fn paddle_bounds(&self) -> (f32, f32) {
        self.field.paddle_bounds(self.paddle_length)
    }

    pub fn status(&self) -> SessionStatus {
        if self.finished {
            SessionStatus::Finished
        } else if self.players.len() == Params::MAX_PLAYERS {
            SessionStatus::Active
        } else {
            SessionStatus::WaitingForPlayers
        }
    }

    /// Seat a player. The first free seat is Player1, then Player2.
    pub fn add_player(&mut self, mut player: Player) -> Result<PlayerType, DomainError> {
        self.ensure_not_finished()?;
        if self.players.len() >= Params::MAX_PLAYERS {
            return Err(DomainError::CapacityExceeded {
                max: Params::MAX_PLAYERS,
            });
        }
        if self.player(player.id()).is_some() {
            return Err(DomainError::DuplicatePlayer(player.id().to_string()));
        }

        let player_type = if self.player_by_type(PlayerType::Player1).is_none() {
            PlayerType::Player1
        } else {
            PlayerType::Player2
        };
        player.seat(player_type, self.field.center().y);

        let (min_y, max_y) = self.paddle_bounds();
        self.events.push(PlayerJoined {
            player_id: player.id().to_string(),
            username: player.username().to_string(),
            player_type,
            min_y,
            max_y,
        });

        // Keep seat order so harvesting stays deterministic
        match player_type {
            PlayerType::Player1 => self.players.insert(0, player),
            PlayerType::Player2 => self.players.push(player),
        }

        Ok(player_type)
    }

    /// Unseat a player. Anything the player still had queued is kept.
    pub fn remove_player(&mut self, player_id: &str) -> Result<(), DomainError> {
        let index = self.player_index(player_id)?;
        let mut player = self.players.remove(index);

        self.events.extend(player.take_events());
        self.events.push(PlayerLeft {
            player_id: player.id().to_string(),
            username: player.username().to_string(),
            player_type: player.player_type(),
        });

        Ok(())
    }

    /// Move a paddle. Returns `Ok(false)` without touching anything when `new_y`
    /// is outside the paddle bounds.
    pub fn move_player(&mut self, player_id: &str, new_y: f32) -> Result<bool, DomainError> {
        let index = self.player_index(player_id)?;
        self.ensure_not_finished()?;

        let (min_y, max_y) = self.paddle_bounds();
        if !(min_y..=max_y).contains(&new_y) {
            return Ok(false);
        }

        self.players[index].move_paddle(new_y);
        Ok(true)
    }

    /// Move the ball, scoring when it crossed either edge.
    pub fn move_ball(&mut self, position: Vec2) -> Result<BallOutcome, DomainError> {
        self.ensure_not_finished()?;

        let scorer = if position.x > self.field.right_x() {
            PlayerType::Player1
        } else if position.x < self.field.left_x() {
            PlayerType::Player2
        } else {
            self.ball.move_to(position);
            return Ok(BallOutcome::Moved);
        };

        let scorer_index = self.seat_index(scorer)?;
        let loser_index = self.seat_index(scorer.opponent())?;

        let score = self.players[scorer_index].score_point();
        if score >= self.target_score {
            let winner = &self.players[scorer_index];
            let loser = &self.players[loser_index];
            self.events.push(PlayerWon {
                winner_id: winner.id().to_string(),
                winner_username: winner.username().to_string(),
                loser_id: loser.id().to_string(),
                loser_username: loser.username().to_string(),
            });
            self.finished = true;
            return Ok(BallOutcome::Won(scorer));
        }

        self.ball.serve_from(self.field.center());
        Ok(BallOutcome::Scored(scorer))
    }

    /// Point the ball somewhere new. Returns the resulting speed.
    pub fn update_ball_direction(
        &mut self,
        direction: Vec2,
        hit_by_player: bool,
    ) -> Result<f32, DomainError> {
        self.ensure_not_finished()?;
        Ok(self.ball.update_direction(direction, hit_by_player))
    }

    pub fn ball_direction(&self, ball_id: &str) -> Result<Vec2, DomainError> {
        if self.ball.id() != ball_id {
            return Err(DomainError::BallNotFound(ball_id.to_string()));
        }
        Ok(self.ball.direction())
    }

    fn ensure_not_finished(&self) -> Result<(), DomainError> {
        if self.finished {
            return Err(DomainError::SessionFinished);
        }
        Ok(())
    }

    fn player_index(&self, player_id: &str) -> Result<usize, DomainError> {
        self.players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| DomainError::PlayerNotFound(player_id.to_string()))
    }

    fn seat_index(&self, player_type: PlayerType) -> Result<usize, DomainError> {
        self.players
            .iter()
            .position(|p| p.player_type() == player_type)
            .ok_or(DomainError::SessionNotActive)
    }
}

impl EventSource for GameSession {
    /// Own events first, then each player in seat order, then the ball.
    fn take_events(&mut self) -> Vec<DomainEvent> {
        let mut events = self.events.drain();
        for player in &mut self.players {
            events.extend(player.take_events());
        }
        events.extend(self.ball.take_events());
        events
    }

    fn pending_events(&self) -> usize {
        self.events.len()
            + self.players.iter().map(Player::pending_events).sum::<usize>()
            + self.ball.pending_events()
    }
}
