//! Domain events raised by the session aggregate and its entities.
//!
//! Events are queued on whichever object produced them and live until the
//! next dispatch harvests them. See [`crate::dispatch`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::player::PlayerType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerJoined {
    pub player_id: String,
    pub username: String,
    pub player_type: PlayerType,
    /// Lowest paddle Y the player may move to
    pub min_y: f32,
    /// Highest paddle Y the player may move to
    pub max_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLeft {
    pub player_id: String,
    pub username: String,
    pub player_type: PlayerType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMoved {
    pub player_id: String,
    pub paddle_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallMoved {
    pub ball_id: String,
    pub position: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallDirectionUpdated {
    pub ball_id: String,
    pub direction: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScored {
    pub player_type: PlayerType,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWon {
    pub winner_id: String,
    pub winner_username: String,
    pub loser_id: String,
    pub loser_username: String,
}

/// Every event the session can raise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    PlayerJoined(PlayerJoined),
    PlayerLeft(PlayerLeft),
    PlayerMoved(PlayerMoved),
    BallMoved(BallMoved),
    BallDirectionUpdated(BallDirectionUpdated),
    PlayerScored(PlayerScored),
    PlayerWon(PlayerWon),
}

/// Discriminant of [`DomainEvent`], used to key handler registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlayerJoined,
    PlayerLeft,
    PlayerMoved,
    BallMoved,
    BallDirectionUpdated,
    PlayerScored,
    PlayerWon,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::PlayerJoined,
        EventKind::PlayerLeft,
        EventKind::PlayerMoved,
        EventKind::BallMoved,
        EventKind::BallDirectionUpdated,
        EventKind::PlayerScored,
        EventKind::PlayerWon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::PlayerJoined => "player_joined",
            EventKind::PlayerLeft => "player_left",
            EventKind::PlayerMoved => "player_moved",
            EventKind::BallMoved => "ball_moved",
            EventKind::BallDirectionUpdated => "ball_direction_updated",
            EventKind::PlayerScored => "player_scored",
            EventKind::PlayerWon => "player_won",
        }
    }
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::PlayerJoined(_) => EventKind::PlayerJoined,
            DomainEvent::PlayerLeft(_) => EventKind::PlayerLeft,
            DomainEvent::PlayerMoved(_) => EventKind::PlayerMoved,
            DomainEvent::BallMoved(_) => EventKind::BallMoved,
            DomainEvent::BallDirectionUpdated(_) => EventKind::BallDirectionUpdated,
            DomainEvent::PlayerScored(_) => EventKind::PlayerScored,
            DomainEvent::PlayerWon(_) => EventKind::PlayerWon,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

macro_rules! impl_from_event {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for DomainEvent {
                fn from(event: $variant) -> Self {
                    DomainEvent::$variant(event)
                }
            }
        )*
    };
}

impl_from_event!(
    PlayerJoined,
    PlayerLeft,
    PlayerMoved,
    BallMoved,
    BallDirectionUpdated,
    PlayerScored,
    PlayerWon,
);

/// FIFO of events waiting to be harvested
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<DomainEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<DomainEvent>) {
        self.events.push(event.into());
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainEvent> {
        self.events.iter()
    }

    /// Take every queued event in insertion order, leaving the queue empty
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append another batch, keeping its order
    pub fn extend(&mut self, events: Vec<DomainEvent>) {
        self.events.extend(events);
    }
}

/// Anything that queues domain events and can hand them over for dispatch.
///
/// Entities return their own queue. The aggregate returns its own queue
/// followed by the queues of the entities it owns directly.
pub trait EventSource {
    /// Drain all pending events. A second call with no mutation in between returns nothing.
    fn take_events(&mut self) -> Vec<DomainEvent>;

    /// Number of events waiting to be harvested
    fn pending_events(&self) -> usize;
}
