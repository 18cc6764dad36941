//! Match use cases on top of `game_core`.
//!
//! [`MatchService`] loads sessions from a [`SessionStore`](game_core::SessionStore),
//! runs one command on the aggregate and dispatches the resulting domain
//! events. Callers own the service and must serialize access to it.

pub mod commands;
pub mod direction;
pub mod service;
pub mod settings;
pub mod store;
pub mod telemetry;

pub use commands::*;
pub use direction::RandomDirection;
pub use service::{MatchService, ServiceError};
pub use settings::{LogFormat, Settings};
pub use store::InMemorySessionStore;
pub use telemetry::init_tracing;
