use game_core::{
    create_session, BallOutcome, DirectionSource, DomainError, EventDispatcher, GameSession,
    Player, PlayerType, SessionStore,
};
use glam::Vec2;
use thiserror::Error;
use uuid::Uuid;

use crate::commands::{
    CreateGame, DirectionChange, GameHandle, JoinGame, LeaveGame, MoveBall, MovePlayer,
    UpdateBallDirection,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Runs match use cases against stored sessions.
///
/// Every command loads the session, applies the change on the aggregate and
/// then dispatches whatever events it produced before returning.
pub struct MatchService<S, D> {
    store: S,
    directions: D,
    dispatcher: EventDispatcher,
}

impl<S, D> MatchService<S, D>
where
    S: SessionStore,
    D: DirectionSource,
{
    pub fn new(store: S, directions: D) -> Self {
        Self {
            store,
            directions,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Subscribe handlers here before issuing commands
    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read-only view of a stored session
    pub fn session(&self, game_id: &str) -> Result<&GameSession, ServiceError> {
        self.store
            .get(game_id)
            .ok_or_else(|| ServiceError::GameNotFound(game_id.to_string()))
    }

    pub fn create_game(&mut self, cmd: CreateGame) -> Result<GameHandle, ServiceError> {
        let game_id = Uuid::new_v4().to_string();
        let ball_id = Uuid::new_v4().to_string();
        let direction = self.directions.next_direction(None);

        let mut session = create_session(&game_id, &ball_id, &cmd.config, direction)
            .inspect_err(|err| tracing::warn!(error = %err, "create game rejected"))?;
        self.dispatcher.dispatch(&mut session);
        let game_id = self.store.create(session);

        tracing::info!(
            %game_id,
            target_score = cmd.config.target_score,
            dir_x = direction.x,
            dir_y = direction.y,
            "game created"
        );
        Ok(GameHandle { game_id, ball_id })
    }

    pub fn join_game(&mut self, cmd: JoinGame) -> Result<PlayerType, ServiceError> {
        let session = load(&mut self.store, &cmd.game_id)?;
        let seat = Player::new(cmd.player_id.as_str(), cmd.username.as_str())
            .and_then(|player| session.add_player(player))
            .inspect_err(|err| {
                tracing::warn!(game_id = %cmd.game_id, player_id = %cmd.player_id, error = %err, "join rejected")
            })?;
        let status = session.status();
        self.dispatcher.dispatch(session);

        tracing::info!(
            game_id = %cmd.game_id,
            player_id = %cmd.player_id,
            username = %cmd.username,
            ?seat,
            ?status,
            "player joined"
        );
        Ok(seat)
    }

    pub fn leave_game(&mut self, cmd: LeaveGame) -> Result<(), ServiceError> {
        let session = load(&mut self.store, &cmd.game_id)?;
        session.remove_player(&cmd.player_id).inspect_err(|err| {
            tracing::warn!(game_id = %cmd.game_id, player_id = %cmd.player_id, error = %err, "leave rejected")
        })?;
        self.dispatcher.dispatch(session);

        tracing::info!(game_id = %cmd.game_id, player_id = %cmd.player_id, "player left");
        Ok(())
    }

    /// Returns `false` when the paddle stayed put because `new_y` was out of bounds
    pub fn move_player(&mut self, cmd: MovePlayer) -> Result<bool, ServiceError> {
        let session = load(&mut self.store, &cmd.game_id)?;
        let moved = session.move_player(&cmd.player_id, cmd.new_y)?;
        self.dispatcher.dispatch(session);

        if !moved {
            tracing::debug!(
                game_id = %cmd.game_id,
                player_id = %cmd.player_id,
                new_y = cmd.new_y,
                "paddle move out of bounds, ignored"
            );
        }
        Ok(moved)
    }

    /// Move the ball. After a point that does not end the match the ball is
    /// served again toward the side that conceded.
    pub fn move_ball(&mut self, cmd: MoveBall) -> Result<BallOutcome, ServiceError> {
        let session = load(&mut self.store, &cmd.game_id)?;
        let outcome = session.move_ball(cmd.position).inspect_err(|err| {
            tracing::warn!(game_id = %cmd.game_id, error = %err, "ball move rejected")
        })?;

        match outcome {
            BallOutcome::Moved => {}
            BallOutcome::Scored(scorer) => {
                let direction = self.directions.next_direction(Some(scorer));
                session.update_ball_direction(direction, false)?;
                tracing::info!(
                    game_id = %cmd.game_id,
                    ?scorer,
                    score = score_of(session, scorer),
                    "point scored"
                );
            }
            BallOutcome::Won(winner) => {
                tracing::info!(
                    game_id = %cmd.game_id,
                    ?winner,
                    score = score_of(session, winner),
                    "match won"
                );
            }
        }

        self.dispatcher.dispatch(session);
        Ok(outcome)
    }

    /// Returns the ball speed after the change
    pub fn update_ball_direction(&mut self, cmd: UpdateBallDirection) -> Result<f32, ServiceError> {
        let session = load(&mut self.store, &cmd.game_id)?;
        let speed = match cmd.change {
            DirectionChange::Bounce {
                direction,
                hit_by_player,
            } => session.update_ball_direction(direction, hit_by_player)?,
            DirectionChange::Serve { scorer } => {
                let direction = self.directions.next_direction(scorer);
                session.update_ball_direction(direction, false)?
            }
        };
        self.dispatcher.dispatch(session);

        tracing::debug!(game_id = %cmd.game_id, change = ?cmd.change, speed, "ball direction updated");
        Ok(speed)
    }

    pub fn ball_direction(&self, game_id: &str, ball_id: &str) -> Result<Vec2, ServiceError> {
        Ok(self.session(game_id)?.ball_direction(ball_id)?)
    }
}

fn load<'a, S: SessionStore>(
    store: &'a mut S,
    game_id: &str,
) -> Result<&'a mut GameSession, ServiceError> {
    store.get_mut(game_id).ok_or_else(|| {
        tracing::warn!(%game_id, "game not found");
        ServiceError::GameNotFound(game_id.to_string())
    })
}

fn score_of(session: &GameSession, player_type: PlayerType) -> u32 {
    session
        .player_by_type(player_type)
        .map(|p| p.score())
        .unwrap_or_default()
}
