//! Headless local match between two bots.
//!
//! Drives a session through `MatchService` with a tiny kinematic loop (ball
//! stepping, wall bounces, paddle hit test) and logs every domain event.
//!
//! ```text
//! PONG_SEED=7 PONG_TARGET_SCORE=5 RUST_LOG=debug cargo run --bin local_match
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use game_core::{BallOutcome, DomainEvent, GameSession, PlayerScored, PlayerType, PlayerWon};
use glam::Vec2;
use match_service::{
    init_tracing, CreateGame, DirectionChange, GameHandle, InMemorySessionStore, JoinGame,
    MatchService, MoveBall, MovePlayer, RandomDirection, ServiceError, Settings,
    UpdateBallDirection,
};

const FIXED_DT: f32 = 1.0 / 60.0;
const MAX_TICKS: u32 = 60 * 60 * 10; // ten minutes of play
const PADDLE_INSET: f32 = 1.0; // paddle distance from its scoring edge
const BOT_REACTION: f32 = 0.8; // fraction of paddle speed the bots use

type Service = MatchService<InMemorySessionStore, RandomDirection>;

fn main() {
    let settings = Settings::from_env();
    init_tracing(settings.log_format);
    for warning in &settings.warnings {
        tracing::warn!("{warning}");
    }

    if let Err(err) = run(&settings) {
        tracing::error!(error = %err, "local match failed");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<(), ServiceError> {
    let directions = match settings.seed {
        Some(seed) => RandomDirection::new(seed),
        None => RandomDirection::from_entropy(),
    };
    let mut service = MatchService::new(InMemorySessionStore::new(), directions);

    let winner = Rc::new(RefCell::new(None));
    subscribe_handlers(&mut service, winner.clone());

    let handle = service.create_game(CreateGame {
        config: settings.session.clone(),
    })?;
    for (player_id, username) in [("left-bot", "Lefty"), ("right-bot", "Righty")] {
        service.join_game(JoinGame {
            game_id: handle.game_id.clone(),
            player_id: player_id.to_string(),
            username: username.to_string(),
        })?;
    }

    for tick in 0..MAX_TICKS {
        if let BallOutcome::Won(_) = step(&mut service, &handle)? {
            tracing::info!(tick, "match finished");
            break;
        }
    }

    match winner.borrow().as_ref() {
        Some(won) => tracing::info!(
            winner = %won.winner_username,
            loser = %won.loser_username,
            "final result"
        ),
        None => tracing::warn!(max_ticks = MAX_TICKS, "no winner before tick limit"),
    }
    Ok(())
}

fn subscribe_handlers(service: &mut Service, winner: Rc<RefCell<Option<PlayerWon>>>) {
    let dispatcher = service.dispatcher_mut();

    dispatcher.subscribe::<PlayerScored>(|e| {
        tracing::info!(player = ?e.player_type, score = e.score, "scoreboard");
    });
    dispatcher.subscribe::<PlayerWon>(move |e| {
        *winner.borrow_mut() = Some(e.clone());
    });
    dispatcher.subscribe_all(|event: &DomainEvent| {
        tracing::trace!(kind = event.name(), ?event, "domain event");
    });
}

/// One fixed tick: bots chase the ball, then the ball advances.
fn step(service: &mut Service, handle: &GameHandle) -> Result<BallOutcome, ServiceError> {
    let plan = plan_tick(service.session(&handle.game_id)?);

    for (player_id, new_y) in plan.paddles {
        service.move_player(MovePlayer {
            game_id: handle.game_id.clone(),
            player_id,
            new_y,
        })?;
    }

    if let Some((direction, hit_by_player)) = plan.bounce {
        service.update_ball_direction(UpdateBallDirection {
            game_id: handle.game_id.clone(),
            change: DirectionChange::Bounce {
                direction,
                hit_by_player,
            },
        })?;
    }

    service.move_ball(MoveBall {
        game_id: handle.game_id.clone(),
        position: plan.ball,
    })
}

struct TickPlan {
    paddles: Vec<(String, f32)>,
    bounce: Option<(Vec2, bool)>,
    ball: Vec2,
}

fn plan_tick(session: &GameSession) -> TickPlan {
    let field = session.field();
    let ball = session.ball();
    let (min_y, max_y) = session.paddle_bounds();
    let half_paddle = session.paddle_length() / 2.0;

    // Bots track the ball at a bit under full paddle speed
    let max_step = session.paddle_speed() * BOT_REACTION * FIXED_DT;
    let paddles = session
        .players()
        .map(|p| {
            let target = ball.position().y.clamp(min_y, max_y);
            let delta = (target - p.paddle_y()).clamp(-max_step, max_step);
            (p.id().to_string(), p.paddle_y() + delta)
        })
        .collect();

    let mut direction = ball.direction();
    let mut next = ball.position() + ball.velocity() * FIXED_DT;
    let mut bounce = None;

    // Top and bottom walls
    if next.y > field.top_y() || next.y < field.bottom_y() {
        direction.y = -direction.y;
        next.y = next.y.clamp(field.bottom_y(), field.top_y());
        bounce = Some((direction, false));
    }

    // Paddle faces
    for player in session.players() {
        let (face_x, heading_in) = match player.player_type() {
            PlayerType::Player1 => (field.left_x() + PADDLE_INSET, direction.x < 0.0),
            PlayerType::Player2 => (field.right_x() - PADDLE_INSET, direction.x > 0.0),
        };
        let crossed = match player.player_type() {
            PlayerType::Player1 => next.x <= face_x && ball.position().x > face_x,
            PlayerType::Player2 => next.x >= face_x && ball.position().x < face_x,
        };
        let offset = (next.y - player.paddle_y()) / half_paddle;

        if heading_in && crossed && offset.abs() <= 1.0 {
            // Steeper return the further from the paddle center it lands
            direction = Vec2::new(-direction.x.signum(), offset);
            next.x = face_x;
            bounce = Some((direction, true));
        }
    }

    TickPlan {
        paddles,
        bounce,
        ball: next,
    }
}
