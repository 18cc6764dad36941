use game_core::*;
use std::cell::RefCell;
use std::rc::Rc;

fn scenario_config() -> SessionConfig {
    SessionConfig {
        field: Field::new(
            Vec2::new(-10.0, -5.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(10.0, 5.0),
            Vec2::new(-10.0, 5.0),
        ),
        paddle_speed: 5.0,
        paddle_length: 2.0,
        target_score: 3,
        ball_initial_speed: 6.0,
        ball_max_speed: 15.0,
    }
}

fn scenario_session() -> GameSession {
    let mut session =
        create_session("game-1", "ball-1", &scenario_config(), Vec2::new(1.0, 0.0)).unwrap();
    session.add_player(Player::new("p1", "alice").unwrap()).unwrap();
    session.add_player(Player::new("p2", "bob").unwrap()).unwrap();
    session
}

/// Everything the dispatcher delivered, in order
fn recorder(dispatcher: &mut EventDispatcher) -> Rc<RefCell<Vec<DomainEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    dispatcher.subscribe_all(move |event| sink.borrow_mut().push(event.clone()));
    log
}

#[test]
fn test_construction_requires_positive_limits() {
    let valid = scenario_config();
    assert!(create_session("game", "ball", &valid, Vec2::X).is_ok());

    let mut config = valid.clone();
    config.ball_initial_speed = 0.0;
    assert!(create_session("game", "ball", &config, Vec2::X).is_err());

    let mut config = valid.clone();
    config.ball_max_speed = -3.0;
    assert!(create_session("game", "ball", &config, Vec2::X).is_err());

    assert!(create_session("game", " ", &valid, Vec2::X).is_err());
    assert!(create_session("", "ball", &valid, Vec2::X).is_err());
}

#[test]
fn test_join_events_reach_subscribers() {
    let mut dispatcher = EventDispatcher::new();
    let joined = Rc::new(RefCell::new(Vec::new()));
    let sink = joined.clone();
    dispatcher.subscribe::<PlayerJoined>(move |e| {
        sink.borrow_mut()
            .push((e.username.clone(), e.player_type, e.min_y, e.max_y))
    });

    let mut session = scenario_session();
    assert_eq!(dispatcher.dispatch(&mut session), 2);

    assert_eq!(
        *joined.borrow(),
        vec![
            ("alice".to_string(), PlayerType::Player1, -4.0, 4.0),
            ("bob".to_string(), PlayerType::Player2, -4.0, 4.0),
        ]
    );
}

#[test]
fn test_third_player_rejected_and_count_unchanged() {
    let mut session = scenario_session();
    let err = session
        .add_player(Player::new("p3", "carol").unwrap())
        .unwrap_err();

    assert_eq!(err, DomainError::CapacityExceeded { max: 2 });
    assert_eq!(session.player_count(), 2);
    assert_eq!(
        session.player_by_type(PlayerType::Player1).unwrap().id(),
        "p1"
    );
    assert_eq!(
        session.player_by_type(PlayerType::Player2).unwrap().id(),
        "p2"
    );
}

#[test]
fn test_paddle_moves_respect_bounds() {
    let mut dispatcher = EventDispatcher::new();
    let log = recorder(&mut dispatcher);
    let mut session = scenario_session();
    dispatcher.dispatch(&mut session);
    log.borrow_mut().clear();

    assert_eq!(session.move_player("p2", -4.0), Ok(true));
    assert_eq!(dispatcher.dispatch(&mut session), 1);
    assert_eq!(
        log.borrow()[0],
        DomainEvent::PlayerMoved(PlayerMoved {
            player_id: "p2".to_string(),
            paddle_y: -4.0,
        })
    );

    assert_eq!(session.move_player("p2", 4.5), Ok(false));
    assert_eq!(dispatcher.dispatch(&mut session), 0);
    assert_eq!(session.player("p2").unwrap().paddle_y(), -4.0);
}

#[test]
fn test_point_scored_resets_ball() {
    let mut dispatcher = EventDispatcher::new();
    let log = recorder(&mut dispatcher);
    let mut session = scenario_session();
    dispatcher.dispatch(&mut session);
    log.borrow_mut().clear();

    session.update_ball_direction(Vec2::new(1.0, 0.4), true).unwrap();
    session.move_ball(Vec2::new(8.0, 2.0)).unwrap();
    dispatcher.dispatch(&mut session);
    log.borrow_mut().clear();

    let outcome = session.move_ball(Vec2::new(11.0, 0.0)).unwrap();
    dispatcher.dispatch(&mut session);

    assert_eq!(outcome, BallOutcome::Scored(PlayerType::Player1));
    assert_eq!(session.player("p1").unwrap().score(), 1);
    assert_eq!(session.ball().position(), Vec2::ZERO);
    assert_eq!(session.ball().current_speed(), 6.0);
    assert_eq!(
        *log.borrow(),
        vec![
            DomainEvent::PlayerScored(PlayerScored {
                player_type: PlayerType::Player1,
                score: 1,
            }),
            DomainEvent::BallMoved(BallMoved {
                ball_id: "ball-1".to_string(),
                position: Vec2::ZERO,
            }),
        ]
    );
}

#[test]
fn test_winning_point_leaves_ball_untouched() {
    let mut dispatcher = EventDispatcher::new();
    let winners = Rc::new(RefCell::new(Vec::new()));
    let sink = winners.clone();
    dispatcher.subscribe::<PlayerWon>(move |e| sink.borrow_mut().push(e.clone()));

    let mut session = scenario_session();
    session.move_ball(Vec2::new(11.0, 0.0)).unwrap();
    session.move_ball(Vec2::new(11.0, 0.0)).unwrap();
    assert_eq!(session.player("p1").unwrap().score(), 2);

    session.update_ball_direction(Vec2::new(1.0, -0.2), true).unwrap();
    session.update_ball_direction(Vec2::new(1.0, 0.1), true).unwrap();
    session.move_ball(Vec2::new(9.9, 0.5)).unwrap();
    dispatcher.dispatch(&mut session);

    let position_before = session.ball().position();
    let speed_before = session.ball().current_speed();
    assert_eq!(speed_before, 8.0);

    let outcome = session.move_ball(Vec2::new(11.0, 0.0)).unwrap();
    dispatcher.dispatch(&mut session);

    assert_eq!(outcome, BallOutcome::Won(PlayerType::Player1));
    assert_eq!(session.player("p1").unwrap().score(), 3);
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.ball().position(), position_before);
    assert_eq!(session.ball().current_speed(), speed_before);
    assert_eq!(
        *winners.borrow(),
        vec![PlayerWon {
            winner_id: "p1".to_string(),
            winner_username: "alice".to_string(),
            loser_id: "p2".to_string(),
            loser_username: "bob".to_string(),
        }]
    );
}

#[test]
fn test_speed_ratchet_stops_at_max() {
    let mut config = scenario_config();
    config.ball_max_speed = 8.0;
    let mut session = create_session("game", "ball", &config, Vec2::X).unwrap();

    let speeds: Vec<f32> = (0..4)
        .map(|_| session.update_ball_direction(Vec2::X, true).unwrap())
        .collect();
    assert_eq!(speeds, vec![7.0, 8.0, 8.0, 8.0]);

    assert_eq!(session.update_ball_direction(Vec2::NEG_X, false), Ok(8.0));
}

#[test]
fn test_dispatch_is_an_idempotent_drain() {
    let mut dispatcher = EventDispatcher::new();
    let log = recorder(&mut dispatcher);
    let mut session = scenario_session();

    session.move_player("p1", 1.0).unwrap();
    session.move_ball(Vec2::new(0.5, 0.5)).unwrap();
    session.update_ball_direction(Vec2::new(-1.0, 0.0), false).unwrap();

    assert_eq!(session.pending_events(), 5);
    assert_eq!(dispatcher.dispatch(&mut session), 5);
    assert_eq!(dispatcher.dispatch(&mut session), 0);
    assert_eq!(log.borrow().len(), 5);

    // Aggregate events first, then players in seat order, then the ball
    let kinds: Vec<_> = log.borrow().iter().map(DomainEvent::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::PlayerJoined,
            EventKind::PlayerJoined,
            EventKind::PlayerMoved,
            EventKind::BallMoved,
            EventKind::BallDirectionUpdated,
        ]
    );
}

#[test]
fn test_leaving_player_is_announced() {
    let mut dispatcher = EventDispatcher::new();
    let left = Rc::new(RefCell::new(Vec::new()));
    let sink = left.clone();
    dispatcher.subscribe::<PlayerLeft>(move |e| sink.borrow_mut().push(e.player_id.clone()));

    let mut session = scenario_session();
    session.remove_player("p1").unwrap();
    dispatcher.dispatch(&mut session);

    assert_eq!(*left.borrow(), vec!["p1".to_string()]);
    assert_eq!(session.status(), SessionStatus::WaitingForPlayers);
    assert!(matches!(
        session.remove_player("p1"),
        Err(DomainError::PlayerNotFound(_))
    ));
}
