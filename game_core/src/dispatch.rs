//! Domain event dispatch.
//!
//! [`EventDispatcher::dispatch`] harvests every pending event from an
//! [`EventSource`] (normally a [`GameSession`](crate::GameSession)) and hands
//! each one to the handlers subscribed to its concrete type.
//!
//! Handlers are keyed by event type through the [`Event`] trait. Subscribing
//! another handler to an existing event type needs no change here; a new
//! event type needs its own slot in [`EventDispatcher`] and an arm in
//! `route`, which the compiler enforces through the exhaustive match.

use crate::events::{
    BallDirectionUpdated, BallMoved, DomainEvent, EventKind, EventSource, PlayerJoined,
    PlayerLeft, PlayerMoved, PlayerScored, PlayerWon,
};

/// Receives events of one type
pub trait EventHandler<E> {
    fn handle(&mut self, event: &E);
}

impl<E, F> EventHandler<E> for F
where
    F: FnMut(&E),
{
    fn handle(&mut self, event: &E) {
        self(event)
    }
}

pub type Handlers<E> = Vec<Box<dyn EventHandler<E>>>;

mod sealed {
    pub trait Sealed {}
}

/// A concrete event type the dispatcher has a handler slot for
pub trait Event: sealed::Sealed + Sized + 'static {
    const KIND: EventKind;

    #[doc(hidden)]
    fn handlers(dispatcher: &mut EventDispatcher) -> &mut Handlers<Self>;
}

macro_rules! handler_slot {
    ($($event:ident => $slot:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $event {}

            impl Event for $event {
                const KIND: EventKind = EventKind::$event;

                fn handlers(dispatcher: &mut EventDispatcher) -> &mut Handlers<Self> {
                    &mut dispatcher.$slot
                }
            }
        )*
    };
}

handler_slot!(
    PlayerJoined => player_joined,
    PlayerLeft => player_left,
    PlayerMoved => player_moved,
    BallMoved => ball_moved,
    BallDirectionUpdated => ball_direction_updated,
    PlayerScored => player_scored,
    PlayerWon => player_won,
);

/// Synchronous, same-thread event router
#[derive(Default)]
pub struct EventDispatcher {
    player_joined: Handlers<PlayerJoined>,
    player_left: Handlers<PlayerLeft>,
    player_moved: Handlers<PlayerMoved>,
    ball_moved: Handlers<BallMoved>,
    ball_direction_updated: Handlers<BallDirectionUpdated>,
    player_scored: Handlers<PlayerScored>,
    player_won: Handlers<PlayerWon>,
    // Called for every event after the typed handlers
    any: Vec<Box<dyn FnMut(&DomainEvent)>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a closure to one event type
    ///
    /// ```ignore
    /// dispatcher.subscribe::<PlayerScored>(|e| println!("{:?} has {}", e.player_type, e.score));
    /// ```
    pub fn subscribe<E: Event>(&mut self, handler: impl FnMut(&E) + 'static) {
        E::handlers(self).push(Box::new(handler));
    }

    /// Subscribe a handler object to one event type
    pub fn register<E, H>(&mut self, handler: H)
    where
        E: Event,
        H: EventHandler<E> + 'static,
    {
        E::handlers(self).push(Box::new(handler));
    }

    /// Subscribe to every event regardless of type
    pub fn subscribe_all(&mut self, handler: impl FnMut(&DomainEvent) + 'static) {
        self.any.push(Box::new(handler));
    }

    pub fn handlers_for<E: Event>(&self) -> usize {
        self.handler_count(E::KIND)
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::PlayerJoined => self.player_joined.len(),
            EventKind::PlayerLeft => self.player_left.len(),
            EventKind::PlayerMoved => self.player_moved.len(),
            EventKind::BallMoved => self.ball_moved.len(),
            EventKind::BallDirectionUpdated => self.ball_direction_updated.len(),
            EventKind::PlayerScored => self.player_scored.len(),
            EventKind::PlayerWon => self.player_won.len(),
        }
    }

    /// Harvest all pending events from `source` and deliver them in harvest order.
    /// Returns how many events were harvested.
    pub fn dispatch<S>(&mut self, source: &mut S) -> usize
    where
        S: EventSource + ?Sized,
    {
        let events = source.take_events();
        self.deliver(&events);
        events.len()
    }

    /// Deliver an already harvested batch
    pub fn deliver(&mut self, events: &[DomainEvent]) {
        for event in events {
            self.route(event);
        }
    }

    fn route(&mut self, event: &DomainEvent) {
        match event {
            DomainEvent::PlayerJoined(e) => notify(&mut self.player_joined, e),
            DomainEvent::PlayerLeft(e) => notify(&mut self.player_left, e),
            DomainEvent::PlayerMoved(e) => notify(&mut self.player_moved, e),
            DomainEvent::BallMoved(e) => notify(&mut self.ball_moved, e),
            DomainEvent::BallDirectionUpdated(e) => notify(&mut self.ball_direction_updated, e),
            DomainEvent::PlayerScored(e) => notify(&mut self.player_scored, e),
            DomainEvent::PlayerWon(e) => notify(&mut self.player_won, e),
        }

        for handler in &mut self.any {
            handler(event);
        }
    }
}

fn notify<E>(handlers: &mut [Box<dyn EventHandler<E>>], event: &E) {
    for handler in handlers {
        handler.handle(event);
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind.name(), &self.handler_count(kind));
        }
        map.entry(&"any", &self.any.len());
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventQueue;
    use crate::player::PlayerType;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Minimal source standing in for an aggregate
    #[derive(Default)]
    struct QueueSource {
        queue: EventQueue,
    }

    impl EventSource for QueueSource {
        fn take_events(&mut self) -> Vec<DomainEvent> {
            self.queue.drain()
        }

        fn pending_events(&self) -> usize {
            self.queue.len()
        }
    }

    fn scored(score: u32) -> PlayerScored {
        PlayerScored {
            player_type: PlayerType::Player2,
            score,
        }
    }

    fn moved(x: f32) -> BallMoved {
        BallMoved {
            ball_id: "ball".to_string(),
            position: Vec2::new(x, 0.0),
        }
    }

    struct ScoreBoard {
        last: Rc<RefCell<Option<u32>>>,
    }

    impl EventHandler<PlayerScored> for ScoreBoard {
        fn handle(&mut self, event: &PlayerScored) {
            *self.last.borrow_mut() = Some(event.score);
        }
    }

    #[test]
    fn test_events_routed_by_type() {
        let scores = Rc::new(RefCell::new(Vec::new()));
        let moves = Rc::new(RefCell::new(Vec::new()));

        let mut dispatcher = EventDispatcher::new();
        let sink = scores.clone();
        dispatcher.subscribe::<PlayerScored>(move |e| sink.borrow_mut().push(e.score));
        let sink = moves.clone();
        dispatcher.subscribe::<BallMoved>(move |e| sink.borrow_mut().push(e.position.x));

        let mut source = QueueSource::default();
        source.queue.push(scored(1));
        source.queue.push(moved(3.0));
        source.queue.push(scored(2));

        assert_eq!(dispatcher.dispatch(&mut source), 3);
        assert_eq!(*scores.borrow(), vec![1, 2]);
        assert_eq!(*moves.borrow(), vec![3.0]);
    }

    #[test]
    fn test_every_handler_for_a_type_is_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();
        for _ in 0..3 {
            let calls = calls.clone();
            dispatcher.subscribe::<PlayerScored>(move |_| *calls.borrow_mut() += 1);
        }
        assert_eq!(dispatcher.handler_count(EventKind::PlayerScored), 3);
        assert_eq!(dispatcher.handler_count(EventKind::PlayerWon), 0);
        assert_eq!(dispatcher.handlers_for::<PlayerScored>(), 3);

        dispatcher.deliver(&[DomainEvent::from(scored(1))]);
        assert_eq!(*calls.borrow(), 3);
    }

    #[test]
    fn test_second_dispatch_delivers_nothing() {
        let calls = Rc::new(RefCell::new(0));
        let mut dispatcher = EventDispatcher::new();
        let counter = calls.clone();
        dispatcher.subscribe_all(move |_| *counter.borrow_mut() += 1);

        let mut source = QueueSource::default();
        source.queue.push(scored(1));
        source.queue.push(moved(0.0));

        assert_eq!(dispatcher.dispatch(&mut source), 2);
        assert_eq!(source.pending_events(), 0);
        assert_eq!(dispatcher.dispatch(&mut source), 0);
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_events_without_handlers_are_dropped() {
        let mut dispatcher = EventDispatcher::new();
        let mut source = QueueSource::default();
        source.queue.push(moved(1.0));

        assert_eq!(dispatcher.dispatch(&mut source), 1);
        assert_eq!(source.pending_events(), 0);
    }

    #[test]
    fn test_handler_object_registration() {
        let last = Rc::new(RefCell::new(None));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register::<PlayerScored, _>(ScoreBoard { last: last.clone() });

        dispatcher.deliver(&[DomainEvent::from(scored(4)), DomainEvent::from(moved(1.0))]);
        assert_eq!(*last.borrow(), Some(4));
    }

    #[test]
    fn test_catch_all_sees_harvest_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        let sink = seen.clone();
        dispatcher.subscribe_all(move |e| sink.borrow_mut().push(e.kind()));

        dispatcher.deliver(&[DomainEvent::from(moved(1.0)), DomainEvent::from(scored(1))]);
        assert_eq!(
            *seen.borrow(),
            vec![EventKind::BallMoved, EventKind::PlayerScored]
        );
    }

    #[test]
    fn test_debug_lists_handler_counts() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe::<PlayerWon>(|_| {});
        let debug = format!("{dispatcher:?}");
        assert!(debug.contains("\"player_won\": 1"));
    }
}
