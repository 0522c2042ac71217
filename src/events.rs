//! Game events and the observer bus
//!
//! Presentation (HUD, audio, game-over screen) subscribes typed handlers and
//! drops them again with [`EventBus::unsubscribe`] when its scene goes away.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discrete notifications from the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball flicked from the anchor
    Launched { velocity: Vec2 },
    /// Clean shot; `score` is the new total
    Scored { score: u32 },
    /// Ball deflected off the rim
    BouncedOut { velocity: Vec2 },
    /// Ball hit the ground (audio cue)
    GroundBounce { impact_speed: f32 },
    /// Ball returned to the anchor (after a score or the liveness timeout)
    BallReset,
    /// Countdown tick (`remaining` seconds left)
    TimeChanged { remaining: f32 },
    /// Session over. Raised once.
    GameOver {
        final_score: u32,
        high_score: u32,
        new_high_score: bool,
    },
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

/// Synchronous fan-out to registered handlers, in subscription order
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    pub fn emit(&mut self, event: &GameEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    /// Drop every handler. Returns how many were subscribed.
    pub fn clear(&mut self) -> usize {
        let n = self.handlers.len();
        self.handlers.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
