//! Play-session state machine
//!
//! Owns the ball, rim, gesture, countdown and score, and runs the turn
//! lifecycle: Idle -> Dragging -> Airborne -> (score | bounce-out) -> Idle.
//! The countdown runs beside it and forces GameOver, which is terminal.
//!
//! The host feeds pointer input through [`Session::handle`] and then calls
//! [`Session::frame`] once per rendered frame. Inside a frame, scheduled
//! callbacks (countdown ticks, the liveness reset) fire first, then the ball
//! is integrated, then the rim is checked.

use std::time::Duration;

use glam::Vec2;

use super::collision::{Verdict, judge, overlaps_rim};
use super::gesture::{DragGesture, GestureOutcome};
use super::projectile::Projectile;
use super::schedule::{Scheduler, TimerToken};
use super::state::{GamePhase, RimTarget, SessionState, WorldBounds, layout};
use super::timer::{Countdown, TimerSignal};
use crate::events::{EventBus, GameEvent, SubscriptionId};
use crate::highscores::{HighScoreOutcome, HighScoreStore, record_high_score, unix_millis};
use crate::settings::Settings;

/// Longest step the ball is integrated over in one frame
const MAX_FRAME_DT: f32 = 0.1;

/// Pointer/touch input in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
}

/// Callbacks armed on the session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheduled {
    /// Countdown interval
    TimerTick,
    /// Liveness reset for the given flight
    ResetBall { flight: u64 },
}

/// One countdown-bounded play session
pub struct Session {
    settings: Settings,
    bounds: WorldBounds,
    state: SessionState,
    timer: Countdown,
    gesture: DragGesture,
    ball: Projectile,
    rim: RimTarget,
    /// Session clock, advanced by frames
    clock: Duration,
    scheduler: Scheduler<Scheduled>,
    timer_token: Option<TimerToken>,
    reset_token: Option<TimerToken>,
    /// Incremented on every launch; stale resets carry an old value
    flight: u64,
    bus: EventBus,
    store: Box<dyn HighScoreStore>,
    high_score: Option<HighScoreOutcome>,
    /// False after shutdown
    active: bool,
}

impl Session {
    pub fn new(settings: Settings, bounds: WorldBounds, store: Box<dyn HighScoreStore>) -> Self {
        for warning in settings.validate() {
            log::warn!("settings: {warning}");
        }
        let placement = layout(bounds, &settings);
        let mut session = Self {
            state: SessionState::new(settings.session_seconds),
            timer: Countdown::new(settings.session_seconds),
            gesture: DragGesture::default(),
            ball: Projectile::new(placement.anchor, &settings),
            rim: RimTarget::new(placement.rim_center, &settings),
            clock: Duration::ZERO,
            scheduler: Scheduler::new(),
            timer_token: None,
            reset_token: None,
            flight: 0,
            bus: EventBus::new(),
            store,
            high_score: None,
            active: true,
            settings,
            bounds,
        };
        session.arm_timer();
        session.expire_if_out_of_time();
        log::info!(
            "Session started: {:.1}s on a {}x{} court",
            session.state.time_remaining,
            session.bounds.width,
            session.bounds.height
        );
        session
    }

    // --- Accessors ---

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_remaining(&self) -> f32 {
        self.state.time_remaining
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn ball(&self) -> &Projectile {
        &self.ball
    }

    pub fn rim(&self) -> &RimTarget {
        &self.rim
    }

    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Session clock
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// High score bookkeeping from the last game over
    pub fn high_score(&self) -> Option<HighScoreOutcome> {
        self.high_score
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    // --- Observers ---

    pub fn subscribe(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    fn emit(&mut self, event: GameEvent) {
        self.bus.emit(&event);
    }

    // --- Input ---

    /// Deliver one pointer event. Ignored once the game is over or torn down.
    pub fn handle(&mut self, event: InputEvent) {
        if !self.active || self.is_game_over() {
            return;
        }
        match event {
            InputEvent::PointerDown(point) => {
                let can_capture = !self.ball.thrown;
                if self
                    .gesture
                    .press(point, self.ball.pos, self.ball.radius, can_capture)
                {
                    self.state.phase = GamePhase::Dragging;
                }
            }
            InputEvent::PointerMove(point) => self.gesture.drag(point),
            InputEvent::PointerUp(point) => match self.gesture.release(point, self.ball.pos) {
                GestureOutcome::Committed(direction) => self.launch(direction),
                GestureOutcome::Cancelled => {
                    log::debug!("Throw cancelled (no drag direction)");
                    self.state.phase = GamePhase::Idle;
                }
                GestureOutcome::Ignored => {}
            },
        }
    }

    fn launch(&mut self, direction: Vec2) {
        if !self
            .ball
            .launch(direction, self.settings.launch_speed, self.clock)
        {
            return;
        }
        self.flight += 1;
        if let Some(token) = self.reset_token.take() {
            self.scheduler.cancel(token);
        }
        self.reset_token = Some(self.scheduler.schedule_once(
            self.clock,
            self.settings.auto_reset_delay(),
            Scheduled::ResetBall {
                flight: self.flight,
            },
        ));
        self.state.phase = GamePhase::Airborne;

        let velocity = self.ball.vel;
        log::debug!(
            "Launch #{} at {:?}: velocity ({:.0}, {:.0})",
            self.flight,
            self.clock,
            velocity.x,
            velocity.y
        );
        self.emit(GameEvent::Launched { velocity });
    }

    // --- Frame ---

    /// Advance the session by one rendered frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        if !self.active || self.is_game_over() {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let Ok(step) = Duration::try_from_secs_f32(dt) else {
            log::warn!("Ignoring out-of-range frame step {dt}");
            return;
        };
        self.clock += step;

        self.run_due();
        if self.is_game_over() {
            return;
        }

        if self.ball.thrown {
            if let Some(impact_speed) = self.ball.integrate(dt.min(MAX_FRAME_DT), self.bounds) {
                self.emit(GameEvent::GroundBounce { impact_speed });
            }
            self.ball.update_visuals(self.clock);

            if overlaps_rim(self.ball.pos, self.ball.radius, &self.rim) {
                self.on_rim_overlap();
            }
        }
    }

    /// Resolve a ball/rim overlap.
    ///
    /// Called by [`Session::frame`]; hosts that run their own overlap
    /// detection may call it directly. Stale calls (ball already reset,
    /// game over) do nothing.
    pub fn on_rim_overlap(&mut self) {
        if !self.active || self.is_game_over() || !self.ball.thrown {
            return;
        }
        match judge(&self.ball, &self.rim, self.clock, &self.settings) {
            Verdict::Score => {
                self.state.score += 1;
                log::debug!(
                    "Score! {} after {:?}",
                    self.state.score,
                    self.ball.elapsed(self.clock)
                );
                let score = self.state.score;
                self.emit(GameEvent::Scored { score });
                self.reset_ball();
            }
            Verdict::BounceOut(velocity) => {
                self.ball.bounce_out(velocity, self.clock);
                self.state.phase = GamePhase::Resolved;
                log::debug!(
                    "Bounce-out at x offset {:.1}",
                    self.ball.pos.x - self.rim.center.x
                );
                self.emit(GameEvent::BouncedOut { velocity });
            }
            Verdict::Continue => {}
        }
    }

    fn run_due(&mut self) {
        while let Some((token, action)) = self.scheduler.pop_due(self.clock) {
            match action {
                Scheduled::TimerTick => self.on_timer_tick(),
                Scheduled::ResetBall { flight } => {
                    if self.reset_token == Some(token) {
                        self.reset_token = None;
                    }
                    if flight == self.flight && self.ball.thrown {
                        log::debug!("Liveness reset of flight #{flight}");
                        self.reset_ball();
                    }
                }
            }
            if self.is_game_over() {
                break;
            }
        }
    }

    fn on_timer_tick(&mut self) {
        let signal = self.timer.tick(self.settings.timer_step_seconds);
        self.state.time_remaining = self.timer.remaining();
        let remaining = self.state.time_remaining;
        self.emit(GameEvent::TimeChanged { remaining });
        if signal == TimerSignal::Expired {
            self.game_over();
        }
    }

    fn arm_timer(&mut self) {
        let token =
            self.scheduler
                .schedule_every(self.clock, self.settings.timer_period(), Scheduled::TimerTick);
        self.timer_token = Some(token);
    }

    /// A session with no time on the clock is over before the first tick
    fn expire_if_out_of_time(&mut self) {
        if self.timer.remaining() <= 0.0 {
            self.game_over();
        }
    }

    /// Cancel every retained callback token
    fn cancel_scheduled(&mut self) {
        if let Some(token) = self.reset_token.take() {
            self.scheduler.cancel(token);
        }
        if let Some(token) = self.timer_token.take() {
            self.scheduler.cancel(token);
        }
        let leftover = self.scheduler.clear();
        if leftover > 0 {
            log::debug!("Dropped {leftover} untracked callbacks");
        }
    }

    fn reset_ball(&mut self) {
        if let Some(token) = self.reset_token.take() {
            self.scheduler.cancel(token);
        }
        self.ball.reset();
        if !self.is_game_over() {
            self.state.phase = GamePhase::Idle;
        }
        self.emit(GameEvent::BallReset);
    }

    fn game_over(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.state.phase = GamePhase::GameOver;
        self.state.time_remaining = 0.0;
        self.cancel_scheduled();
        self.gesture.cancel();
        self.ball.reset();

        let final_score = self.state.score;
        let outcome = match record_high_score(self.store.as_mut(), final_score, unix_millis()) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("Could not record high score: {err:#}");
                HighScoreOutcome {
                    previous_best: 0,
                    high_score: final_score,
                    new_high_score: false,
                    rank: None,
                }
            }
        };
        self.high_score = Some(outcome);

        log::info!(
            "Game over: {} points (high score {}{})",
            final_score,
            outcome.high_score,
            if outcome.new_high_score { ", new record" } else { "" }
        );
        self.emit(GameEvent::GameOver {
            final_score,
            high_score: outcome.high_score,
            new_high_score: outcome.new_high_score,
        });
    }

    // --- Scene management ---

    /// Re-layout for a new world size. An airborne ball keeps flying.
    pub fn resize(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
        let placement = layout(bounds, &self.settings);
        self.ball.set_anchor(placement.anchor);
        self.rim.center = placement.rim_center;
    }

    /// Start a fresh session (play again). Observers stay subscribed.
    pub fn restart(&mut self) {
        if !self.active {
            return;
        }
        self.cancel_scheduled();
        self.state = SessionState::new(self.settings.session_seconds);
        self.timer = Countdown::new(self.settings.session_seconds);
        self.gesture.cancel();
        self.ball.reset();
        self.flight += 1;
        self.high_score = None;
        self.arm_timer();
        self.expire_if_out_of_time();
        log::info!("Session restarted");
    }

    /// Tear down: cancel callbacks, drop observers, ignore further input
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.cancel_scheduled();
        let dropped = self.bus.clear();
        self.gesture.cancel();
        self.active = false;
        log::info!("Session shut down ({dropped} observers released)");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("ball", &self.ball)
            .field("rim", &self.rim)
            .field("flight", &self.flight)
            .field("pending_callbacks", &self.scheduler.len())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::highscores::{HighScores, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session_with(settings: Settings) -> (Session, Rc<RefCell<Vec<GameEvent>>>) {
        let mut session = Session::new(
            settings,
            WorldBounds::new(480.0, 800.0),
            Box::new(MemoryStore::new()),
        );
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        session.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        (session, events)
    }

    fn session() -> (Session, Rc<RefCell<Vec<GameEvent>>>) {
        session_with(Settings::default())
    }

    fn flick(session: &mut Session, toward: Vec2) {
        let ball = session.ball().pos;
        session.handle(InputEvent::PointerDown(ball));
        session.handle(InputEvent::PointerMove(toward));
        session.handle(InputEvent::PointerUp(toward));
    }

    fn run_for(session: &mut Session, seconds: f32) {
        let frames = (seconds / FRAME_DT).round() as usize;
        for _ in 0..frames {
            session.frame(FRAME_DT);
        }
    }

    fn count(events: &Rc<RefCell<Vec<GameEvent>>>, pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Put a launched ball straight onto the rim, falling, `elapsed` into its flight
    fn ball_on_rim(session: &mut Session, x_offset: f32, elapsed_ms: u64) {
        let rim = session.rim.center;
        session.ball.launch(Vec2::new(0.0, -1.0), 800.0, session.clock);
        session.state.phase = GamePhase::Airborne;
        session.clock += Duration::from_millis(elapsed_ms);
        session.ball.pos = Vec2::new(rim.x + x_offset, rim.y - 10.0);
        session.ball.vel = Vec2::new(0.0, 300.0);
    }

    #[test]
    fn test_starts_idle_at_anchor() {
        let (session, _) = session();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.ball().pos, Vec2::new(240.0, 680.0));
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), 60.0);
    }

    #[test]
    fn test_straight_shot_scores_and_resets() {
        let (mut session, events) = session();
        flick(&mut session, Vec2::new(240.0, 600.0));
        assert_eq!(session.phase(), GamePhase::Airborne);
        assert!(session.ball().vel.abs_diff_eq(Vec2::new(0.0, -800.0), 1e-3));

        run_for(&mut session, 1.9);
        assert_eq!(session.score(), 1);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(!session.ball().thrown);
        assert_eq!(session.ball().pos, session.ball().anchor);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Scored { score: 1 })), 1);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::BallReset)), 1);
    }

    #[test]
    fn test_late_centered_overlap_scores() {
        let (mut session, events) = session();
        ball_on_rim(&mut session, 0.0, 900);
        session.on_rim_overlap();
        assert_eq!(session.score(), 1);
        assert!(!session.ball().thrown);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::Scored { .. })), 1);
    }

    #[test]
    fn test_early_centered_overlap_keeps_falling() {
        let (mut session, events) = session();
        ball_on_rim(&mut session, 0.0, 500);
        let vel = session.ball().vel;
        session.on_rim_overlap();
        assert_eq!(session.score(), 0);
        assert!(session.ball().thrown);
        assert_eq!(session.ball().vel, vel);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_off_center_overlap_bounces_out_once() {
        let (mut session, events) = session();
        ball_on_rim(&mut session, 80.0, 900);
        session.on_rim_overlap();
        assert_eq!(session.phase(), GamePhase::Resolved);
        assert!(session.ball().bounced_out);
        assert!(session.ball().vel.x > 0.0);

        // Latched: further overlaps in this flight are ignored
        session.ball.vel = Vec2::new(0.0, 300.0);
        session.ball.pos.x = session.rim.center.x;
        session.on_rim_overlap();
        assert_eq!(session.score(), 0);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::BouncedOut { .. })), 1);
    }

    #[test]
    fn test_zero_drag_does_not_launch() {
        let (mut session, events) = session();
        let ball = session.ball().pos;
        session.handle(InputEvent::PointerDown(ball));
        assert_eq!(session.phase(), GamePhase::Dragging);
        session.handle(InputEvent::PointerUp(ball));
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(!session.ball().thrown);
        assert_eq!(session.ball().vel, Vec2::ZERO);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_press_off_ball_and_stray_release_are_ignored() {
        let (mut session, _) = session();
        session.handle(InputEvent::PointerDown(Vec2::new(10.0, 10.0)));
        assert_eq!(session.phase(), GamePhase::Idle);
        session.handle(InputEvent::PointerUp(Vec2::new(240.0, 100.0)));
        assert!(!session.ball().thrown);
    }

    #[test]
    fn test_ball_cannot_be_grabbed_mid_flight() {
        let (mut session, _) = session();
        flick(&mut session, Vec2::new(400.0, 680.0));
        session.frame(FRAME_DT);
        let pos = session.ball().pos;
        session.handle(InputEvent::PointerDown(pos));
        assert!(!session.gesture().is_active());
        assert_eq!(session.phase(), GamePhase::Airborne);
    }

    #[test]
    fn test_missed_shot_resets_after_two_seconds() {
        let (mut session, events) = session();
        // Flat shot along the floor never reaches the rim
        flick(&mut session, Vec2::new(400.0, 680.0));
        run_for(&mut session, 1.9);
        assert!(session.ball().thrown);
        run_for(&mut session, 0.2);
        assert!(!session.ball().thrown);
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::BallReset)), 1);
        assert!(count(&events, |e| matches!(e, GameEvent::GroundBounce { .. })) >= 1);
    }

    #[test]
    fn test_stale_reset_does_not_touch_next_flight() {
        let (mut session, _) = session();
        flick(&mut session, Vec2::new(240.0, 600.0));
        run_for(&mut session, 1.5);
        assert_eq!(session.score(), 1);

        // Second shot before the first flight's 2s deadline
        flick(&mut session, Vec2::new(400.0, 680.0));
        run_for(&mut session, 1.0);
        assert!(session.ball().thrown, "first flight's reset must have been cancelled");
    }

    #[test]
    fn test_countdown_expiry_forces_game_over_once() {
        let settings = Settings {
            session_seconds: 0.05,
            ..Default::default()
        };
        let (mut session, events) = session_with(settings);
        flick(&mut session, Vec2::new(240.0, 600.0));
        run_for(&mut session, 0.2);

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.time_remaining(), 0.0);
        assert!(!session.ball().thrown);
        assert_eq!(session.ball().pos, session.ball().anchor);
        assert!(session.scheduler.is_empty());

        run_for(&mut session, 1.0);
        flick(&mut session, Vec2::new(240.0, 600.0));
        assert!(!session.ball().thrown);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::GameOver { .. })), 1);
    }

    #[test]
    fn test_countdown_ticks_every_hundred_ms() {
        let (mut session, events) = session();
        run_for(&mut session, 1.0);
        assert!((session.time_remaining() - 59.0).abs() < 0.01);
        let ticks = count(&events, |e| matches!(e, GameEvent::TimeChanged { .. }));
        assert!((9..=10).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_game_over_reports_stored_high_score() {
        let mut store = MemoryStore::new();
        store.scores = HighScores::new();
        store.scores.add_score(10, 0.0);
        let settings = Settings {
            session_seconds: 0.1,
            ..Default::default()
        };
        let mut session = Session::new(settings, WorldBounds::new(480.0, 800.0), Box::new(store));
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        session.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        run_for(&mut session, 0.2);
        assert_eq!(
            *events.borrow().last().unwrap(),
            GameEvent::GameOver {
                final_score: 0,
                high_score: 10,
                new_high_score: false,
            }
        );
        assert_eq!(session.high_score().map(|h| h.previous_best), Some(10));
    }

    #[test]
    fn test_restart_refills_clock_and_score() {
        let settings = Settings {
            session_seconds: 0.2,
            ..Default::default()
        };
        let (mut session, events) = session_with(settings);
        ball_on_rim(&mut session, 0.0, 900);
        session.on_rim_overlap();
        run_for(&mut session, 0.5);
        assert!(session.is_game_over());

        session.restart();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.score(), 0);
        assert!((session.time_remaining() - 0.2).abs() < 1e-6);
        run_for(&mut session, 0.5);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::GameOver { .. })), 2);
    }

    #[test]
    fn test_shutdown_cancels_callbacks_and_observers() {
        let (mut session, events) = session();
        flick(&mut session, Vec2::new(240.0, 600.0));
        let before = events.borrow().len();
        session.shutdown();
        assert!(session.scheduler.is_empty());
        assert!(!session.is_active());

        run_for(&mut session, 3.0);
        session.handle(InputEvent::PointerDown(session.ball().anchor));
        assert_eq!(events.borrow().len(), before);
        assert_eq!(session.time_remaining(), 60.0);
    }

    #[test]
    fn test_resize_moves_idle_ball_and_rim() {
        let (mut session, _) = session();
        session.resize(WorldBounds::new(1000.0, 600.0));
        assert_eq!(session.ball().pos, Vec2::new(500.0, 480.0));
        assert_eq!(session.rim().center, Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_bad_frame_dt_is_ignored() {
        let (mut session, _) = session();
        session.frame(f32::NAN);
        session.frame(-1.0);
        assert_eq!(session.clock(), Duration::ZERO);
    }

    #[test]
    fn test_huge_frame_dt_is_ignored() {
        let (mut session, events) = session();
        session.frame(1.0e20);
        session.frame(f32::MAX);
        assert_eq!(session.clock(), Duration::ZERO);
        assert_eq!(session.time_remaining(), 60.0);
        assert!(events.borrow().is_empty());

        session.frame(FRAME_DT);
        assert!(session.clock() > Duration::ZERO);
    }

    #[test]
    fn test_zero_length_session_starts_over() {
        let settings = Settings {
            session_seconds: 0.0,
            ..Default::default()
        };
        let mut session = Session::new(
            settings,
            WorldBounds::new(480.0, 800.0),
            Box::new(MemoryStore::new()),
        );
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.time_remaining(), 0.0);
        assert!(session.scheduler.is_empty());

        flick(&mut session, Vec2::new(240.0, 600.0));
        assert!(!session.ball().thrown);
        assert_eq!(session.phase(), GamePhase::GameOver);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        session.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        session.restart();
        assert!(session.is_game_over());
        flick(&mut session, Vec2::new(240.0, 600.0));
        assert!(!session.ball().thrown);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::GameOver { .. })), 1);
    }
}
