//! Hoop Flick - A flick-to-shoot basketball arcade core
//!
//! Core modules:
//! - `sim`: Shot simulation (gesture, projectile, rim judging, session state machine)
//! - `events`: Typed game events and the observer bus
//! - `highscores`: Leaderboard and its persistence collaborators
//! - `settings`: Data-driven tuning
//! - `autoplay`: Seeded demo player

pub mod autoplay;
pub mod events;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use events::{EventBus, GameEvent, SubscriptionId};
pub use highscores::{HighScoreStore, HighScores, JsonFileStore, MemoryStore};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Session length in seconds
    pub const SESSION_SECONDS: f32 = 60.0;
    /// Amount removed from the countdown per timer tick
    pub const TIMER_STEP_SECONDS: f32 = 0.1;
    /// Period of the countdown interval
    pub const TIMER_PERIOD_MS: u64 = 100;

    /// Launch speed applied to the normalized drag direction
    pub const LAUNCH_SPEED: f32 = 800.0;
    /// Downward gravity while airborne (pixels/s², screen y grows downward)
    pub const GRAVITY: f32 = 200.0;
    /// Velocity kept after a world-boundary bounce
    pub const RESTITUTION: f32 = 1.0;
    /// Liveness reset fired this long after every launch
    pub const AUTO_RESET_MS: u64 = 2000;

    /// A rim overlap later than this after launch can score
    pub const SCORE_AFTER_MS: u64 = 800;
    /// A rim overlap later than this after launch bounces out if it can't score
    pub const BOUNCE_OUT_AFTER_MS: u64 = 700;
    /// Divisor turning the rim x offset into the bounce-out ratio
    pub const BOUNCE_RATIO_DIVISOR: f32 = 100.0;

    /// Rim collision box
    pub const RIM_HALF_WIDTH: f32 = 50.0;
    pub const RIM_HALF_HEIGHT: f32 = 25.0;
    pub const RIM_Y_OFFSET: f32 = 0.0;
    /// Rim center height from the top of the world
    pub const RIM_Y: f32 = 300.0;

    /// Launch anchor distance from the bottom of the world
    pub const ANCHOR_OFFSET: f32 = 120.0;
    /// Ball collision radius
    pub const BALL_RADIUS: f32 = 36.0;

    /// Cosmetic shrink while airborne (scale reached after SHRINK_SECONDS)
    pub const MIN_SCALE: f32 = 0.6;
    pub const SHRINK_SECONDS: f32 = 1.0;
    /// Cosmetic spin while airborne (radians/s)
    pub const SPIN_RATE: f32 = 6.0;

    /// Default world size for the headless runner
    pub const WORLD_WIDTH: f32 = 480.0;
    pub const WORLD_HEIGHT: f32 = 800.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// True when both components are finite
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
