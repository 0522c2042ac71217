//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through [`Session::frame`]
//! - Scheduled callbacks run on the session clock, never wall time
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod projectile;
pub mod schedule;
pub mod session;
pub mod state;
pub mod timer;

pub use collision::{RimContact, Verdict, bounce_out_velocity, classify, judge, overlaps_rim};
pub use gesture::{DragGesture, GestureOutcome, GestureState};
pub use projectile::Projectile;
pub use schedule::{Scheduler, TimerToken};
pub use session::{InputEvent, Session};
pub use state::{GamePhase, Layout, RimTarget, SessionState, WorldBounds, layout};
pub use timer::{Countdown, TimerSignal};
