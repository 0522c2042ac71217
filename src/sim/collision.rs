//! Rim contact detection and shot judging
//!
//! There is no depth in the scene, so "did the ball drop through the hoop"
//! is approximated: the ball must be falling onto the rim, centered within it,
//! and far enough into its flight that it must have arced in from above.

use std::time::Duration;

use glam::Vec2;

use super::projectile::Projectile;
use super::state::RimTarget;
use crate::settings::Settings;

/// Outcome of a rim contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Clean shot: award a point and reset the ball
    Score,
    /// Rejected by the rim; the ball keeps flying with this velocity
    BounceOut(Vec2),
    /// Nothing to resolve this frame
    Continue,
}

/// Geometry and timing of a rim contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RimContact {
    /// Time since launch
    pub elapsed: Duration,
    /// Ball x relative to the rim center (positive = right of center)
    pub x_offset: f32,
    pub outside_rim: bool,
    pub below_rim: bool,
}

impl RimContact {
    pub fn measure(ball: &Projectile, rim: &RimTarget, now: Duration) -> Self {
        let x_offset = ball.pos.x - rim.center.x;
        Self {
            elapsed: ball.elapsed(now),
            x_offset,
            outside_rim: x_offset.abs() > rim.half_width,
            below_rim: ball.pos.y > rim.center.y,
        }
    }
}

/// Circle vs. axis-aligned box overlap between the ball and the rim volume
pub fn overlaps_rim(ball_pos: Vec2, ball_radius: f32, rim: &RimTarget) -> bool {
    let center = rim.box_center();
    let half = rim.half_extents();
    let closest = ball_pos.clamp(center - half, center + half);
    ball_pos.distance_squared(closest) <= ball_radius * ball_radius
}

/// Deflection off the rim edge.
///
/// Tuned by feel, not derived: the falling speed is converted into sideways
/// speed in proportion to how far off-center the ball struck, and what is
/// left of it pops the ball back up (or pushes it down when struck from below).
pub fn bounce_out_velocity(vel: Vec2, x_offset: f32, below_rim: bool, ratio_divisor: f32) -> Vec2 {
    let bounce_ratio = x_offset / ratio_divisor;
    let new_vx = vel.y * bounce_ratio;
    let mut new_vy = -(vel.y - (vel.y * bounce_ratio).abs());
    if below_rim {
        new_vy = -new_vy;
    }
    Vec2::new(new_vx, new_vy)
}

/// Classify a measured contact. First matching rule wins.
pub fn classify(contact: &RimContact, vel: Vec2, settings: &Settings) -> Verdict {
    if contact.elapsed > settings.score_after() && !contact.outside_rim {
        return Verdict::Score;
    }
    if contact.elapsed > settings.bounce_out_after() || contact.below_rim || contact.outside_rim {
        return Verdict::BounceOut(bounce_out_velocity(
            vel,
            contact.x_offset,
            contact.below_rim,
            settings.bounce_ratio_divisor,
        ));
    }
    Verdict::Continue
}

/// Judge a ball that overlaps the rim.
///
/// Only a thrown, falling ball that has not already bounced out this flight
/// is considered; anything else (including stale contacts after a reset)
/// is `Continue`.
pub fn judge(ball: &Projectile, rim: &RimTarget, now: Duration, settings: &Settings) -> Verdict {
    if !ball.thrown || ball.bounced_out || ball.vel.y <= 0.0 {
        return Verdict::Continue;
    }
    classify(&RimContact::measure(ball, rim, now), ball.vel, settings)
}
