//! The ball
//!
//! Rests weightless at the launch anchor until flicked, then falls under
//! gravity and bounces off the world bounds until it is reset.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::WorldBounds;
use crate::lerp;
use crate::settings::Settings;

/// Cosmetic shrink/spin parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Visuals {
    min_scale: f32,
    shrink_seconds: f32,
    spin_rate: f32,
}

/// The thrown ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current acceleration: zero while resting, downward while thrown
    pub gravity: Vec2,
    pub radius: f32,
    /// Draw scale (cosmetic)
    pub scale: f32,
    /// Draw rotation in radians (cosmetic)
    pub angle: f32,
    pub restitution: f32,
    pub thrown: bool,
    /// Session clock at launch
    pub thrown_at: Option<Duration>,
    /// Latched by the first bounce-out of a flight
    pub bounced_out: bool,
    /// Resting position
    pub anchor: Vec2,
    /// Gravity strength applied on launch
    launch_gravity: f32,
    bounced_at: Option<Duration>,
    scale_at_bounce: f32,
    angle_at_bounce: f32,
    visuals: Visuals,
}

impl Projectile {
    pub fn new(anchor: Vec2, settings: &Settings) -> Self {
        Self {
            pos: anchor,
            vel: Vec2::ZERO,
            gravity: Vec2::ZERO,
            radius: settings.ball_radius,
            scale: 1.0,
            angle: 0.0,
            restitution: settings.restitution,
            thrown: false,
            thrown_at: None,
            bounced_out: false,
            anchor,
            launch_gravity: settings.gravity,
            bounced_at: None,
            scale_at_bounce: 1.0,
            angle_at_bounce: 0.0,
            visuals: Visuals {
                min_scale: settings.min_scale,
                shrink_seconds: settings.shrink_seconds,
                spin_rate: settings.spin_rate,
            },
        }
    }

    /// Flick the ball. No-op (returns false) if it is already in flight.
    pub fn launch(&mut self, direction: Vec2, speed: f32, now: Duration) -> bool {
        if self.thrown {
            return false;
        }
        self.thrown = true;
        self.thrown_at = Some(now);
        self.vel = direction * speed;
        self.gravity = Vec2::new(0.0, self.launch_gravity);
        true
    }

    /// Time since launch (zero while resting)
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.thrown_at
            .map(|at| now.saturating_sub(at))
            .unwrap_or(Duration::ZERO)
    }

    /// Advance one step of semi-implicit Euler and resolve world-bound contact.
    ///
    /// Returns the impact speed when the ball hit the ground this step.
    pub fn integrate(&mut self, dt: f32, bounds: WorldBounds) -> Option<f32> {
        if !self.thrown {
            return None;
        }
        self.vel += self.gravity * dt;
        self.pos += self.vel * dt;

        let r = self.radius;
        let e = self.restitution;

        // Side walls
        if self.pos.x - r < 0.0 && self.vel.x < 0.0 {
            self.pos.x = r;
            self.vel.x = -self.vel.x * e;
        } else if self.pos.x + r > bounds.width && self.vel.x > 0.0 {
            self.pos.x = bounds.width - r;
            self.vel.x = -self.vel.x * e;
        }

        // Ceiling
        if self.pos.y - r < 0.0 && self.vel.y < 0.0 {
            self.pos.y = r;
            self.vel.y = -self.vel.y * e;
        }

        // Ground
        if self.pos.y + r > bounds.height && self.vel.y > 0.0 {
            let impact = self.vel.y;
            self.pos.y = bounds.height - r;
            self.vel.y = -self.vel.y * e;
            return Some(impact);
        }

        None
    }

    /// Latch the bounce-out for this flight and apply the deflection
    pub fn bounce_out(&mut self, vel: Vec2, now: Duration) {
        self.bounced_out = true;
        self.vel = vel;
        self.bounced_at = Some(now);
        self.scale_at_bounce = self.scale;
        self.angle_at_bounce = self.angle;
    }

    /// Refresh the cosmetic scale/rotation from the flight clock
    pub fn update_visuals(&mut self, now: Duration) {
        if !self.thrown {
            self.scale = 1.0;
            self.angle = 0.0;
            return;
        }
        let v = self.visuals;
        let progress = |secs: f32| {
            if v.shrink_seconds > 0.0 {
                (secs / v.shrink_seconds).clamp(0.0, 1.0)
            } else {
                1.0
            }
        };

        match (self.thrown_at, self.bounced_at) {
            (_, Some(bounced_at)) => {
                // Undo the shrink and spin back the other way
                let since = now.saturating_sub(bounced_at).as_secs_f32();
                self.scale = lerp(self.scale_at_bounce, 1.0, progress(since));
                self.angle = self.angle_at_bounce - v.spin_rate * since;
            }
            (Some(thrown_at), None) => {
                let since = now.saturating_sub(thrown_at).as_secs_f32();
                self.scale = lerp(1.0, v.min_scale, progress(since));
                self.angle = v.spin_rate * since;
            }
            (None, None) => {}
        }
    }

    /// Move the resting position (layout change). An idle ball follows it.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
        if !self.thrown {
            self.pos = anchor;
        }
    }

    /// Back to rest at the anchor. Idempotent.
    pub fn reset(&mut self) {
        self.pos = self.anchor;
        self.vel = Vec2::ZERO;
        self.gravity = Vec2::ZERO;
        self.thrown = false;
        self.thrown_at = None;
        self.bounced_out = false;
        self.bounced_at = None;
        self.scale = 1.0;
        self.angle = 0.0;
        self.scale_at_bounce = 1.0;
        self.angle_at_bounce = 0.0;
    }
}
