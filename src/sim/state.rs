//! Session state and scene geometry
//!
//! Screen coordinates: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Current phase of the turn lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball resting at the anchor, waiting for a press
    #[default]
    Idle,
    /// Gesture being tracked over the ball
    Dragging,
    /// Ball in flight, not yet judged
    Airborne,
    /// Ball bounced out of the rim and is still flying until reset
    Resolved,
    /// Countdown expired. Terminal.
    GameOver,
}

/// Score, clock and phase exposed to the HUD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub time_remaining: f32,
    pub phase: GamePhase,
}

impl SessionState {
    pub fn new(session_seconds: f32) -> Self {
        Self {
            score: 0,
            time_remaining: session_seconds.max(0.0),
            phase: GamePhase::Idle,
        }
    }
}

/// Playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Scoring collision volume (narrower than the hoop graphic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RimTarget {
    pub center: Vec2,
    /// Horizontal half extent; balls centered beyond it are "outside the rim"
    pub half_width: f32,
    pub half_height: f32,
    /// Vertical offset of the collision box from `center`
    pub y_offset: f32,
}

impl RimTarget {
    pub fn new(center: Vec2, settings: &Settings) -> Self {
        Self {
            center,
            half_width: settings.rim_half_width,
            half_height: settings.rim_half_height,
            y_offset: settings.rim_y_offset,
        }
    }

    /// Center of the collision box
    pub fn box_center(&self) -> Vec2 {
        self.center + Vec2::new(0.0, self.y_offset)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }
}

/// Scene placement derived from the world size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub anchor: Vec2,
    pub rim_center: Vec2,
}

/// Place the launch anchor near the bottom and the rim near the top, both centered
pub fn layout(bounds: WorldBounds, settings: &Settings) -> Layout {
    let cx = bounds.width / 2.0;
    Layout {
        anchor: Vec2::new(cx, bounds.height - settings.anchor_offset),
        rim_center: Vec2::new(cx, settings.rim_y),
    }
}
