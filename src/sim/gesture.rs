//! Drag-to-flick gesture tracking
//!
//! A gesture starts on a pointer press over the resting ball, follows the
//! pointer while held, and commits the direction from the ball to the pointer
//! on release. Only one gesture is tracked at a time.

use glam::Vec2;

use crate::is_finite_vec;

/// Tracking state of the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Tracking,
}

/// Outcome of releasing the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// Unit direction from the ball toward the release point
    Committed(Vec2),
    /// Tracking gesture released with no usable direction
    Cancelled,
    /// Pointer-up with no tracked gesture
    Ignored,
}

/// Transient drag gesture over the ball
#[derive(Debug, Clone, Default)]
pub struct DragGesture {
    pub state: GestureState,
    pub origin: Vec2,
    pub current: Vec2,
}

impl DragGesture {
    pub fn is_active(&self) -> bool {
        self.state == GestureState::Tracking
    }

    /// Pointer-down. Starts tracking only when the press lands on a capturable ball.
    ///
    /// Returns true when a new gesture started. A press while already tracking
    /// (a second pointer) is rejected and leaves the first gesture untouched.
    pub fn press(&mut self, point: Vec2, ball_center: Vec2, ball_radius: f32, can_capture: bool) -> bool {
        if self.is_active() {
            log::warn!("Rejected concurrent pointer press at ({:.1}, {:.1})", point.x, point.y);
            return false;
        }
        if !can_capture || point.distance_squared(ball_center) > ball_radius * ball_radius {
            return false;
        }
        self.state = GestureState::Tracking;
        self.origin = point;
        self.current = point;
        true
    }

    /// Pointer-move. Ignored unless tracking.
    pub fn drag(&mut self, point: Vec2) {
        if self.is_active() {
            self.current = point;
        }
    }

    /// Pointer-up. Commits the ball-to-pointer direction and returns to idle.
    pub fn release(&mut self, point: Vec2, ball_center: Vec2) -> GestureOutcome {
        if !self.is_active() {
            return GestureOutcome::Ignored;
        }
        self.current = point;
        let vector = self.vector(ball_center);
        self.cancel();

        let direction = vector.normalize_or_zero();
        if direction == Vec2::ZERO || !is_finite_vec(direction) {
            GestureOutcome::Cancelled
        } else {
            GestureOutcome::Committed(direction)
        }
    }

    /// Raw (unnormalized) vector from the ball to the pointer
    pub fn vector(&self, ball_center: Vec2) -> Vec2 {
        self.current - ball_center
    }

    /// Drop any tracked gesture
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
