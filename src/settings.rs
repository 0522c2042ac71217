//! Game tuning and preferences
//!
//! Persisted as JSON next to the high score file. Every field falls back to
//! the matching `consts` default, so partial files are valid.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Countdown length in seconds
    pub session_seconds: f32,
    /// Seconds removed per timer tick
    pub timer_step_seconds: f32,
    /// Milliseconds between timer ticks
    pub timer_period_ms: u64,

    // === Flight ===
    pub launch_speed: f32,
    pub gravity: f32,
    pub restitution: f32,
    pub ball_radius: f32,
    /// Milliseconds after launch before the ball is forced back to the anchor
    pub auto_reset_ms: u64,

    // === Rim judging ===
    pub score_after_ms: u64,
    pub bounce_out_after_ms: u64,
    pub bounce_ratio_divisor: f32,
    pub rim_half_width: f32,
    pub rim_half_height: f32,
    pub rim_y_offset: f32,

    // === Layout ===
    pub rim_y: f32,
    pub anchor_offset: f32,

    // === Cosmetics ===
    pub min_scale: f32,
    pub shrink_seconds: f32,
    pub spin_rate: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_seconds: SESSION_SECONDS,
            timer_step_seconds: TIMER_STEP_SECONDS,
            timer_period_ms: TIMER_PERIOD_MS,

            launch_speed: LAUNCH_SPEED,
            gravity: GRAVITY,
            restitution: RESTITUTION,
            ball_radius: BALL_RADIUS,
            auto_reset_ms: AUTO_RESET_MS,

            score_after_ms: SCORE_AFTER_MS,
            bounce_out_after_ms: BOUNCE_OUT_AFTER_MS,
            bounce_ratio_divisor: BOUNCE_RATIO_DIVISOR,
            rim_half_width: RIM_HALF_WIDTH,
            rim_half_height: RIM_HALF_HEIGHT,
            rim_y_offset: RIM_Y_OFFSET,

            rim_y: RIM_Y,
            anchor_offset: ANCHOR_OFFSET,

            min_scale: MIN_SCALE,
            shrink_seconds: SHRINK_SECONDS,
            spin_rate: SPIN_RATE,
        }
    }
}

impl Settings {
    pub fn timer_period(&self) -> Duration {
        Duration::from_millis(self.timer_period_ms)
    }

    pub fn auto_reset_delay(&self) -> Duration {
        Duration::from_millis(self.auto_reset_ms)
    }

    pub fn score_after(&self) -> Duration {
        Duration::from_millis(self.score_after_ms)
    }

    pub fn bounce_out_after(&self) -> Duration {
        Duration::from_millis(self.bounce_out_after_ms)
    }

    /// Read settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read settings {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("parse settings {}", path.display()))
    }

    /// Read settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings: {err:#}");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("serialize settings")?;
        fs::write(path, json).with_context(|| format!("write settings {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Human-readable warnings for suspicious values (empty when all is well)
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.session_seconds <= 0.0 {
            w.push(format!(
                "session_seconds {} is not positive; the session ends immediately",
                self.session_seconds
            ));
        }
        if self.timer_step_seconds <= 0.0 {
            w.push(format!(
                "timer_step_seconds {} is not positive; the countdown never expires",
                self.timer_step_seconds
            ));
        }
        if self.timer_period_ms == 0 {
            w.push("timer_period_ms is 0; treated as 1ms".into());
        }
        if self.launch_speed <= 0.0 {
            w.push(format!("launch_speed {} leaves the ball on the anchor", self.launch_speed));
        }
        if self.gravity <= 0.0 {
            w.push(format!(
                "gravity {} is not downward; shots never come back to the rim",
                self.gravity
            ));
        }
        if !(0.0..=1.5).contains(&self.restitution) {
            w.push(format!("restitution {} outside recommended 0..1.5", self.restitution));
        }
        if self.ball_radius <= 0.0 {
            w.push(format!("ball_radius {} is not positive", self.ball_radius));
        }
        if self.bounce_ratio_divisor == 0.0 {
            w.push("bounce_ratio_divisor is 0; bounce-outs produce non-finite velocity".into());
        }
        if self.rim_half_width <= 0.0 || self.rim_half_height <= 0.0 {
            w.push("rim extents must be > 0".into());
        }
        if self.bounce_out_after_ms > self.score_after_ms {
            w.push(format!(
                "bounce_out_after_ms {} exceeds score_after_ms {}; early centered shots pass through",
                self.bounce_out_after_ms, self.score_after_ms
            ));
        }
        if self.auto_reset_ms <= self.score_after_ms {
            w.push(format!(
                "auto_reset_ms {} fires before a shot can score ({}ms)",
                self.auto_reset_ms, self.score_after_ms
            ));
        }
        if !(0.0..=1.0).contains(&self.min_scale) {
            w.push(format!("min_scale {} outside 0..1", self.min_scale));
        }
        w
    }
}
