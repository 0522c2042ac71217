//! High score leaderboard and its persistence
//!
//! Tracks the top 10 session results. The best entry is the high score shown
//! on the game-over screen. Storage is a collaborator handed to the session,
//! so the same game runs against a JSON file or plain memory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Shots made in the session
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Sorted descending; ties keep the older entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// The high score (0 when nothing was recorded yet)
    pub fn best(&self) -> u32 {
        self.top_score().unwrap_or(0)
    }
}

/// Where high scores live between sessions
pub trait HighScoreStore {
    fn load(&mut self) -> Result<HighScores>;
    fn save(&mut self, scores: &HighScores) -> Result<()>;
}

/// Process-lifetime storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub scores: HighScores,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<HighScores> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &HighScores) -> Result<()> {
        self.scores = scores.clone();
        Ok(())
    }
}

/// JSON file storage. A missing file is an empty leaderboard.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<HighScores> {
        if !self.path.exists() {
            log::info!("No high scores at {}, starting fresh", self.path.display());
            return Ok(HighScores::new());
        }
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("read high scores {}", self.path.display()))?;
        let scores: HighScores = serde_json::from_str(&json)
            .with_context(|| format!("parse high scores {}", self.path.display()))?;
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    fn save(&mut self, scores: &HighScores) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("create high score dir {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(scores).context("serialize high scores")?;

        // Write beside the target then swap in, so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace high scores {}", self.path.display()))?;
        log::info!("High scores saved ({} entries)", scores.entries.len());
        Ok(())
    }
}

/// Result of recording a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScoreOutcome {
    /// High score before this session
    pub previous_best: u32,
    /// High score after this session
    pub high_score: u32,
    pub new_high_score: bool,
    /// Leaderboard rank achieved (1-indexed)
    pub rank: Option<usize>,
}

/// Read-compare-write of the leaderboard for a finished session
pub fn record_high_score(
    store: &mut dyn HighScoreStore,
    score: u32,
    timestamp: f64,
) -> Result<HighScoreOutcome> {
    let mut scores = store.load()?;
    let previous_best = scores.best();
    let rank = scores.add_score(score, timestamp);
    if rank.is_some() {
        store.save(&scores)?;
    }
    let high_score = previous_best.max(score);
    Ok(HighScoreOutcome {
        previous_best,
        high_score,
        new_high_score: score > previous_best,
        rank,
    })
}

/// Current wall-clock time as unix milliseconds
pub fn unix_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Format a timestamp relative to `now` (both unix ms)
pub fn format_age(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
