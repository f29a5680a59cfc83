//! High score table and game-over name entry
//!
//! Fixed capacity, sorted by descending score. Storage is left to the caller;
//! the table round-trips through JSON.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_NAME, HIGH_SCORE_CAPACITY, MAX_NAME_LEN};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Name typed on the game-over screen
    pub name: String,
    /// Final score
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: impl Into<String>, score: u64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    capacity: usize,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new(HIGH_SCORE_CAPACITY)
    }
}

impl HighScores {
    /// Create an empty leaderboard
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Leaderboard pre-filled with zero-score placeholders, as shown on a
    /// fresh install
    pub fn with_placeholders(capacity: usize) -> Self {
        Self {
            entries: (0..capacity)
                .map(|_| HighScoreEntry::new("EMPTY", 0))
                .collect(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u64) -> bool {
        self.entries.len() < self.capacity || self.entries.iter().any(|e| score > e.score)
    }

    /// Insert an entry before the first strictly lower score. Ties keep
    /// their existing order. Returns the 0-indexed position, or None if the
    /// entry fell off the end.
    pub fn register(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= self.capacity {
            log::debug!("Score {} did not qualify", entry.score);
            return None;
        }

        log::info!("High score #{}: {} ({})", pos + 1, entry.name, entry.score);
        self.entries.insert(pos, entry);
        self.entries.truncate(self.capacity);
        Some(pos)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: Self = serde_json::from_str(json)?;
        scores.entries.truncate(scores.capacity);
        Ok(scores)
    }
}

/// One keystroke on the name entry field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameEdit {
    Append(char),
    Backspace,
}

/// Name typed on the game-over screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    text: String,
    max_len: usize,
}

impl Default for NameEntry {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, MAX_NAME_LEN)
    }
}

impl NameEntry {
    pub fn new(initial: &str, max_len: usize) -> Self {
        Self {
            text: initial.chars().take(max_len).collect(),
            max_len,
        }
    }

    /// Apply a keystroke; control characters and input past the cap are dropped
    pub fn apply(&mut self, edit: NameEdit) {
        match edit {
            NameEdit::Append(c) => {
                if !c.is_control() && self.text.chars().count() < self.max_len {
                    self.text.push(c);
                }
            }
            NameEdit::Backspace => {
                self.text.pop();
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
